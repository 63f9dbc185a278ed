use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    LastName,
    Address,
    City,
    State,
    ZipCode,
    PhoneNumber,
    Email,
}

impl ContactField {
    /// Column order shared by every serialized format.
    pub const ALL: [ContactField; 8] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Address,
        ContactField::City,
        ContactField::State,
        ContactField::ZipCode,
        ContactField::PhoneNumber,
        ContactField::Email,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::Address => "address",
            ContactField::City => "city",
            ContactField::State => "state",
            ContactField::ZipCode => "zip_code",
            ContactField::PhoneNumber => "phone_number",
            ContactField::Email => "email",
        }
    }

    pub const fn prompt_label(self) -> &'static str {
        match self {
            ContactField::FirstName => "First Name",
            ContactField::LastName => "Last Name",
            ContactField::Address => "Address",
            ContactField::City => "City",
            ContactField::State => "State",
            ContactField::ZipCode => "ZIP Code",
            ContactField::PhoneNumber => "Phone Number (+91 1234567890)",
            ContactField::Email => "Email",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase().replace('-', "_");
        ContactField::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ContactField::parse(raw).ok_or_else(|| CoreError::UnknownField(raw.to_string()))
    }
}
