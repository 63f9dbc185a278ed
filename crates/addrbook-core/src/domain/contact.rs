use crate::domain::field::ContactField;
use crate::domain::update::ContactUpdate;
use crate::error::CoreError;
use crate::rules::validate_field;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unvalidated field values, as read from input or a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub email: String,
}

impl ContactRecord {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Address => &self.address,
            ContactField::City => &self.city,
            ContactField::State => &self.state,
            ContactField::ZipCode => &self.zip_code,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Address => &mut self.address,
            ContactField::City => &mut self.city,
            ContactField::State => &mut self.state,
            ContactField::ZipCode => &mut self.zip_code,
            ContactField::PhoneNumber => &mut self.phone_number,
            ContactField::Email => &mut self.email,
        };
        *slot = value;
    }
}

/// Identity of a contact inside a book: first and last name, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactKey {
    first_name: String,
    last_name: String,
}

impl ContactKey {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_lowercase(),
            last_name: last_name.to_lowercase(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl fmt::Display for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// A contact whose every field has passed its rule. There is no way to build
/// or mutate one that skips validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ContactRecord", into = "ContactRecord")]
pub struct Contact {
    record: ContactRecord,
}

impl Contact {
    pub fn new(record: ContactRecord) -> Result<Self, CoreError> {
        for field in ContactField::ALL {
            validate_field(field, record.get(field))?;
        }
        Ok(Self { record })
    }

    pub fn key(&self) -> ContactKey {
        ContactKey::new(&self.record.first_name, &self.record.last_name)
    }

    pub fn is_same_person(&self, other: &Contact) -> bool {
        self.key() == other.key()
    }

    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        self.key() == ContactKey::new(first_name, last_name)
    }

    pub fn get(&self, field: ContactField) -> &str {
        self.record.get(field)
    }

    pub fn first_name(&self) -> &str {
        &self.record.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.record.last_name
    }

    pub fn address(&self) -> &str {
        &self.record.address
    }

    pub fn city(&self) -> &str {
        &self.record.city
    }

    pub fn state(&self) -> &str {
        &self.record.state
    }

    pub fn zip_code(&self) -> &str {
        &self.record.zip_code
    }

    pub fn phone_number(&self) -> &str {
        &self.record.phone_number
    }

    pub fn email(&self) -> &str {
        &self.record.email
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.record.first_name, self.record.last_name)
    }

    pub fn record(&self) -> &ContactRecord {
        &self.record
    }

    pub fn into_record(self) -> ContactRecord {
        self.record
    }

    /// Validates every value in `update` before assigning any of them, so a
    /// failing field leaves the contact untouched.
    pub fn apply(&mut self, update: &ContactUpdate) -> Result<(), CoreError> {
        for (field, value) in update.iter() {
            validate_field(field, value)?;
        }
        for (field, value) in update.iter() {
            self.record.set(field, value.to_string());
        }
        Ok(())
    }
}

impl TryFrom<ContactRecord> for Contact {
    type Error = CoreError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        Contact::new(record)
    }
}

impl From<Contact> for ContactRecord {
    fn from(contact: Contact) -> Self {
        contact.record
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.record;
        writeln!(f, "Name       : {} {}", r.first_name, r.last_name)?;
        writeln!(
            f,
            "Address    : {}, {}, {} - {}",
            r.address, r.city, r.state, r.zip_code
        )?;
        writeln!(f, "Phone      : {}", r.phone_number)?;
        write!(f, "Email      : {}", r.email)
    }
}
