use crate::domain::ContactField;
use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;

pub type FieldRule = fn(&str) -> bool;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("compile name pattern"));
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 \t,/-]+$").expect("compile address pattern"));
static STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z \t]+$").expect("compile state pattern"));
static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("compile zip pattern"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+91 ?[0-9]{10}$").expect("compile phone pattern"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(\.[A-Za-z0-9]+)*@[A-Za-z]{2,}(\.[A-Za-z]{2,}){1,2}$")
        .expect("compile email pattern")
});

pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

pub fn is_valid_address(value: &str) -> bool {
    ADDRESS_RE.is_match(value)
}

pub fn is_valid_city(value: &str) -> bool {
    NAME_RE.is_match(value)
}

pub fn is_valid_state(value: &str) -> bool {
    STATE_RE.is_match(value)
}

pub fn is_valid_zip_code(value: &str) -> bool {
    ZIP_RE.is_match(value)
}

pub fn is_valid_phone_number(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn rule_for(field: ContactField) -> FieldRule {
    match field {
        ContactField::FirstName | ContactField::LastName => is_valid_name,
        ContactField::Address => is_valid_address,
        ContactField::City => is_valid_city,
        ContactField::State => is_valid_state,
        ContactField::ZipCode => is_valid_zip_code,
        ContactField::PhoneNumber => is_valid_phone_number,
        ContactField::Email => is_valid_email,
    }
}

pub fn validate_field(field: ContactField, value: &str) -> Result<(), CoreError> {
    if rule_for(field)(value) {
        Ok(())
    } else {
        Err(CoreError::invalid_field(field, value))
    }
}
