use crate::domain::field::ContactField;
use std::collections::BTreeMap;

/// A set of new field values for an existing contact. Later values for the
/// same field replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    values: BTreeMap<ContactField, String>,
}

impl ContactUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an update from `(field name, value)` pairs. Names that are not
    /// contact fields are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut update = Self::new();
        for (name, value) in pairs {
            if let Some(field) = ContactField::parse(name.as_ref()) {
                update.insert(field, value);
            }
        }
        update
    }

    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: ContactField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }
}
