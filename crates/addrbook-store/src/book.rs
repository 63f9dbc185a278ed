use crate::error::{Result, StoreError};
use crate::paths;
use addrbook_core::domain::{Contact, ContactKey, ContactUpdate};
use addrbook_core::rules::ImportPolicy;
use addrbook_sync::{decode, encode, Format, ParsedRecord};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    City,
    State,
    Zip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub warnings: Vec<String>,
}

/// Contacts of one book in insertion order. No two share a `ContactKey`.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    contacts: Vec<Contact>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contains(&self, key: &ContactKey) -> bool {
        self.contacts.iter().any(|contact| &contact.key() == key)
    }

    pub fn find(&self, first_name: &str, last_name: &str) -> Option<&Contact> {
        self.position(first_name, last_name)
            .map(|index| &self.contacts[index])
    }

    /// Appends unless a contact with the same name is already present.
    pub fn add_contact(&mut self, contact: Contact) -> bool {
        let key = contact.key();
        if self.contains(&key) {
            debug!(contact = %key, "duplicate contact rejected");
            return false;
        }
        debug!(contact = %key, "contact added");
        self.contacts.push(contact);
        true
    }

    pub fn list_contacts(&self) -> Vec<String> {
        self.contacts.iter().map(Contact::to_string).collect()
    }

    /// Applies `update` to the contact named `first_name last_name`. Either
    /// every value is applied or none is. A rename onto another contact's
    /// name is rejected.
    pub fn edit_contact_by_name(
        &mut self,
        first_name: &str,
        last_name: &str,
        update: &ContactUpdate,
    ) -> Result<Option<&Contact>> {
        let Some(index) = self.position(first_name, last_name) else {
            return Ok(None);
        };

        let mut edited = self.contacts[index].clone();
        edited.apply(update)?;

        let key = edited.key();
        let collides = self
            .contacts
            .iter()
            .enumerate()
            .any(|(other, contact)| other != index && contact.key() == key);
        if collides {
            return Err(StoreError::DuplicateContact(key.to_string()));
        }

        debug!(contact = %key, fields = update.len(), "contact edited");
        self.contacts[index] = edited;
        Ok(Some(&self.contacts[index]))
    }

    pub fn delete_contact_by_name(&mut self, first_name: &str, last_name: &str) -> Option<Contact> {
        let index = self.position(first_name, last_name)?;
        let removed = self.contacts.remove(index);
        debug!(contact = %removed.key(), "contact deleted");
        Some(removed)
    }

    /// Stable and ascending; the stored order is left alone.
    pub fn sorted_by(&self, key: SortKey) -> Vec<&Contact> {
        let mut sorted: Vec<&Contact> = self.contacts.iter().collect();
        match key {
            SortKey::Name => sorted.sort_by_key(|contact| contact.key()),
            SortKey::City => sorted.sort_by_key(|contact| contact.city().to_lowercase()),
            SortKey::State => sorted.sort_by_key(|contact| contact.state().to_lowercase()),
            SortKey::Zip => sorted.sort_by_key(|contact| contact.zip_code().to_string()),
        }
        sorted
    }

    pub fn sort_by_name(&self) -> Vec<&Contact> {
        self.sorted_by(SortKey::Name)
    }

    pub fn sort_by_city(&self) -> Vec<&Contact> {
        self.sorted_by(SortKey::City)
    }

    pub fn sort_by_state(&self) -> Vec<&Contact> {
        self.sorted_by(SortKey::State)
    }

    pub fn sort_by_zip(&self) -> Vec<&Contact> {
        self.sorted_by(SortKey::Zip)
    }

    pub fn export_to(&self, format: Format, path: &Path) -> Result<usize> {
        let data = encode(format, &self.contacts)?;
        paths::ensure_parent_dir(path)?;
        fs::write(path, data)?;
        debug!(
            format = %format,
            count = self.contacts.len(),
            path = %path.display(),
            "contacts exported"
        );
        Ok(self.contacts.len())
    }

    pub fn export_to_txt(&self, path: &Path) -> Result<usize> {
        self.export_to(Format::Text, path)
    }

    pub fn export_to_csv(&self, path: &Path) -> Result<usize> {
        self.export_to(Format::Csv, path)
    }

    pub fn export_to_json(&self, path: &Path) -> Result<usize> {
        self.export_to(Format::Json, path)
    }

    /// Reads `path`, then merges its records. Nothing changes if the file is
    /// missing or unreadable as a whole.
    pub fn import_from(
        &mut self,
        format: Format,
        path: &Path,
        policy: ImportPolicy,
    ) -> Result<ImportReport> {
        let data = read_import_file(path)?;
        let records = decode(format, &data)?;
        let report = self.merge_records(records, policy)?;
        debug!(
            format = %format,
            path = %path.display(),
            added = report.added,
            duplicates = report.duplicates,
            invalid = report.invalid,
            "contacts imported"
        );
        Ok(report)
    }

    pub fn import_from_txt(&mut self, path: &Path, policy: ImportPolicy) -> Result<ImportReport> {
        self.import_from(Format::Text, path, policy)
    }

    pub fn import_from_csv(&mut self, path: &Path, policy: ImportPolicy) -> Result<ImportReport> {
        self.import_from(Format::Csv, path, policy)
    }

    pub fn import_from_json(&mut self, path: &Path, policy: ImportPolicy) -> Result<ImportReport> {
        self.import_from(Format::Json, path, policy)
    }

    /// Appends decoded records in order, skipping names already present.
    /// Under `ImportPolicy::Abort` a single invalid record fails the whole
    /// merge before anything is appended.
    pub fn merge_records(
        &mut self,
        records: Vec<ParsedRecord>,
        policy: ImportPolicy,
    ) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        let mut valid = Vec::with_capacity(records.len());

        for record in records {
            match record.contact {
                Ok(contact) => valid.push(contact),
                Err(source) => match policy {
                    ImportPolicy::Abort => {
                        return Err(StoreError::InvalidRecord {
                            position: record.position,
                            source,
                        });
                    }
                    ImportPolicy::Skip => {
                        report.invalid += 1;
                        report
                            .warnings
                            .push(format!("record {}: {source}", record.position));
                        warn!(position = record.position, error = %source, "skipping record");
                    }
                },
            }
        }

        for contact in valid {
            let name = contact.full_name();
            if self.add_contact(contact) {
                report.added += 1;
            } else {
                report.duplicates += 1;
                report.warnings.push(format!("duplicate contact skipped: {name}"));
            }
        }

        Ok(report)
    }

    fn position(&self, first_name: &str, last_name: &str) -> Option<usize> {
        let key = ContactKey::new(first_name, last_name);
        self.contacts.iter().position(|contact| contact.key() == key)
    }
}

fn read_import_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound(path.display().to_string())
        } else {
            StoreError::Io(err)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{AddressBook, SortKey};
    use addrbook_core::domain::{Contact, ContactRecord};

    fn contact(first: &str, last: &str, zip: &str) -> Contact {
        Contact::new(ContactRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            address: "1 Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip_code: zip.to_string(),
            phone_number: "+919876543210".to_string(),
            email: "someone@mail.com".to_string(),
        })
        .expect("valid contact")
    }

    #[test]
    fn sort_by_name_uses_first_then_last() {
        let mut book = AddressBook::new();
        book.add_contact(contact("bob", "Zed", "411001"));
        book.add_contact(contact("Alice", "Young", "411002"));
        book.add_contact(contact("alice", "Brown", "411003"));
        let names: Vec<String> = book
            .sorted_by(SortKey::Name)
            .iter()
            .map(|c| c.full_name())
            .collect();
        assert_eq!(names, vec!["alice Brown", "Alice Young", "bob Zed"]);
    }

    #[test]
    fn sort_by_zip_is_stable() {
        let mut book = AddressBook::new();
        book.add_contact(contact("Cara", "One", "411009"));
        book.add_contact(contact("Ann", "Two", "411001"));
        book.add_contact(contact("Ben", "Three", "411009"));
        let firsts: Vec<&str> = book.sort_by_zip().iter().map(|c| c.first_name()).collect();
        assert_eq!(firsts, vec!["Ann", "Cara", "Ben"]);
        assert_eq!(book.contacts()[0].first_name(), "Cara");
    }
}
