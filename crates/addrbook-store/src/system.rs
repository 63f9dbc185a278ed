use crate::book::AddressBook;
use crate::error::{Result, StoreError};
use addrbook_core::domain::{normalize_book_name, Contact, ContactField};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A contact together with the name of the book holding it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BookEntry<'a> {
    pub book: &'a str,
    pub contact: &'a Contact,
}

/// Books in creation order, each under a unique name.
#[derive(Debug, Clone, Default)]
pub struct AddressBookSystem {
    books: Vec<(String, AddressBook)>,
}

impl AddressBookSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn add_address_book(&mut self, name: &str) -> Result<&mut AddressBook> {
        let name = normalize_book_name(name)?;
        if self.index_of(&name).is_some() {
            return Err(StoreError::DuplicateBook(name));
        }
        debug!(book = %name, "address book created");
        let index = self.books.len();
        self.books.push((name, AddressBook::new()));
        Ok(&mut self.books[index].1)
    }

    pub fn get_address_book(&self, name: &str) -> Option<&AddressBook> {
        self.index_of(name.trim()).map(|index| &self.books[index].1)
    }

    pub fn get_address_book_mut(&mut self, name: &str) -> Option<&mut AddressBook> {
        self.index_of(name.trim())
            .map(|index| &mut self.books[index].1)
    }

    pub fn book_names(&self) -> Vec<&str> {
        self.books.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn books(&self) -> impl Iterator<Item = (&str, &AddressBook)> {
        self.books.iter().map(|(name, book)| (name.as_str(), book))
    }

    pub fn entries(&self) -> impl Iterator<Item = BookEntry<'_>> {
        self.books.iter().flat_map(|(name, book)| {
            book.contacts().iter().map(move |contact| BookEntry {
                book: name.as_str(),
                contact,
            })
        })
    }

    /// Case-insensitive exact match on `field`, in book then insertion order.
    pub fn search_by(&self, field: ContactField, value: &str) -> Vec<BookEntry<'_>> {
        let needle = value.to_lowercase();
        self.entries()
            .filter(|entry| entry.contact.get(field).to_lowercase() == needle)
            .collect()
    }

    pub fn search_by_city(&self, city: &str) -> Vec<BookEntry<'_>> {
        self.search_by(ContactField::City, city)
    }

    pub fn search_by_state(&self, state: &str) -> Vec<BookEntry<'_>> {
        self.search_by(ContactField::State, state)
    }

    /// Keys are the stored values verbatim, so `Delhi` and `delhi` stay apart.
    pub fn grouped_by(&self, field: ContactField) -> BTreeMap<&str, Vec<BookEntry<'_>>> {
        let mut groups: BTreeMap<&str, Vec<BookEntry<'_>>> = BTreeMap::new();
        for entry in self.entries() {
            groups
                .entry(entry.contact.get(field))
                .or_default()
                .push(entry);
        }
        groups
    }

    pub fn view_all_grouped_by_city(&self) -> BTreeMap<&str, Vec<BookEntry<'_>>> {
        self.grouped_by(ContactField::City)
    }

    pub fn view_all_grouped_by_state(&self) -> BTreeMap<&str, Vec<BookEntry<'_>>> {
        self.grouped_by(ContactField::State)
    }

    pub fn count_by(&self, field: ContactField) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries() {
            *counts
                .entry(entry.contact.get(field).to_string())
                .or_insert(0) += 1;
        }
        counts
    }

    pub fn count_by_city(&self) -> BTreeMap<String, usize> {
        self.count_by(ContactField::City)
    }

    pub fn count_by_state(&self) -> BTreeMap<String, usize> {
        self.count_by(ContactField::State)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.books.iter().position(|(existing, _)| existing == name)
    }
}
