use crate::error::not_found;
use addrbook_config::AppConfig;
use addrbook_store::{AddressBook, Store};
use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

pub mod books;
pub mod completions;
pub mod contacts;
pub mod query;
pub mod shell;
pub mod transfer;

pub struct Context<'a> {
    pub store: &'a mut Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

impl Context<'_> {
    pub fn book(&self, name: &str) -> Result<&AddressBook> {
        self.store
            .system()
            .get_address_book(name)
            .ok_or_else(|| not_found(format!("address book {name}")))
    }

    pub fn book_mut(&mut self, name: &str) -> Result<&mut AddressBook> {
        self.store
            .system_mut()
            .get_address_book_mut(name)
            .ok_or_else(|| not_found(format!("address book {name}")))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
