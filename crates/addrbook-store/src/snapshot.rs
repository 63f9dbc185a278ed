use crate::error::{Result, StoreError};
use crate::paths;
use crate::system::AddressBookSystem;
use addrbook_core::domain::{Contact, ContactRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    books: Vec<SnapshotBook>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotBook {
    name: String,
    contacts: Vec<ContactRecord>,
}

pub fn to_json(system: &AddressBookSystem) -> Result<String> {
    let file = SnapshotFile {
        books: system
            .books()
            .map(|(name, book)| SnapshotBook {
                name: name.to_string(),
                contacts: book
                    .contacts()
                    .iter()
                    .map(|contact| contact.record().clone())
                    .collect(),
            })
            .collect(),
    };
    let mut out = serde_json::to_string_pretty(&file)?;
    out.push('\n');
    Ok(out)
}

/// Rebuilds a system through the same operations the caller would use, so a
/// hand-edited file cannot smuggle in invalid or duplicate contacts.
pub fn from_json(data: &str) -> Result<AddressBookSystem> {
    let file: SnapshotFile = serde_json::from_str(data)?;
    let mut system = AddressBookSystem::new();
    for entry in file.books {
        let book = system.add_address_book(&entry.name).map_err(|err| match err {
            StoreError::DuplicateBook(name) => {
                StoreError::InvalidSnapshot(format!("duplicate address book: {name}"))
            }
            other => other,
        })?;
        for record in entry.contacts {
            let contact = Contact::new(record).map_err(|err| {
                StoreError::InvalidSnapshot(format!("book {}: {err}", entry.name))
            })?;
            let name = contact.full_name();
            if !book.add_contact(contact) {
                return Err(StoreError::InvalidSnapshot(format!(
                    "book {}: duplicate contact {name}",
                    entry.name
                )));
            }
        }
    }
    Ok(system)
}

/// A missing file is an empty system.
pub fn load(path: &Path) -> Result<AddressBookSystem> {
    match fs::read_to_string(path) {
        Ok(data) => from_json(&data),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AddressBookSystem::new()),
        Err(err) => Err(err.into()),
    }
}

/// Writes a sibling temp file and renames it over `path`.
pub fn save(system: &AddressBookSystem, path: &Path) -> Result<()> {
    let data = to_json(system)?;
    paths::ensure_parent_dir(path)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);
    fs::write(tmp, data)?;
    if let Err(err) = fs::rename(tmp, path) {
        let _ = fs::remove_file(tmp);
        return Err(err.into());
    }
    Ok(())
}
