pub mod book;
pub mod error;
pub mod paths;
pub mod snapshot;
pub mod system;

pub use book::{AddressBook, ImportReport, SortKey};
pub use system::{AddressBookSystem, BookEntry};

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The session's address books plus where they are persisted.
pub struct Store {
    path: Option<PathBuf>,
    system: AddressBookSystem,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let system = snapshot::load(path)?;
        debug!(path = %path.display(), books = system.len(), "store loaded");
        Ok(Self {
            path: Some(path.to_path_buf()),
            system,
        })
    }

    pub fn open_in_memory() -> Self {
        Self {
            path: None,
            system: AddressBookSystem::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn system(&self) -> &AddressBookSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut AddressBookSystem {
        &mut self.system
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        snapshot::save(&self.system, path)?;
        debug!(path = %path.display(), books = self.system.len(), "store saved");
        Ok(())
    }
}
