use addrbook_core::CoreError;
use addrbook_sync::SyncError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("address book already exists: {0}")]
    DuplicateBook(String),
    #[error("contact already exists: {0}")]
    DuplicateContact(String),
    #[error("invalid record {position}: {source}")]
    InvalidRecord {
        position: usize,
        #[source]
        source: SyncError,
    },
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Core,
    Sync,
    Json,
    MissingHomeDir,
    InvalidDataPath,
    NotFound,
    DuplicateBook,
    DuplicateContact,
    InvalidRecord,
    InvalidSnapshot,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::Sync(_) => StoreErrorKind::Sync,
            StoreError::Json(_) => StoreErrorKind::Json,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::DuplicateBook(_) => StoreErrorKind::DuplicateBook,
            StoreError::DuplicateContact(_) => StoreErrorKind::DuplicateContact,
            StoreError::InvalidRecord { .. } => StoreErrorKind::InvalidRecord,
            StoreError::InvalidSnapshot(_) => StoreErrorKind::InvalidSnapshot,
        }
    }
}
