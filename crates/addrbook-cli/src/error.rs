use addrbook_config::ConfigError;
use addrbook_core::CoreError;
use addrbook_store::error::{StoreError, StoreErrorKind};
use addrbook_sync::SyncError;
use anyhow::Error;
use std::error::Error as StdError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

/// The first cause with a known type decides the code; context layers added
/// with `anyhow::Context` are skipped over.
pub fn exit_code_for(err: &Error) -> ExitCode {
    let code = err
        .chain()
        .find_map(classify)
        .unwrap_or(EXIT_FAILURE);
    ExitCode::from(code)
}

fn classify(cause: &(dyn StdError + 'static)) -> Option<u8> {
    if let Some(err) = cause.downcast_ref::<CliError>() {
        return Some(match err {
            CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            CliError::NotFound(_) => EXIT_NOT_FOUND,
        });
    }
    if let Some(err) = cause.downcast_ref::<StoreError>() {
        return Some(store_code(err));
    }
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(config_code(err));
    }
    if let Some(err) = cause.downcast_ref::<SyncError>() {
        return Some(sync_code(err));
    }
    cause
        .downcast_ref::<CoreError>()
        .map(|_| EXIT_INVALID_INPUT)
}

fn store_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::Sync => match err {
            StoreError::Sync(inner) => sync_code(inner),
            _ => EXIT_FAILURE,
        },
        StoreErrorKind::Io | StoreErrorKind::Json | StoreErrorKind::MissingHomeDir => EXIT_FAILURE,
        StoreErrorKind::Core
        | StoreErrorKind::InvalidDataPath
        | StoreErrorKind::DuplicateBook
        | StoreErrorKind::DuplicateContact
        | StoreErrorKind::InvalidRecord
        | StoreErrorKind::InvalidSnapshot => EXIT_INVALID_INPUT,
    }
}

fn config_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir | ConfigError::Read { .. } => EXIT_FAILURE,
        _ => EXIT_INVALID_INPUT,
    }
}

fn sync_code(err: &SyncError) -> u8 {
    match err {
        SyncError::Io(_) => EXIT_FAILURE,
        SyncError::Core(_) | SyncError::Json(_) | SyncError::Parse(_) => EXIT_INVALID_INPUT,
    }
}
