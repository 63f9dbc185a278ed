pub mod csv;
pub mod error;
pub mod format;
pub mod json;
pub mod text;

pub use error::{Result, SyncError};
pub use format::{decode, encode, Format, ParsedRecord};
