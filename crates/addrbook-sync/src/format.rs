use crate::error::{Result, SyncError};
use crate::{csv, json, text};
use addrbook_core::domain::Contact;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Csv,
    Json,
}

impl Format {
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = SyncError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Format::Text),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(SyncError::Parse(format!("unknown format: {other}"))),
        }
    }
}

/// One decoded record. `position` is 1-based: the line for csv, the array
/// index for json, the entry for text.
#[derive(Debug)]
pub struct ParsedRecord {
    pub position: usize,
    pub contact: Result<Contact>,
}

pub fn encode(format: Format, contacts: &[Contact]) -> Result<String> {
    match format {
        Format::Text => Ok(text::export_text(contacts)),
        Format::Csv => Ok(csv::export_csv(contacts)),
        Format::Json => json::export_json(contacts),
    }
}

pub fn decode(format: Format, data: &str) -> Result<Vec<ParsedRecord>> {
    match format {
        Format::Text => text::parse_text(data),
        Format::Csv => csv::parse_csv(data),
        Format::Json => json::parse_json(data),
    }
}
