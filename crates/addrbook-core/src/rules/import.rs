use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an import reacts to a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPolicy {
    /// Reject the whole file and leave the book untouched.
    #[default]
    Abort,
    /// Drop the failing record and keep going.
    Skip,
}

impl ImportPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            ImportPolicy::Abort => "abort",
            ImportPolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportPolicy {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ImportPolicy::Abort),
            "skip" => Ok(ImportPolicy::Skip),
            _ => Err(CoreError::InvalidImportPolicy(raw.to_string())),
        }
    }
}
