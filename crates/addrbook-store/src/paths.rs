use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "addrbook";
const DATA_FILENAME: &str = "addressbooks.json";

/// `custom` wins when given; otherwise the snapshot lives in the private
/// per-user data directory, which is created on demand.
pub fn resolve_data_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) if path.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(path)),
        Some(path) => Ok(path),
        None => {
            let dir = default_data_dir()?;
            create_private_dir(&dir)?;
            Ok(dir.join(DATA_FILENAME))
        }
    }
}

/// `$XDG_DATA_HOME/addrbook`, else `~/.local/share/addrbook`.
pub fn default_data_dir() -> Result<PathBuf> {
    let base = match env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        Some(base) if base.as_os_str().is_empty() => {
            return Err(StoreError::InvalidDataPath(base));
        }
        Some(base) => base,
        None => dirs::home_dir()
            .ok_or(StoreError::MissingHomeDir)?
            .join(".local/share"),
    };
    Ok(base.join(APP_DIR))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
