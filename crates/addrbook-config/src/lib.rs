use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use addrbook_core::domain::normalize_book_name;
use addrbook_core::rules::ImportPolicy;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "addrbook";
const CONFIG_FILENAME: &str = "config.toml";

/// Settings after validation. Every field has a usable default.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub data_path: Option<PathBuf>,
    pub default_book: Option<String>,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    pub on_invalid: ImportPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate home directory")]
    MissingHomeDir,
    #[error("config path is empty: {0:?}")]
    InvalidConfigPath(PathBuf),
    #[error("config file does not exist: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file {0} is readable by other users; chmod 600 it")]
    InsecurePermissions(PathBuf),
    #[error("data_path must not be empty")]
    InvalidDataPath(PathBuf),
    #[error("default_book must name a book, got {0:?}")]
    InvalidDefaultBook(String),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bad config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    data_path: Option<PathBuf>,
    default_book: Option<String>,
    #[serde(default)]
    import: RawImport,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawImport {
    on_invalid: Option<ImportPolicy>,
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let data_path = match raw.data_path {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(ConfigError::InvalidDataPath(path))
            }
            other => other,
        };
        let default_book = raw
            .default_book
            .map(|book| {
                normalize_book_name(&book).map_err(|_| ConfigError::InvalidDefaultBook(book))
            })
            .transpose()?;

        Ok(AppConfig {
            data_path,
            default_book,
            import: ImportConfig {
                on_invalid: raw.import.on_invalid.unwrap_or_default(),
            },
        })
    }
}

/// Loads the config. An explicit `config_path` must exist; the default
/// location may be absent, in which case defaults apply.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let explicit = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir | ConfigError::InvalidConfigPath(_)) if !explicit => {
            return Ok(AppConfig::default());
        }
        Err(err) => return Err(err),
    };
    Ok(read_config(&path, explicit)?.unwrap_or_default())
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        return non_empty(path);
    }
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => non_empty(PathBuf::from(dir))?,
        None => dirs::home_dir()
            .ok_or(ConfigError::MissingHomeDir)?
            .join(".config"),
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
}

fn non_empty(path: PathBuf) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        Err(ConfigError::InvalidConfigPath(path))
    } else {
        Ok(path)
    }
}

fn read_config(path: &Path, must_exist: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        return if must_exist {
            Err(ConfigError::MissingConfigFile(path.to_path_buf()))
        } else {
            Ok(None)
        };
    }

    check_private(path)?;
    let read_err = |source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    };
    let text = fs::read_to_string(path).map_err(read_err)?;
    let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    AppConfig::try_from(raw).map(Some)
}

#[cfg(unix)]
fn check_private(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .permissions()
        .mode();
    if mode & 0o077 == 0 {
        Ok(())
    } else {
        Err(ConfigError::InsecurePermissions(path.to_path_buf()))
    }
}

#[cfg(not(unix))]
fn check_private(_path: &Path) -> Result<()> {
    Ok(())
}
