use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rolodex_core::rules::validate_window_days;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const APP_DIR: &str = "rolodex";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the window stored in the address book when set.
    pub window_days: Option<u32>,
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid window_days value: {0}")]
    InvalidWindowDays(i64),
    #[error("invalid data_file value: {0}")]
    InvalidDataFile(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    window_days: Option<i64>,
    data_file: Option<PathBuf>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(err @ (ConfigError::MissingHomeDir | ConfigError::InvalidConfigPath(_)))
            if !required =>
        {
            debug!(error = %err, "config unavailable, using defaults");
            return Ok(AppConfig::default());
        }
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => {
            debug!(path = %path.display(), "config loaded");
            Ok(config)
        }
        None => {
            debug!(path = %path.display(), "config missing, using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed, path.parent())?))
}

// Relative data_file entries resolve against the directory holding the config.
fn merge_config(parsed: ConfigFile, config_dir: Option<&Path>) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(days) = parsed.window_days {
        let days = validate_window_days(days).map_err(|_| ConfigError::InvalidWindowDays(days))?;
        config.window_days = Some(days);
    }

    if let Some(data_file) = parsed.data_file {
        if data_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidDataFile(data_file));
        }
        let resolved = match config_dir {
            Some(dir) if data_file.is_relative() => dir.join(data_file),
            _ => data_file,
        };
        config.data_file = Some(resolved);
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
