//! Loading configuration from TOML and the environment.

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{ConfigError, ConfigResult, StudioConfig};

/// Overrides the model identifier.
pub const MODEL_ENV: &str = "PARABLE_STUDIO_MODEL";
/// Overrides the API root.
pub const BASE_URL_ENV: &str = "PARABLE_STUDIO_BASE_URL";
/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "PARABLE_STUDIO_DATA_DIR";
/// Overrides the log filter.
pub const LOG_ENV: &str = "PARABLE_STUDIO_LOG";

impl StudioConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from `path`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file exists but cannot be read,
    /// and [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml_str(&text)?;
                info!(path = %path.display(), "configuration loaded");
                Ok(config)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// Applies overrides from an arbitrary lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(model) = get(MODEL_ENV) {
            self.model = model;
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(dir) = get(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(filter) = get(LOG_ENV) {
            self.log_filter = filter;
        }
    }
}
