//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::consts::{DEFAULT_HISTORY_LIMIT, LAYOUT_VERSION, STORAGE_KEY, STORAGE_KEY_VERSION};
use crate::persistence::{FileStore, LayoutPersistence};
use crate::store::EditorStore;

pub const DEFAULT_STORAGE_DIR: &str = ".badgeboard";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Directory the file-backed layout store writes into.
    pub storage_dir: PathBuf,
    pub data_key: String,
    pub version_key: String,
    /// Stored layouts tagged with any other version are discarded on restore.
    pub layout_version: String,
    /// Undo steps retained.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            data_key: STORAGE_KEY.to_owned(),
            version_key: STORAGE_KEY_VERSION.to_owned(),
            layout_version: LAYOUT_VERSION.to_owned(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `BADGE_STORAGE_DIR`: default `.badgeboard`
    /// - `BADGE_DATA_KEY`: default `badge_layout_data_v1`
    /// - `BADGE_VERSION_KEY`: default `badge_layout_version`
    /// - `BADGE_LAYOUT_VERSION`: default `4.3`
    /// - `BADGE_HISTORY_LIMIT`: default 200
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from any variable source. Unset variables take their defaults;
    /// set but empty or malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |var: &'static str, default: String| -> Result<String, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { var }),
                Some(v) => Ok(v.trim().to_owned()),
            }
        };

        let storage_dir = PathBuf::from(text("BADGE_STORAGE_DIR", defaults.storage_dir.to_string_lossy().into_owned())?);
        let data_key = text("BADGE_DATA_KEY", defaults.data_key)?;
        let version_key = text("BADGE_VERSION_KEY", defaults.version_key)?;
        let layout_version = text("BADGE_LAYOUT_VERSION", defaults.layout_version)?;
        let history_limit = parse_positive("BADGE_HISTORY_LIMIT", lookup("BADGE_HISTORY_LIMIT"), defaults.history_limit)?;

        let config = Self { storage_dir, data_key, version_key, layout_version, history_limit };
        tracing::info!(
            storage_dir = %config.storage_dir.display(),
            layout_version = %config.layout_version,
            history_limit = config.history_limit,
            "editor config loaded"
        );
        Ok(config)
    }

    /// Empty editor store honoring the history limit.
    #[must_use]
    pub fn editor_store(&self) -> EditorStore {
        EditorStore::with_history_limit(self.history_limit)
    }

    /// File-backed persistence under the configured directory and keys.
    #[must_use]
    pub fn persistence(&self) -> LayoutPersistence<FileStore> {
        LayoutPersistence::with_keys(
            FileStore::new(&self.storage_dir),
            self.data_key.clone(),
            self.version_key.clone(),
            self.layout_version.clone(),
        )
    }
}

fn parse_positive(var: &'static str, raw: Option<String>, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}
