//! Layout persistence over a string key-value store.
//!
//! DESIGN
//! ======
//! The editor saves only the present slot list, as JSON under one key, plus a
//! layout version tag under a second key. The storage backend is a trait so
//! the host can supply browser storage, a file directory, or memory.
//!
//! ERROR HANDLING
//! ==============
//! Backend and encoding failures are `PersistenceError`s inside this module.
//! The public layout operations log them and report plain success values:
//! a failed save must never disturb editor state.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::consts::{LAYOUT_VERSION, STORAGE_KEY, STORAGE_KEY_VERSION};
use crate::slot::Slot;
use crate::store::EditorStore;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage io failed: {0}")]
    Io(#[from] io::Error),
    #[error("layout encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// String key-value storage.
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store, for tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// One file per key inside a directory.
///
/// Writes go to a temp file that is then renamed over the target, so a crash
/// mid-write leaves either the old value or the new one. The directory is
/// created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so only `[A-Za-z0-9_.-]` is accepted and a leading dot is not.
    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let temp = self.dir.join(format!("{key}.tmp"));
        fs::write(&temp, value)?;
        fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// LayoutPersistence
// =============================================================================

/// What [`LayoutPersistence::restore`] did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A saved layout was loaded.
    Loaded { slots: usize },
    /// Nothing usable was stored; the editor keeps its current layout.
    Defaulted,
    /// The stored version tag did not match. Saved data was discarded and the
    /// editor reset to the default template.
    VersionReset,
}

/// Versioned save/load of the slot list.
#[derive(Debug, Clone)]
pub struct LayoutPersistence<S> {
    store: S,
    data_key: String,
    version_key: String,
    version: String,
}

impl<S: KeyValueStore> LayoutPersistence<S> {
    /// Use the standard keys and the current layout version.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_keys(store, STORAGE_KEY, STORAGE_KEY_VERSION, LAYOUT_VERSION)
    }

    #[must_use]
    pub fn with_keys(
        store: S,
        data_key: impl Into<String>,
        version_key: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self { store, data_key: data_key.into(), version_key: version_key.into(), version: version.into() }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Layout version this instance writes and accepts.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Write `slots` under the data key. Returns `false` (and logs) on failure.
    pub fn save(&mut self, slots: &[Slot]) -> bool {
        match self.try_save(slots) {
            Ok(()) => {
                info!(slots = slots.len(), key = %self.data_key, "layout saved");
                true
            }
            Err(e) => {
                warn!(error = %e, key = %self.data_key, "layout save failed");
                false
            }
        }
    }

    fn try_save(&mut self, slots: &[Slot]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(slots)?;
        self.store.set(&self.data_key, &json)
    }

    /// Read the saved slot list. `None` when absent, unreadable, or malformed.
    #[must_use]
    pub fn load(&self) -> Option<Vec<Slot>> {
        match self.try_load() {
            Ok(slots) => slots,
            Err(e) => {
                warn!(error = %e, key = %self.data_key, "stored layout unreadable");
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<Vec<Slot>>, PersistenceError> {
        let Some(json) = self.store.get(&self.data_key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Remove the saved slot list. The version tag is kept.
    pub fn clear(&mut self) -> bool {
        match self.store.remove(&self.data_key) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, key = %self.data_key, "layout clear failed");
                false
            }
        }
    }

    /// Version tag currently in storage.
    #[must_use]
    pub fn stored_version(&self) -> Option<String> {
        match self.store.get(&self.version_key) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, key = %self.version_key, "stored layout version unreadable");
                None
            }
        }
    }

    /// Whether storage carries this instance's version tag.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.stored_version().as_deref() == Some(self.version.as_str())
    }

    /// Write this instance's version tag.
    pub fn stamp_version(&mut self) -> bool {
        match self.store.set(&self.version_key, &self.version) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, key = %self.version_key, "layout version stamp failed");
                false
            }
        }
    }

    /// Bring `editor` in line with storage at startup.
    ///
    /// On a version mismatch (including no tag at all) the saved layout is
    /// discarded, the version is stamped, and the editor is reset to the
    /// default template. Otherwise a saved layout, if readable, replaces the
    /// editor's slots.
    pub fn restore(&mut self, editor: &mut EditorStore) -> RestoreOutcome {
        if !self.is_current() {
            info!(stored = ?self.stored_version(), current = %self.version, "layout version mismatch; resetting");
            self.clear();
            self.stamp_version();
            editor.reset_to_default();
            return RestoreOutcome::VersionReset;
        }
        match self.load() {
            Some(slots) => {
                editor.replace_slots(slots);
                RestoreOutcome::Loaded { slots: editor.slots().len() }
            }
            None => RestoreOutcome::Defaulted,
        }
    }
}
