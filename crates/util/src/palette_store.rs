//! Persistence for the end user's own palette.
//!
//! The palette is stored as a JSON array of colors under a single key of an
//! injected [`KeyValueStorage`]. Every mutation is a full read-modify-write
//! that lands in storage before the call returns. Entries that no longer
//! parse are skipped on load, so one bad color never hides the rest.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tint_types::ColorValue;
use tracing::{debug, warn};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the user palette.
pub const USER_PALETTE_KEY: &str = "oui.colorpicker";

/// Result of [`PaletteStore::remove_at`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// The entry at the index was removed; carries the resulting palette.
    Removed(Vec<ColorValue>),
    /// The index did not address an entry; storage was left untouched.
    OutOfRange { index: usize, len: usize },
}

/// User palette backed by durable key-value storage.
pub struct PaletteStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    // Held across load -> mutate -> write so concurrent mutations queue up.
    write_lock: Mutex<()>,
}

impl PaletteStore {
    /// Create a store using the default palette key.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, USER_PALETTE_KEY)
    }

    /// Create a store under a custom key.
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted palette. Missing or unreadable content yields an
    /// empty palette.
    pub fn load(&self) -> Vec<ColorValue> {
        let payload = match self.storage.get(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(key = %self.key, error = %error, "Failed to read user palette; using an empty palette");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Option<Vec<Value>>>(&payload) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(error) => {
                warn!(key = %self.key, error = %error, "Failed to parse user palette; using an empty palette");
                return Vec::new();
            }
        };

        entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match ColorValue::try_from(entry) {
                Ok(color) => Some(color),
                Err(error) => {
                    warn!(key = %self.key, index, error = %error, "Skipping unreadable user palette entry");
                    None
                }
            })
            .collect()
    }

    /// Append `color` and persist. Returns the palette as written.
    pub fn append(&self, color: ColorValue) -> Result<Vec<ColorValue>, StorageError> {
        let _guard = self.write_lock.lock().expect("palette lock poisoned");
        let mut colors = self.load();
        colors.push(color);
        self.write(&colors)?;
        debug!(key = %self.key, color = %color, len = colors.len(), "appended color to user palette");
        Ok(colors)
    }

    /// Remove the entry at `index` and persist. Out-of-range indices are a
    /// logged no-op.
    pub fn remove_at(&self, index: usize) -> Result<RemoveOutcome, StorageError> {
        let _guard = self.write_lock.lock().expect("palette lock poisoned");
        let mut colors = self.load();
        if index >= colors.len() {
            warn!(
                key = %self.key,
                index,
                len = colors.len(),
                "Ignoring removal outside of the user palette; display and storage may be out of sync"
            );
            return Ok(RemoveOutcome::OutOfRange {
                index,
                len: colors.len(),
            });
        }
        let removed = colors.remove(index);
        self.write(&colors)?;
        debug!(key = %self.key, color = %removed, index, "removed color from user palette");
        Ok(RemoveOutcome::Removed(colors))
    }

    /// Forget the whole palette.
    pub fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().expect("palette lock poisoned");
        self.storage.remove(&self.key)
    }

    fn write(&self, colors: &[ColorValue]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(colors)?;
        self.storage.set(&self.key, &payload)
    }
}
