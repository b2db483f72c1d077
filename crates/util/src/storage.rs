//! Key-value storage backends for picker state that outlives the process.
//!
//! Storage is scoped to an *origin*: every origin gets its own JSON document,
//! so two deployments of the picker never see each other's palettes. The
//! document is a flat object mapping keys to string payloads
//! (`~/.config/tint/<origin>/storage.json` on most platforms).

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dirs_next::{config_dir, home_dir};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable allowing callers to override the storage file path.
pub const STORAGE_PATH_ENV: &str = "TINT_STORAGE_PATH";

/// Default filename for the JSON document.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Origin used when the caller does not name one.
pub const DEFAULT_ORIGIN: &str = "localhost";

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O failure while reading or writing the storage document.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable string storage addressed by key.
pub trait KeyValueStorage: Send + Sync {
    /// Read the payload stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop `key` entirely. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage persisted as one JSON document per origin.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open the document at `path`, or the default location for `origin` when
    /// no path is given. `TINT_STORAGE_PATH` takes precedence over the default.
    pub fn open<P: Into<Option<PathBuf>>>(path: P, origin: &str) -> Result<Self, StorageError> {
        let resolved_path = match path.into() {
            Some(path) => expand_tilde_path(path),
            None => default_storage_path(origin),
        };
        let entries = load_document(&resolved_path)?;
        debug!(path = %resolved_path.display(), keys = entries.len(), "opened storage document");
        Ok(Self {
            path: resolved_path,
            entries: Mutex::new(entries),
        })
    }

    /// Path to the underlying JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_locked(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(entries)?;
        // Readers only ever see the old or the new document.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, data)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().expect("storage lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        // The cache only moves once the document is on disk.
        self.save_locked(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.save_locked(&updated)?;
        *entries = updated;
        Ok(())
    }
}

/// In-memory storage. Clones share the same map, so a second handle behaves
/// like the same origin seen from a fresh process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().expect("storage lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde_path(path: PathBuf) -> PathBuf {
    if let Some(first) = path.components().next()
        && first.as_os_str() != "~"
    {
        return path;
    }

    let input = path.to_string_lossy();
    let trimmed = input.trim();

    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }

    if let Some(rest) = trimmed.strip_prefix("~\\") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }

    PathBuf::from(trimmed)
}

/// Default document path for `origin`, honoring `TINT_STORAGE_PATH`.
pub fn default_storage_path(origin: &str) -> PathBuf {
    if let Ok(path) = env::var(STORAGE_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde_path(PathBuf::from(path));
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tint")
        .join(sanitize_origin(origin))
        .join(STORAGE_FILE_NAME)
}

/// Origins become directory names; anything outside `[A-Za-z0-9._-]` is replaced.
fn sanitize_origin(origin: &str) -> String {
    let trimmed = origin.trim();
    if trimmed.is_empty() {
        return DEFAULT_ORIGIN.to_string();
    }
    trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect()
}

fn load_document(path: &Path) -> Result<HashMap<String, String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse storage document; starting empty"
                );
                Ok(HashMap::new())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(error) => Err(StorageError::Io(error)),
    }
}
