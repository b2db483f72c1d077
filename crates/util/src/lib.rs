//! Persistence helpers for the tint color picker.
//!
//! [`storage`] provides origin-scoped key-value backends and
//! [`palette_store`] keeps the end user's palette in one of them.

pub mod palette_store;
pub mod storage;

pub use palette_store::{PaletteStore, RemoveOutcome, USER_PALETTE_KEY};
pub use storage::{
    DEFAULT_ORIGIN, InMemoryStorage, JsonFileStorage, KeyValueStorage, STORAGE_PATH_ENV, StorageError,
    default_storage_path, expand_tilde_path,
};
