//! Browser `localStorage` backing for the single save slot.

use geocoin_game::SnapshotSlot;
use geocoin_game::constants::SNAPSHOT_KEY;
use thiserror::Error;

use crate::dom;

#[derive(Debug, Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebStorageError {
    fn from_js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Storage(dom::js_error_message(value))
    }
}

/// Save slot stored under one `localStorage` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageSlot {
    key: String,
}

impl Default for LocalStorageSlot {
    fn default() -> Self {
        Self::new(SNAPSHOT_KEY)
    }
}

impl LocalStorageSlot {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SnapshotSlot for LocalStorageSlot {
    type Error = WebStorageError;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        let storage = dom::local_storage().map_err(|e| WebStorageError::from_js(&e))?;
        storage
            .get_item(&self.key)
            .map_err(|e| WebStorageError::from_js(&e))
    }

    fn write(&self, value: &str) -> Result<(), Self::Error> {
        let storage = dom::local_storage().map_err(|e| WebStorageError::from_js(&e))?;
        storage
            .set_item(&self.key, value)
            .map_err(|e| WebStorageError::from_js(&e))
    }

    fn clear(&self) -> Result<(), Self::Error> {
        let storage = dom::local_storage().map_err(|e| WebStorageError::from_js(&e))?;
        storage
            .remove_item(&self.key)
            .map_err(|e| WebStorageError::from_js(&e))
    }
}
