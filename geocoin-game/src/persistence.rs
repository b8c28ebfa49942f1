//! Snapshot persistence over a single key-value slot.
//!
//! The slot stores one JSON document shaped like
//! `{"points": 42, "cacheStates": [{"i": 3, "j": -2, "coinsToCollect": 5, "coinSerial": 1}]}`.
//! Loading never fails: a missing, unreadable, or malformed document yields
//! the empty default.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use thiserror::Error;

use crate::cache::CacheState;

/// Durable copy of the player's points and every live cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub cache_states: Vec<CacheState>,
}

impl PersistedSnapshot {
    /// Parse a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Platform storage for one snapshot value.
/// Platform-specific implementations should provide this.
pub trait SnapshotSlot {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the stored value, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    fn read(&self) -> Result<Option<String>, Self::Error>;

    /// Overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn write(&self, value: &str) -> Result<(), Self::Error>;

    /// Remove the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be cleared.
    fn clear(&self) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot slot error: {0}")]
    Slot(Box<dyn std::error::Error + Send + Sync>),
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    fn slot<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Slot(Box::new(err))
    }
}

/// Write `snapshot` to the slot, replacing any previous value.
///
/// # Errors
///
/// Returns an error if serialization or the slot write fails.
pub fn save<S: SnapshotSlot>(slot: &S, snapshot: &PersistedSnapshot) -> Result<(), PersistenceError> {
    let json = snapshot.to_json()?;
    slot.write(&json).map_err(PersistenceError::slot)?;
    log::debug!(
        "saved snapshot: {} points, {} caches",
        snapshot.points,
        snapshot.cache_states.len()
    );
    Ok(())
}

/// Read the slot, falling back to the empty snapshot on any problem.
#[must_use]
pub fn load<S: SnapshotSlot>(slot: &S) -> PersistedSnapshot {
    let text = match slot.read() {
        Ok(Some(text)) => text,
        Ok(None) => return PersistedSnapshot::default(),
        Err(err) => {
            log::warn!("snapshot slot unreadable, starting fresh: {err}");
            return PersistedSnapshot::default();
        }
    };
    match PersistedSnapshot::from_json(&text) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::warn!("snapshot malformed, starting fresh: {err}");
            PersistedSnapshot::default()
        }
    }
}

/// Clear the slot and return the empty snapshot.
///
/// # Errors
///
/// Returns an error if the slot cannot be cleared.
pub fn reset<S: SnapshotSlot>(slot: &S) -> Result<PersistedSnapshot, PersistenceError> {
    slot.clear().map_err(PersistenceError::slot)?;
    Ok(PersistedSnapshot::default())
}

/// In-memory slot; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    /// A slot pre-filled with raw text, useful for exercising corrupt data.
    #[must_use]
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(text.into()))),
        }
    }

    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl SnapshotSlot for MemorySlot {
    type Error = Infallible;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.value.borrow().clone())
    }

    fn write(&self, value: &str) -> Result<(), Self::Error> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        self.value.borrow_mut().take();
        Ok(())
    }
}
