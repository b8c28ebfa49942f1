//! Geocoin Game Engine
//!
//! Platform-agnostic core of the Geocoin location game: a deterministic grid
//! of coin caches around the player, a points economy, and a single-slot save.
//! This crate carries no UI or storage backend; front ends supply a
//! [`SnapshotSlot`] and a [`Presenter`].

pub mod cache;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod economy;
pub mod error;
pub mod geo;
pub mod luck;
pub mod numbers;
pub mod persistence;
pub mod presenter;
pub mod session;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use cache::{Cache, CacheState, CacheView};
pub use config::{NeighborhoodShape, WorldConfig, WorldConfigError};
pub use dispatch::{Action, ActionOutcome, ActionQueue};
pub use economy::{CollectOutcome, DepositReceipt, EconomyError};
pub use error::GameError;
pub use geo::{Direction, GeoPoint, GridCell, GridMapping};
pub use luck::luck;
pub use persistence::{MemorySlot, PersistedSnapshot, PersistenceError, SnapshotSlot};
pub use presenter::{CacheRenderer, Presenter, SyncReport};
pub use session::GeocacheSession;
pub use state::GameState;
pub use world::WorldGenerator;
