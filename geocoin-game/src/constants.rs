//! Centralized tuning constants for Geocoin game logic.
//!
//! These are the defaults behind [`crate::config::WorldConfig`]. The hash salts
//! are part of the world's identity: changing any of them reshuffles every
//! spawn decision and coin count.

// World geometry -----------------------------------------------------------
pub const DEFAULT_CELL_DEGREES: f64 = 0.0001;
pub const DEFAULT_NEIGHBORHOOD_RADIUS: u32 = 8;
pub const MAX_NEIGHBORHOOD_RADIUS: u32 = 1024;
pub const DEFAULT_MAX_VISIBLE_DISTANCE_M: f64 = 100.0;
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Spawning and economy -----------------------------------------------------
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.1;
pub const DEFAULT_MAX_COINS_PER_CACHE: u32 = 10;

// Luck salts ---------------------------------------------------------------
pub(crate) const SALT_SPAWN: &str = "spawn-salt";
pub(crate) const SALT_INITIAL_COINS: &str = "initial-coins";
pub(crate) const SALT_DEPOSIT: &str = "deposit-salt";

// Persistence --------------------------------------------------------------
pub const SNAPSHOT_KEY: &str = "gameState";
