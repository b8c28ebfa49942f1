//! World configuration: grid geometry, spawn odds, and visibility.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_CELL_DEGREES, DEFAULT_MAX_COINS_PER_CACHE, DEFAULT_MAX_VISIBLE_DISTANCE_M,
    DEFAULT_NEIGHBORHOOD_RADIUS, DEFAULT_SPAWN_PROBABILITY, MAX_NEIGHBORHOOD_RADIUS,
};
use crate::geo::{GeoPoint, GridMapping};

/// Which cells around the player count as the neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodShape {
    /// Every cell with `|di| <= r` and `|dj| <= r`.
    #[default]
    Square,
    /// Every cell with `di² + dj² <= r²`.
    Radius,
}

/// Errors raised when world configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum WorldConfigError {
    #[error("cell size must be a positive finite number of degrees (got {0})")]
    CellSize(f64),
    #[error("spawn probability must be between 0 and 1 (got {0})")]
    SpawnProbability(f64),
    #[error("neighborhood radius must be at most {} cells (got {})", MAX_NEIGHBORHOOD_RADIUS, .0)]
    Radius(u32),
    #[error("max coins per cache must be at least 1")]
    MaxCoins,
    #[error("visible distance must be a non-negative finite number of meters (got {0})")]
    VisibleDistance(f64),
    #[error("origin must be finite (got {0})")]
    Origin(GeoPoint),
    #[error("invalid world config JSON: {0}")]
    Json(String),
}

/// Tunables for world generation and the economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "WorldConfig::default_origin")]
    pub origin: GeoPoint,
    #[serde(default = "WorldConfig::default_cell_degrees")]
    pub cell_degrees: f64,
    #[serde(default = "WorldConfig::default_neighborhood_radius")]
    pub neighborhood_radius: u32,
    #[serde(default)]
    pub neighborhood_shape: NeighborhoodShape,
    #[serde(default = "WorldConfig::default_spawn_probability")]
    pub spawn_probability: f64,
    #[serde(default = "WorldConfig::default_max_coins_per_cache")]
    pub max_coins_per_cache: u32,
    /// Caches farther than this from the player are not shown.
    #[serde(default = "WorldConfig::default_max_visible_distance_m")]
    pub max_visible_distance_m: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            origin: Self::default_origin(),
            cell_degrees: Self::default_cell_degrees(),
            neighborhood_radius: Self::default_neighborhood_radius(),
            neighborhood_shape: NeighborhoodShape::default(),
            spawn_probability: Self::default_spawn_probability(),
            max_coins_per_cache: Self::default_max_coins_per_cache(),
            max_visible_distance_m: Self::default_max_visible_distance_m(),
        }
    }
}

impl WorldConfig {
    const fn default_origin() -> GeoPoint {
        GeoPoint::NULL_ISLAND
    }

    const fn default_cell_degrees() -> f64 {
        DEFAULT_CELL_DEGREES
    }

    const fn default_neighborhood_radius() -> u32 {
        DEFAULT_NEIGHBORHOOD_RADIUS
    }

    const fn default_spawn_probability() -> f64 {
        DEFAULT_SPAWN_PROBABILITY
    }

    const fn default_max_coins_per_cache() -> u32 {
        DEFAULT_MAX_COINS_PER_CACHE
    }

    const fn default_max_visible_distance_m() -> f64 {
        DEFAULT_MAX_VISIBLE_DISTANCE_M
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, WorldConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| WorldConfigError::Json(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), WorldConfigError> {
        if !self.origin.lat.is_finite() || !self.origin.lng.is_finite() {
            return Err(WorldConfigError::Origin(self.origin));
        }
        if !self.cell_degrees.is_finite() || self.cell_degrees <= 0.0 {
            return Err(WorldConfigError::CellSize(self.cell_degrees));
        }
        if self.neighborhood_radius > MAX_NEIGHBORHOOD_RADIUS {
            return Err(WorldConfigError::Radius(self.neighborhood_radius));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(WorldConfigError::SpawnProbability(self.spawn_probability));
        }
        if self.max_coins_per_cache == 0 {
            return Err(WorldConfigError::MaxCoins);
        }
        if !self.max_visible_distance_m.is_finite() || self.max_visible_distance_m < 0.0 {
            return Err(WorldConfigError::VisibleDistance(
                self.max_visible_distance_m,
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn mapping(&self) -> GridMapping {
        GridMapping::new(self.origin, self.cell_degrees)
    }
}
