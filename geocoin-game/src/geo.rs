//! Grid cells, geographic points, and the mapping between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_CELL_DEGREES, EARTH_RADIUS_M};
use crate::numbers::round_f64_to_i32;

/// Integer cell on the world grid. `i` runs along latitude, `j` along longitude.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridCell {
    pub i: i32,
    pub j: i32,
}

impl GridCell {
    #[must_use]
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Cell shifted by a delta, saturating at the grid bounds.
    #[must_use]
    pub const fn offset(self, di: i32, dj: i32) -> Self {
        Self {
            i: self.i.saturating_add(di),
            j: self.j.saturating_add(dj),
        }
    }

    /// Neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (di, dj) = direction.delta();
        self.offset(di, dj)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.i, self.j)
    }
}

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Null Island, the default origin of the grid.
    pub const NULL_ISLAND: Self = Self { lat: 0.0, lng: 0.0 };

    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in meters (haversine).
    #[must_use]
    pub fn distance_meters(self, other: Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Cardinal movement on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// `(di, dj)` for one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (1, 0),
            Self::South => (-1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    /// Parse a compass token such as `n`, `north`, or `N`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// Converts between grid cells and geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping {
    origin: GeoPoint,
    cell_degrees: f64,
}

impl Default for GridMapping {
    fn default() -> Self {
        Self::new(GeoPoint::NULL_ISLAND, DEFAULT_CELL_DEGREES)
    }
}

impl GridMapping {
    /// `cell_degrees` must be positive and finite; [`crate::WorldConfig::validate`]
    /// enforces this before a mapping is built from configuration.
    #[must_use]
    pub const fn new(origin: GeoPoint, cell_degrees: f64) -> Self {
        Self {
            origin,
            cell_degrees,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> GeoPoint {
        self.origin
    }

    #[must_use]
    pub const fn cell_degrees(&self) -> f64 {
        self.cell_degrees
    }

    /// South-west corner of `cell`.
    #[must_use]
    pub fn to_geo(&self, cell: GridCell) -> GeoPoint {
        GeoPoint {
            lat: f64::from(cell.i).mul_add(self.cell_degrees, self.origin.lat),
            lng: f64::from(cell.j).mul_add(self.cell_degrees, self.origin.lng),
        }
    }

    /// Nearest cell to `point`.
    #[must_use]
    pub fn to_grid(&self, point: GeoPoint) -> GridCell {
        GridCell {
            i: round_f64_to_i32((point.lat - self.origin.lat) / self.cell_degrees),
            j: round_f64_to_i32((point.lng - self.origin.lng) / self.cell_degrees),
        }
    }
}
