//! Cache entities and their persisted records.

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, GridCell, GridMapping};

/// A live cache holding coins at one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cache {
    cell: GridCell,
    pub coins_to_collect: u32,
    /// Version of the cache's coin batch; bumped on every deposit.
    pub coin_serial: u32,
}

impl Cache {
    #[must_use]
    pub const fn spawned(cell: GridCell, coins_to_collect: u32) -> Self {
        Self {
            cell,
            coins_to_collect,
            coin_serial: 0,
        }
    }

    #[must_use]
    pub const fn cell(&self) -> GridCell {
        self.cell
    }

    /// Compact coin identity, e.g. `3:-2#1`.
    #[must_use]
    pub fn coin_identity(&self) -> String {
        format!("{}#{}", self.cell, self.coin_serial)
    }

    #[must_use]
    pub const fn to_state(&self) -> CacheState {
        CacheState {
            i: self.cell.i,
            j: self.cell.j,
            coins_to_collect: self.coins_to_collect,
            coin_serial: self.coin_serial,
        }
    }
}

impl From<CacheState> for Cache {
    fn from(state: CacheState) -> Self {
        Self {
            cell: GridCell::new(state.i, state.j),
            coins_to_collect: state.coins_to_collect,
            coin_serial: state.coin_serial,
        }
    }
}

/// Persisted form of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheState {
    pub i: i32,
    pub j: i32,
    pub coins_to_collect: u32,
    pub coin_serial: u32,
}

impl CacheState {
    #[must_use]
    pub const fn cell(&self) -> GridCell {
        GridCell::new(self.i, self.j)
    }
}

/// Read-only projection handed to presenters.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheView {
    pub cell: GridCell,
    pub position: GeoPoint,
    pub coins_to_collect: u32,
    pub coin_serial: u32,
    pub coin_identity: String,
}

impl CacheView {
    #[must_use]
    pub fn new(cache: &Cache, mapping: &GridMapping) -> Self {
        Self {
            cell: cache.cell,
            position: mapping.to_geo(cache.cell),
            coins_to_collect: cache.coins_to_collect,
            coin_serial: cache.coin_serial,
            coin_identity: cache.coin_identity(),
        }
    }
}
