//! Deterministic cache spawning around the player.
//!
//! Spawn decisions are keyed on absolute cell coordinates, so a given cell
//! either always hosts a cache or never does, no matter which path the player
//! took to reach it.

use std::collections::BTreeSet;

use crate::cache::Cache;
use crate::config::{NeighborhoodShape, WorldConfig};
use crate::constants::{SALT_INITIAL_COINS, SALT_SPAWN};
use crate::geo::GridCell;
use crate::luck::{cell_luck, scaled};
use crate::state::GameState;

#[derive(Debug, Clone, PartialEq)]
pub struct WorldGenerator {
    radius: i32,
    shape: NeighborhoodShape,
    spawn_probability: f64,
    max_coins_per_cache: u32,
}

impl WorldGenerator {
    #[must_use]
    pub fn new(cfg: &WorldConfig) -> Self {
        Self {
            radius: i32::try_from(cfg.neighborhood_radius).unwrap_or(i32::MAX),
            shape: cfg.neighborhood_shape,
            spawn_probability: cfg.spawn_probability,
            max_coins_per_cache: cfg.max_coins_per_cache,
        }
    }

    /// Cells in the neighbourhood of `center`, row by row.
    #[must_use]
    pub fn candidate_cells(&self, center: GridCell) -> Vec<GridCell> {
        let r = self.radius;
        let r_sq = i64::from(r) * i64::from(r);
        let mut cells = Vec::new();
        for di in -r..=r {
            for dj in -r..=r {
                let inside = match self.shape {
                    NeighborhoodShape::Square => true,
                    NeighborhoodShape::Radius => {
                        i64::from(di) * i64::from(di) + i64::from(dj) * i64::from(dj) <= r_sq
                    }
                };
                if inside {
                    cells.push(center.offset(di, dj));
                }
            }
        }
        cells
    }

    #[must_use]
    pub fn spawns_at(&self, cell: GridCell) -> bool {
        cell_luck(cell, SALT_SPAWN) < self.spawn_probability
    }

    #[must_use]
    pub fn initial_coins(&self, cell: GridCell) -> u32 {
        scaled(cell_luck(cell, SALT_INITIAL_COINS), self.max_coins_per_cache)
    }

    /// Every cell around `center` that hosts a cache, ignoring game state.
    #[must_use]
    pub fn spawn_set(&self, center: GridCell) -> BTreeSet<GridCell> {
        self.candidate_cells(center)
            .into_iter()
            .filter(|cell| self.spawns_at(*cell))
            .collect()
    }

    /// Spawn caches around `center` into `state`.
    ///
    /// Cells that already host a live cache, or were emptied this session,
    /// are left alone. Returns the newly spawned cells in ascending order.
    pub fn populate(&self, state: &mut GameState, center: GridCell) -> Vec<GridCell> {
        let mut spawned = Vec::new();
        for cell in self.spawn_set(center) {
            if state.is_occupied(cell) {
                continue;
            }
            let coins = self.initial_coins(cell);
            if state.insert_spawned(Cache::spawned(cell, coins)) {
                log::debug!("spawned cache at {cell} with {coins} coins");
                spawned.push(cell);
            }
        }
        spawned
    }
}
