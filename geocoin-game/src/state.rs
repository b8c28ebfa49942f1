use std::collections::{BTreeMap, BTreeSet};

use crate::cache::{Cache, CacheState};
use crate::geo::{GeoPoint, GridCell};
use crate::persistence::PersistedSnapshot;

/// Everything the game knows about the player and the caches around them.
///
/// Only `points` and the live caches survive a save; the emptied set, player
/// position and movement history live for one session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    pub points: u64,
    caches: BTreeMap<GridCell, Cache>,
    emptied: BTreeSet<GridCell>,
    player: GeoPoint,
    history: Vec<GeoPoint>,
}

impl GameState {
    /// Fresh state with the player standing at `player`.
    #[must_use]
    pub fn new(player: GeoPoint) -> Self {
        Self {
            player,
            history: vec![player],
            ..Self::default()
        }
    }

    /// Rebuild the persisted part of the state from a snapshot.
    ///
    /// Later entries for the same cell replace earlier ones.
    #[must_use]
    pub fn from_snapshot(snapshot: &PersistedSnapshot, player: GeoPoint) -> Self {
        let mut state = Self::new(player);
        state.restore_from(snapshot);
        state
    }

    /// Swap in the persisted part of a snapshot, keeping the player, the
    /// movement trail and the cells emptied this session.
    pub fn restore_from(&mut self, snapshot: &PersistedSnapshot) {
        self.points = snapshot.points;
        self.caches = snapshot
            .cache_states
            .iter()
            .filter(|record| !self.emptied.contains(&record.cell()))
            .map(|record| (record.cell(), Cache::from(*record)))
            .collect();
    }

    #[must_use]
    pub fn to_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            points: self.points,
            cache_states: self.caches.values().map(Cache::to_state).collect(),
        }
    }

    #[must_use]
    pub fn cache(&self, cell: GridCell) -> Option<&Cache> {
        self.caches.get(&cell)
    }

    pub(crate) fn cache_mut(&mut self, cell: GridCell) -> Option<&mut Cache> {
        self.caches.get_mut(&cell)
    }

    /// Live caches in ascending cell order.
    pub fn caches(&self) -> impl Iterator<Item = &Cache> {
        self.caches.values()
    }

    #[must_use]
    pub fn cache_count(&self) -> usize {
        self.caches.len()
    }

    #[must_use]
    pub fn cache_states(&self) -> Vec<CacheState> {
        self.caches.values().map(Cache::to_state).collect()
    }

    /// Whether `cell` was emptied earlier in this session.
    #[must_use]
    pub fn is_emptied(&self, cell: GridCell) -> bool {
        self.emptied.contains(&cell)
    }

    /// A cell is occupied while it hosts a live cache or was emptied this
    /// session; generation never touches occupied cells.
    #[must_use]
    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.caches.contains_key(&cell) || self.emptied.contains(&cell)
    }

    /// Insert a freshly spawned cache. Returns `false` and leaves the state
    /// untouched if the cell is occupied.
    pub(crate) fn insert_spawned(&mut self, cache: Cache) -> bool {
        if self.is_occupied(cache.cell()) {
            return false;
        }
        self.caches.insert(cache.cell(), cache);
        true
    }

    /// Remove a live cache and remember the cell as emptied.
    pub(crate) fn empty_cache(&mut self, cell: GridCell) -> Option<Cache> {
        let cache = self.caches.remove(&cell)?;
        self.emptied.insert(cell);
        Some(cache)
    }

    /// Total coins still waiting in live caches.
    #[must_use]
    pub fn live_coins(&self) -> u64 {
        self.caches
            .values()
            .map(|cache| u64::from(cache.coins_to_collect))
            .sum()
    }

    #[must_use]
    pub const fn player(&self) -> GeoPoint {
        self.player
    }

    /// Move the player and extend the movement trail.
    pub fn set_player(&mut self, position: GeoPoint) {
        self.player = position;
        self.history.push(position);
    }

    #[must_use]
    pub fn history(&self) -> &[GeoPoint] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(states: Vec<CacheState>) -> PersistedSnapshot {
        PersistedSnapshot {
            points: 9,
            cache_states: states,
        }
    }

    #[test]
    fn snapshot_roundtrip_keeps_caches() {
        let snap = snapshot_with(vec![
            CacheState {
                i: 3,
                j: -2,
                coins_to_collect: 5,
                coin_serial: 1,
            },
            CacheState {
                i: -1,
                j: 4,
                coins_to_collect: 0,
                coin_serial: 0,
            },
        ]);
        let state = GameState::from_snapshot(&snap, GeoPoint::NULL_ISLAND);
        assert_eq!(state.points, 9);
        assert_eq!(state.cache_count(), 2);
        let back = state.to_snapshot();
        assert_eq!(back.points, 9);
        assert_eq!(back.cache_states.len(), 2);
        assert!(back.cache_states.contains(&snap.cache_states[0]));
    }

    #[test]
    fn duplicate_cells_keep_the_last_record() {
        let snap = snapshot_with(vec![
            CacheState {
                i: 1,
                j: 1,
                coins_to_collect: 2,
                coin_serial: 0,
            },
            CacheState {
                i: 1,
                j: 1,
                coins_to_collect: 8,
                coin_serial: 3,
            },
        ]);
        let state = GameState::from_snapshot(&snap, GeoPoint::NULL_ISLAND);
        assert_eq!(state.cache_count(), 1);
        let cache = state.cache(GridCell::new(1, 1)).unwrap();
        assert_eq!(cache.coins_to_collect, 8);
        assert_eq!(cache.coin_serial, 3);
    }

    #[test]
    fn occupied_cells_refuse_spawns() {
        let mut state = GameState::new(GeoPoint::NULL_ISLAND);
        let cell = GridCell::new(0, 2);
        assert!(state.insert_spawned(Cache::spawned(cell, 4)));
        assert!(!state.insert_spawned(Cache::spawned(cell, 9)));
        assert_eq!(state.cache(cell).unwrap().coins_to_collect, 4);

        state.empty_cache(cell);
        assert!(state.is_emptied(cell));
        assert!(!state.insert_spawned(Cache::spawned(cell, 1)));
        assert!(state.cache(cell).is_none());
    }

    #[test]
    fn player_moves_extend_history() {
        let mut state = GameState::new(GeoPoint::NULL_ISLAND);
        state.set_player(GeoPoint::new(0.0001, 0.0));
        state.set_player(GeoPoint::new(0.0002, 0.0));
        assert_eq!(state.history().len(), 3);
        assert_eq!(state.player(), GeoPoint::new(0.0002, 0.0));
    }
}
