use crate::cache::CacheView;
use crate::config::WorldConfig;
use crate::economy::{self, CollectOutcome, DepositReceipt};
use crate::error::GameError;
use crate::geo::{Direction, GeoPoint, GridCell, GridMapping};
use crate::persistence::{self, PersistedSnapshot, SnapshotSlot};
use crate::state::GameState;
use crate::world::WorldGenerator;

/// Single owner of the game: state, world rules, and the save slot.
#[derive(Debug, Clone)]
pub struct GeocacheSession<S: SnapshotSlot> {
    config: WorldConfig,
    mapping: GridMapping,
    generator: WorldGenerator,
    state: GameState,
    slot: S,
    coin_supply: u64,
}

impl<S: SnapshotSlot> GeocacheSession<S> {
    /// Load the saved snapshot (or start fresh), put the player at the
    /// origin and spawn the surrounding caches.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn start(config: WorldConfig, slot: S) -> Result<Self, GameError> {
        config.validate()?;
        let snapshot = persistence::load(&slot);
        let mapping = config.mapping();
        let generator = WorldGenerator::new(&config);
        let state = GameState::from_snapshot(&snapshot, mapping.origin());
        let mut session = Self {
            config,
            mapping,
            generator,
            state,
            slot,
            coin_supply: 0,
        };
        session.recount_supply();
        session.regenerate();
        log::info!(
            "session started with {} points and {} caches",
            session.state.points,
            session.state.cache_count()
        );
        Ok(session)
    }

    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub const fn mapping(&self) -> &GridMapping {
        &self.mapping
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    #[must_use]
    pub const fn points(&self) -> u64 {
        self.state.points
    }

    #[must_use]
    pub const fn player(&self) -> GeoPoint {
        self.state.player()
    }

    #[must_use]
    pub fn player_cell(&self) -> GridCell {
        self.mapping.to_grid(self.state.player())
    }

    #[must_use]
    pub fn history(&self) -> &[GeoPoint] {
        self.state.history()
    }

    /// Coins that entered the world this session: the loaded snapshot plus
    /// every spawn since. Collect and deposit only move coins around, so
    /// `points + live coins` always equals this.
    #[must_use]
    pub const fn coin_supply(&self) -> u64 {
        self.coin_supply
    }

    /// Step one cell. Returns the cells that spawned a cache on arrival.
    pub fn move_player(&mut self, direction: Direction) -> Vec<GridCell> {
        let (di, dj) = direction.delta();
        let here = self.state.player();
        let step = self.mapping.cell_degrees();
        let next = GeoPoint::new(
            f64::from(di).mul_add(step, here.lat),
            f64::from(dj).mul_add(step, here.lng),
        );
        log::debug!("player moves {} to {next}", direction.label());
        self.move_to(next)
    }

    /// Jump to an arbitrary position, e.g. a geolocation fix.
    pub fn move_to(&mut self, position: GeoPoint) -> Vec<GridCell> {
        self.state.set_player(position);
        self.regenerate()
    }

    /// Spawn caches around the player's current cell.
    pub fn regenerate(&mut self) -> Vec<GridCell> {
        let player_cell = self.player_cell();
        let spawned = self.generator.populate(&mut self.state, player_cell);
        for cell in &spawned {
            if let Some(cache) = self.state.cache(*cell) {
                self.coin_supply += u64::from(cache.coins_to_collect);
            }
        }
        spawned
    }

    /// Collect the cache at `cell` and save.
    ///
    /// A failed save is logged and does not undo the collect.
    ///
    /// # Errors
    ///
    /// Returns an error if no cache ever existed at `cell`.
    pub fn collect(&mut self, cell: GridCell) -> Result<CollectOutcome, GameError> {
        let outcome = economy::collect(&mut self.state, cell)?;
        if matches!(outcome, CollectOutcome::Collected { .. })
            && let Err(err) = self.save()
        {
            log::warn!("collect at {cell} not saved: {err}");
        }
        Ok(outcome)
    }

    /// Deposit into the cache at `cell`.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot afford it or the cache is gone.
    pub fn deposit(&mut self, cell: GridCell) -> Result<DepositReceipt, GameError> {
        Ok(economy::deposit(
            &mut self.state,
            cell,
            self.config.max_coins_per_cache,
        )?)
    }

    /// What the next deposit at `cell` would cost, if a live cache is there.
    #[must_use]
    pub fn deposit_quote(&self, cell: GridCell) -> Option<u32> {
        self.state
            .cache(cell)
            .map(|cache| economy::deposit_amount(cache, self.config.max_coins_per_cache))
    }

    #[must_use]
    pub fn snapshot(&self) -> PersistedSnapshot {
        self.state.to_snapshot()
    }

    /// Write the current snapshot to the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    pub fn save(&mut self) -> Result<(), GameError> {
        persistence::save(&self.slot, &self.state.to_snapshot())?;
        Ok(())
    }

    /// Reload points and caches from the slot, keeping the player where
    /// they are, then respawn the neighbourhood.
    pub fn restore(&mut self) {
        let snapshot = persistence::load(&self.slot);
        self.state.restore_from(&snapshot);
        self.recount_supply();
        self.regenerate();
        log::info!("restored {} points", self.state.points);
    }

    /// Clear the slot and start over at the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be cleared.
    pub fn reset(&mut self) -> Result<(), GameError> {
        persistence::reset(&self.slot)?;
        self.state = GameState::new(self.mapping.origin());
        self.coin_supply = 0;
        self.regenerate();
        log::info!("game reset");
        Ok(())
    }

    /// Live caches within sight of the player, in ascending cell order.
    #[must_use]
    pub fn visible_caches(&self) -> Vec<CacheView> {
        let player = self.state.player();
        self.state
            .caches()
            .map(|cache| CacheView::new(cache, &self.mapping))
            .filter(|view| player.distance_meters(view.position) <= self.config.max_visible_distance_m)
            .collect()
    }

    fn recount_supply(&mut self) {
        self.coin_supply = self.state.points + self.state.live_coins();
    }
}
