use anyhow::{Context, Result, anyhow, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::{BTreeMap, BTreeSet};

use geocoin_game::persistence;
use geocoin_game::{
    Action, ActionOutcome, CacheRenderer, CacheView, CollectOutcome, GeocacheSession, GridCell,
    MemorySlot, PersistedSnapshot, Presenter, WorldConfig,
};

use super::walk::{random_action, random_path};

/// Everything a scenario iteration needs.
pub struct ScenarioCtx<'a> {
    pub seed: u64,
    pub config: &'a WorldConfig,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    pub fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed)
    }

    pub fn session(&self, slot: MemorySlot) -> Result<GeocacheSession<MemorySlot>> {
        GeocacheSession::start(self.config.clone(), slot).context("session failed to start")
    }
}

pub type ScenarioFn = fn(&ScenarioCtx<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    run: ScenarioFn,
}

impl Scenario {
    /// Run one iteration.
    ///
    /// # Errors
    ///
    /// Returns the first violated expectation.
    pub fn run(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        (self.run)(ctx)
    }
}

const CATALOG: &[Scenario] = &[
    Scenario {
        key: "smoke",
        name: "Smoke",
        description: "Session starts at the origin with a consistent ledger",
        run: smoke,
    },
    Scenario {
        key: "deterministic-world",
        name: "Deterministic World",
        description: "Two sessions walking the same path see the same caches",
        run: deterministic_world,
    },
    Scenario {
        key: "economy",
        name: "Coin Economy",
        description: "Random play keeps points plus live coins equal to the supply",
        run: economy,
    },
    Scenario {
        key: "persistence",
        name: "Snapshot Persistence",
        description: "Saved games reload intact; damaged saves start fresh",
        run: persistence_roundtrip,
    },
    Scenario {
        key: "renderer-sync",
        name: "Renderer Sync",
        description: "Drawn markers always match the visible cache set",
        run: renderer_sync,
    },
];

#[must_use]
pub fn get_scenario(key: &str) -> Option<Scenario> {
    CATALOG.iter().find(|s| s.key == key).copied()
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.iter().map(|s| (s.key, s.description)).collect()
}

#[must_use]
pub fn scenario_keys() -> Vec<&'static str> {
    CATALOG.iter().map(|s| s.key).collect()
}

fn ledger_balanced(session: &GeocacheSession<MemorySlot>) -> Result<()> {
    let live = session.state().live_coins();
    ensure!(
        session.points() + live == session.coin_supply(),
        "ledger drifted: {} points + {live} live coins != supply {}",
        session.points(),
        session.coin_supply()
    );
    Ok(())
}

/// Dispatch one random action. Only an unaffordable deposit may fail.
fn play_step(session: &mut GeocacheSession<MemorySlot>, action: Action) -> Result<()> {
    match session.dispatch(action) {
        Ok(_) => Ok(()),
        Err(err) if err.is_insufficient_funds() => Ok(()),
        Err(err) => Err(err).context(format!("{action:?} failed")),
    }
}

fn smoke(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let session = ctx.session(MemorySlot::default())?;
    ensure!(
        session.player_cell() == GridCell::default(),
        "player should start on the origin cell, found {}",
        session.player_cell()
    );
    ensure!(session.points() == 0, "fresh session should have no points");
    ensure!(session.history().len() == 1, "history should hold the start position");
    for view in session.visible_caches() {
        ensure!(
            view.coins_to_collect < ctx.config.max_coins_per_cache,
            "cache {} spawned with {} coins",
            view.cell,
            view.coins_to_collect
        );
    }
    ledger_balanced(&session)
}

fn layout(session: &GeocacheSession<MemorySlot>) -> BTreeMap<GridCell, u32> {
    session
        .state()
        .caches()
        .map(|cache| (cache.cell(), cache.coins_to_collect))
        .collect()
}

fn deterministic_world(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let path = random_path(&mut ctx.rng(), 40);
    let mut first = ctx.session(MemorySlot::default())?;
    let mut second = ctx.session(MemorySlot::default())?;
    ensure!(layout(&first) == layout(&second), "opening layouts differ");
    for (step, direction) in path.iter().enumerate() {
        let a = first.move_player(*direction);
        let b = second.move_player(*direction);
        ensure!(a == b, "step {step}: spawned {a:?} vs {b:?}");
    }
    ensure!(layout(&first) == layout(&second), "layouts differ after walk");
    if ctx.verbose {
        println!(
            "     ↳ {} caches after {} steps",
            first.state().cache_count(),
            path.len()
        );
    }
    Ok(())
}

fn economy(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut rng = ctx.rng();
    let mut session = ctx.session(MemorySlot::default())?;
    for step in 0..300 {
        let action = random_action(&session, &mut rng);
        let before = session.points();
        match session.dispatch(action) {
            Ok(ActionOutcome::Collected(CollectOutcome::Collected { coins, .. })) => ensure!(
                session.points() == before + u64::from(coins),
                "step {step}: collect of {coins} moved points {before} -> {}",
                session.points()
            ),
            Ok(ActionOutcome::Collected(CollectOutcome::AlreadyEmptied { cell })) => {
                return Err(anyhow!("step {step}: visible cache {cell} reported as emptied"));
            }
            Ok(ActionOutcome::Deposited(receipt)) => ensure!(
                session.points() + u64::from(receipt.amount) == before,
                "step {step}: deposit of {} moved points {before} -> {}",
                receipt.amount,
                session.points()
            ),
            Ok(_) => {}
            Err(err) if err.is_insufficient_funds() => ensure!(
                session.points() == before,
                "step {step}: failed deposit changed points"
            ),
            Err(err) => return Err(err).context(format!("step {step}: {action:?}")),
        }
        ledger_balanced(&session).with_context(|| format!("after step {step}"))?;
    }
    Ok(())
}

fn persistence_roundtrip(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut rng = ctx.rng();
    let slot = MemorySlot::default();
    let mut session = ctx.session(slot.clone())?;
    for step in 0..60 {
        let action = random_action(&session, &mut rng);
        play_step(&mut session, action).with_context(|| format!("step {step}"))?;
    }
    session.save()?;
    let saved = session.snapshot();
    ensure!(
        persistence::load(&slot) == saved,
        "reloaded snapshot differs from the one written"
    );

    let reopened = ctx.session(slot.clone())?;
    ensure!(
        reopened.points() == saved.points,
        "restart restored {} points, expected {}",
        reopened.points(),
        saved.points
    );

    let text = slot
        .contents()
        .ok_or_else(|| anyhow!("slot empty after save"))?;
    let cut = rng.gen_range(1..text.len());
    let damaged = MemorySlot::with_contents(&text[..cut]);
    let recovered = persistence::load(&damaged);
    ensure!(
        recovered == PersistedSnapshot::default() || recovered == saved,
        "truncated save at {cut} produced a partial snapshot"
    );
    Ok(())
}

#[derive(Default)]
struct CountingPresenter {
    next: u64,
    live: BTreeMap<u64, GridCell>,
    points: u64,
}

impl Presenter for CountingPresenter {
    type Handle = u64;

    fn render_cache(&mut self, view: &CacheView) -> u64 {
        self.next += 1;
        self.live.insert(self.next, view.cell);
        self.next
    }

    fn remove_cache(&mut self, handle: u64) {
        self.live.remove(&handle);
    }

    fn show_points(&mut self, points: u64) {
        self.points = points;
    }

    fn notify(&mut self, _message: &str) {}
}

fn renderer_sync(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut rng = ctx.rng();
    let mut session = ctx.session(MemorySlot::default())?;
    let mut presenter = CountingPresenter::default();
    let mut renderer = CacheRenderer::new();
    for step in 0..150 {
        renderer.sync(&session, &mut presenter);
        let drawn: BTreeSet<GridCell> = presenter.live.values().copied().collect();
        let visible: BTreeSet<GridCell> =
            session.visible_caches().iter().map(|v| v.cell).collect();
        ensure!(
            drawn == visible,
            "step {step}: {} markers drawn, {} caches visible",
            drawn.len(),
            visible.len()
        );
        ensure!(presenter.points == session.points(), "step {step}: stale points");
        let action = random_action(&session, &mut rng);
        if matches!(action, Action::Save) {
            continue;
        }
        play_step(&mut session, action).with_context(|| format!("step {step}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_passes_on_default_world() {
        let config = WorldConfig::default();
        for scenario in CATALOG {
            for seed in [1, 1337] {
                let ctx = ScenarioCtx {
                    seed,
                    config: &config,
                    verbose: false,
                };
                scenario
                    .run(&ctx)
                    .unwrap_or_else(|err| panic!("{} seed {seed}: {err:#}", scenario.key));
            }
        }
    }

    #[test]
    fn unexpected_dispatch_errors_fail_the_step() {
        let config = WorldConfig::default();
        let ctx = ScenarioCtx {
            seed: 3,
            config: &config,
            verbose: false,
        };
        let mut session = ctx.session(MemorySlot::default()).unwrap();
        let far = GridCell::new(5_000, 5_000);
        let err = play_step(&mut session, Action::Collect(far)).unwrap_err();
        assert!(format!("{err:#}").contains("no cache"), "{err:#}");
        assert!(play_step(&mut session, Action::Move(geocoin_game::Direction::North)).is_ok());
    }

    #[test]
    fn lookup_by_key() {
        assert!(get_scenario("economy").is_some());
        assert!(get_scenario("nope").is_none());
        assert_eq!(list_scenarios().len(), scenario_keys().len());
    }
}
