//! Seeded random play used by the logic scenarios.

use geocoin_game::{Action, Direction, GeocacheSession, SnapshotSlot};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Pick a plausible next action: mostly moves, some collects and deposits on
/// visible caches, the occasional save.
pub fn random_action<S: SnapshotSlot>(
    session: &GeocacheSession<S>,
    rng: &mut ChaCha20Rng,
) -> Action {
    let roll = rng.gen_range(0..10);
    let visible = session.visible_caches();
    if roll < 5 || visible.is_empty() {
        return Action::Move(Direction::ALL[rng.gen_range(0..Direction::ALL.len())]);
    }
    let cell = visible[rng.gen_range(0..visible.len())].cell;
    match roll {
        5..=6 => Action::Collect(cell),
        7..=8 => Action::Deposit(cell),
        _ => Action::Save,
    }
}

/// Direction sequence for a walk of `steps` moves.
pub fn random_path(rng: &mut ChaCha20Rng, steps: usize) -> Vec<Direction> {
    (0..steps)
        .map(|_| Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocoin_game::{MemorySlot, WorldConfig};
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_path() {
        let a = random_path(&mut ChaCha20Rng::seed_from_u64(9), 32);
        let b = random_path(&mut ChaCha20Rng::seed_from_u64(9), 32);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn actions_target_visible_caches() {
        let session = GeocacheSession::start(WorldConfig::default(), MemorySlot::default()).unwrap();
        let visible: Vec<_> = session.visible_caches().iter().map(|v| v.cell).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..200 {
            match random_action(&session, &mut rng) {
                Action::Collect(cell) | Action::Deposit(cell) => assert!(visible.contains(&cell)),
                Action::Move(_) | Action::Save => {}
                other => panic!("unexpected action {other:?}"),
            }
        }
    }
}
