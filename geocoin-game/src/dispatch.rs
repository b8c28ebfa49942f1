//! Action dispatch: every UI event funnels through one synchronous table.

use std::collections::VecDeque;

use crate::economy::{CollectOutcome, DepositReceipt};
use crate::error::GameError;
use crate::geo::{Direction, GeoPoint, GridCell};
use crate::persistence::SnapshotSlot;
use crate::session::GeocacheSession;

/// A request from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Move(Direction),
    MoveTo(GeoPoint),
    Collect(GridCell),
    Deposit(GridCell),
    Save,
    Restore,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Moved {
        position: GeoPoint,
        spawned: Vec<GridCell>,
    },
    Collected(CollectOutcome),
    Deposited(DepositReceipt),
    Saved,
    Restored {
        points: u64,
    },
    Reset,
}

impl ActionOutcome {
    /// One-line description for status panels and logs.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Moved { position, spawned } => match spawned.len() {
                0 => format!("Moved to {position}"),
                n => format!("Moved to {position}; {n} new caches nearby"),
            },
            Self::Collected(CollectOutcome::Collected { cell, coins }) => {
                format!("Collected {coins} coins at {cell}")
            }
            Self::Collected(CollectOutcome::AlreadyEmptied { cell }) => {
                format!("The cache at {cell} is already empty")
            }
            Self::Deposited(receipt) => format!(
                "Deposited {} coins at {}; it now holds {}",
                receipt.amount, receipt.cell, receipt.coins_to_collect
            ),
            Self::Saved => "Game saved".to_string(),
            Self::Restored { points } => format!("Restored saved game with {points} points"),
            Self::Reset => "Game reset".to_string(),
        }
    }
}

impl<S: SnapshotSlot> GeocacheSession<S> {
    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Propagates economy and persistence failures; the state is unchanged
    /// when an error is returned.
    pub fn dispatch(&mut self, action: Action) -> Result<ActionOutcome, GameError> {
        log::debug!("dispatch {action:?}");
        match action {
            Action::Move(direction) => {
                let spawned = self.move_player(direction);
                Ok(ActionOutcome::Moved {
                    position: self.player(),
                    spawned,
                })
            }
            Action::MoveTo(position) => {
                let spawned = self.move_to(position);
                Ok(ActionOutcome::Moved { position, spawned })
            }
            Action::Collect(cell) => self.collect(cell).map(ActionOutcome::Collected),
            Action::Deposit(cell) => self.deposit(cell).map(ActionOutcome::Deposited),
            Action::Save => self.save().map(|()| ActionOutcome::Saved),
            Action::Restore => {
                self.restore();
                Ok(ActionOutcome::Restored {
                    points: self.points(),
                })
            }
            Action::Reset => self.reset().map(|()| ActionOutcome::Reset),
        }
    }
}

/// FIFO of pending actions. Handlers enqueue; one owner drains in order.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    pending: VecDeque<Action>,
}

impl ActionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every queued action to `session`, oldest first.
    pub fn drain<S: SnapshotSlot>(
        &mut self,
        session: &mut GeocacheSession<S>,
    ) -> Vec<(Action, Result<ActionOutcome, GameError>)> {
        let mut results = Vec::with_capacity(self.pending.len());
        while let Some(action) = self.pending.pop_front() {
            results.push((action, session.dispatch(action)));
        }
        results
    }
}

impl Extend<Action> for ActionQueue {
    fn extend<T: IntoIterator<Item = Action>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
