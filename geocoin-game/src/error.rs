use thiserror::Error;

use crate::config::WorldConfigError;
use crate::economy::EconomyError;
use crate::persistence::PersistenceError;

/// Every failure a session operation can report.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Economy(#[from] EconomyError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Config(#[from] WorldConfigError),
}

impl GameError {
    /// Short message suitable for showing to the player.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Economy(EconomyError::InsufficientFunds { needed, available, .. }) => {
                format!("Not enough points to deposit! Need {needed}, have {available}.")
            }
            Self::Economy(EconomyError::NoCache(cell)) => format!("There is no cache at {cell}."),
            Self::Persistence(_) => "Could not update your saved game.".to_string(),
            Self::Config(err) => format!("World settings are invalid: {err}"),
        }
    }

    #[must_use]
    pub const fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            Self::Economy(EconomyError::InsufficientFunds { .. })
        )
    }
}
