//! Collect and deposit: the only ways points change hands.

use thiserror::Error;

use crate::cache::Cache;
use crate::constants::SALT_DEPOSIT;
use crate::geo::GridCell;
use crate::luck::{luck, scaled};
use crate::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("not enough points to deposit at {cell}: need {needed}, have {available}")]
    InsufficientFunds {
        cell: GridCell,
        needed: u32,
        available: u64,
    },
    #[error("no cache at {0}")]
    NoCache(GridCell),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// Coins moved into the player's points and the cache was emptied.
    Collected { cell: GridCell, coins: u32 },
    /// The cache was already emptied this session; nothing changed.
    AlreadyEmptied { cell: GridCell },
}

impl CollectOutcome {
    #[must_use]
    pub const fn coins(self) -> u32 {
        match self {
            Self::Collected { coins, .. } => coins,
            Self::AlreadyEmptied { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositReceipt {
    pub cell: GridCell,
    pub amount: u32,
    pub coins_to_collect: u32,
    pub coin_serial: u32,
}

/// Coins a deposit into `cache` would cost, keyed on its current serial.
#[must_use]
pub fn deposit_amount(cache: &Cache, max_coins_per_cache: u32) -> u32 {
    let cell = cache.cell();
    let key = format!("{}:{}:{SALT_DEPOSIT}:{}", cell.i, cell.j, cache.coin_serial);
    scaled(luck(&key), max_coins_per_cache)
}

/// Move every coin in the cache at `cell` into the player's points.
///
/// # Errors
///
/// Returns [`EconomyError::NoCache`] when the cell never held a cache.
pub fn collect(state: &mut GameState, cell: GridCell) -> Result<CollectOutcome, EconomyError> {
    if state.is_emptied(cell) {
        return Ok(CollectOutcome::AlreadyEmptied { cell });
    }
    let cache = state.empty_cache(cell).ok_or(EconomyError::NoCache(cell))?;
    let coins = cache.coins_to_collect;
    state.points = state.points.saturating_add(u64::from(coins));
    log::info!("collected {coins} coins at {cell}; points now {}", state.points);
    Ok(CollectOutcome::Collected { cell, coins })
}

/// Pay points into the cache at `cell`.
///
/// # Errors
///
/// Returns [`EconomyError::InsufficientFunds`] without changing anything when
/// the player cannot cover the deposit, or [`EconomyError::NoCache`] when the
/// cell holds no live cache.
pub fn deposit(
    state: &mut GameState,
    cell: GridCell,
    max_coins_per_cache: u32,
) -> Result<DepositReceipt, EconomyError> {
    let available = state.points;
    let cache = state.cache_mut(cell).ok_or(EconomyError::NoCache(cell))?;
    let amount = deposit_amount(cache, max_coins_per_cache);
    if available < u64::from(amount) {
        return Err(EconomyError::InsufficientFunds {
            cell,
            needed: amount,
            available,
        });
    }
    cache.coins_to_collect = cache.coins_to_collect.saturating_add(amount);
    cache.coin_serial = cache.coin_serial.saturating_add(1);
    let receipt = DepositReceipt {
        cell,
        amount,
        coins_to_collect: cache.coins_to_collect,
        coin_serial: cache.coin_serial,
    };
    state.points = available - u64::from(amount);
    log::info!("deposited {amount} coins at {cell}; points now {}", state.points);
    Ok(receipt)
}
