//! Deterministic luck: stable pseudo-random values derived from string keys.

use std::hash::Hasher;

use twox_hash::XxHash64;

use crate::geo::GridCell;
use crate::numbers::floor_below;

const MANTISSA_BITS: u32 = 53;

/// Map `key` to a value in `[0, 1)`.
///
/// The same key always yields the same value, within a run and across runs.
/// No time or session entropy is mixed in.
#[must_use]
pub fn luck(key: &str) -> f64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(key.as_bytes());
    let bits = hasher.finish() >> (64 - MANTISSA_BITS);
    #[allow(clippy::cast_precision_loss)] // 53 bits fit an f64 mantissa exactly
    let numerator = bits as f64;
    numerator / (1_u64 << MANTISSA_BITS) as f64
}

/// Luck for a grid cell under a salt, keyed as `"{i}:{j}:{salt}"`.
#[must_use]
pub fn cell_luck(cell: GridCell, salt: &str) -> f64 {
    luck(&format!("{}:{}:{salt}", cell.i, cell.j))
}

/// Scale a luck value onto `0..max` by flooring.
#[must_use]
pub fn scaled(value: f64, max: u32) -> u32 {
    floor_below(value * f64::from(max), max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luck_is_deterministic() {
        for key in ["", "0:0:spawn-salt", "3:-2:initial-coins", "ünïcødé"] {
            assert_eq!(luck(key).to_bits(), luck(key).to_bits());
        }
    }

    #[test]
    fn luck_stays_in_unit_interval() {
        for i in -50..50 {
            for j in -50..50 {
                let value = cell_luck(GridCell::new(i, j), "spawn-salt");
                assert!((0.0..1.0).contains(&value), "{i}:{j} -> {value}");
            }
        }
    }

    #[test]
    fn adjacent_cells_decorrelate() {
        let mut below_half = 0_u32;
        let mut total = 0_u32;
        for i in 0..40 {
            for j in 0..40 {
                total += 1;
                if cell_luck(GridCell::new(i, j), "spawn-salt") < 0.5 {
                    below_half += 1;
                }
            }
        }
        let ratio = f64::from(below_half) / f64::from(total);
        assert!((0.4..0.6).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn scaled_never_reaches_max() {
        assert_eq!(scaled(0.0, 10), 0);
        assert_eq!(scaled(0.999_999, 10), 9);
        assert_eq!(scaled(0.55, 10), 5);
        assert_eq!(scaled(0.5, 0), 0);
    }
}
