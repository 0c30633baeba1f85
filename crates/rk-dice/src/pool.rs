//! Dice pools and the Ten Dice Rule.
//!
//! A [`DicePool`] is the raw `XkY+Z` request assembled from traits, skills
//! and rings. Before it can be rolled it goes through [`TenDiceRule`], which
//! caps rolled and kept dice at ten and folds the excess into the flat bonus.
//! The result is a [`NormalizedDicePool`], which only the rule can produce.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of dice that may be rolled or kept.
pub const MAX_DICE: u32 = 10;

/// Bonus granted by the Little Truths exception to pools keeping fewer than
/// ten dice.
pub const LITTLE_TRUTHS_BONUS: i64 = 2;

/// A raw roll request: roll `roll` d10s, keep the highest `keep`, add `bonus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    /// Number of dice rolled.
    pub roll: u32,
    /// Number of dice kept.
    pub keep: u32,
    /// Flat modifier added to the kept dice.
    pub bonus: i64,
}

impl DicePool {
    /// Create a pool from its three components.
    pub fn new(roll: u32, keep: u32, bonus: i64) -> Self {
        Self { roll, keep, bonus }
    }

    /// Run this pool through the given Ten Dice Rule.
    pub fn normalize(self, rule: &TenDiceRule) -> NormalizedDicePool {
        rule.normalize(self.roll, self.keep, self.bonus)
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}k{}", self.roll, self.keep)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

/// A pool that has been through the Ten Dice Rule.
///
/// Rolled dice never exceed ten. Kept dice never exceed ten either; an odd
/// excess is stepped down in pairs and can land on nine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedDicePool(DicePool);

impl NormalizedDicePool {
    /// Number of dice rolled (at most ten).
    pub fn roll(&self) -> u32 {
        self.0.roll
    }

    /// Number of dice kept (at most ten).
    pub fn keep(&self) -> u32 {
        self.0.keep
    }

    /// Flat bonus, including everything absorbed from the excess.
    pub fn bonus(&self) -> i64 {
        self.0.bonus
    }

    /// Borrow the underlying pool.
    pub fn as_pool(&self) -> &DicePool {
        &self.0
    }

    /// Unwrap into a plain pool.
    pub fn into_pool(self) -> DicePool {
        self.0
    }
}

impl std::fmt::Display for NormalizedDicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Configuration of the Ten Dice Rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenDiceRule {
    /// House rule: pools keeping fewer than ten dice gain a flat +2.
    pub little_truths: bool,
}

impl TenDiceRule {
    /// The rule as written, without the Little Truths exception.
    pub fn standard() -> Self {
        Self::default()
    }

    /// The rule with the Little Truths exception enabled.
    pub fn little_truths() -> Self {
        Self {
            little_truths: true,
        }
    }

    /// Normalize a pool.
    ///
    /// 1. Rolled dice above ten are set aside as `extra`.
    /// 2. Every three `extra` dice become two kept dice; up to two remain.
    /// 3. Kept dice above ten are stepped down two at a time (each step is a
    ///    "rise"; rises are not converted into bonus here).
    /// 4. With Little Truths, a pool keeping fewer than ten gains +2.
    /// 5. A pool keeping exactly ten gains +2 per remaining `extra` die.
    ///
    /// Applying this twice is not a no-op under Little Truths, which is why
    /// the output is a distinct type.
    pub fn normalize(&self, roll: u32, keep: u32, bonus: i64) -> NormalizedDicePool {
        let mut roll = u64::from(roll);
        let keep = u64::from(keep);
        let mut bonus = bonus;
        let max = u64::from(MAX_DICE);

        let mut extra = 0;
        if roll > max {
            extra = roll - max;
            roll = max;
        }

        let keep = keep + (extra / 3) * 2;
        extra %= 3;

        let (keep, rises) = step_down_kept(keep);

        if self.little_truths && keep < max {
            bonus = bonus.saturating_add(LITTLE_TRUTHS_BONUS);
        }

        if keep == max {
            bonus = bonus.saturating_add(extra as i64 * 2);
        }

        debug!(
            roll,
            keep,
            bonus,
            extra,
            rises,
            little_truths = self.little_truths,
            "ten dice rule applied"
        );

        NormalizedDicePool(DicePool {
            roll: roll as u32,
            keep: keep as u32,
            bonus,
        })
    }
}

/// Step kept dice above ten down two at a time.
///
/// Returns the new kept count and how many steps ("rises") were taken.
pub(crate) fn step_down_kept(keep: u64) -> (u64, u64) {
    let max = u64::from(MAX_DICE);
    if keep <= max {
        return (keep, 0);
    }
    let rises = (keep - max).div_ceil(2);
    (keep - rises * 2, rises)
}

/// Normalize a pool with an explicit Little Truths flag.
pub fn normalize(roll: u32, keep: u32, bonus: i64, little_truths: bool) -> NormalizedDicePool {
    TenDiceRule { little_truths }.normalize(roll, keep, bonus)
}
