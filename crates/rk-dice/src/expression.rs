//! Symbolic roll expressions.
//!
//! A [`RollExpression`] describes what to roll without rolling it. Its
//! [`Display`](std::fmt::Display) form is the formula string handed to a
//! dice executor, e.g. `6d10k3x10+4` or `5d10r1k2x10`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::pool::{DicePool, NormalizedDicePool};

/// Face at or above which a die explodes.
pub const EXPLODE_ON: u32 = 10;

/// Face that emphasis rerolls.
pub const EMPHASIS_REROLL_ON: u32 = 1;

/// Modifiers that change how dice behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOptions {
    /// Untrained roll: no die explodes.
    pub unskilled: bool,
    /// Reroll dice showing a one, once.
    pub emphasis: bool,
}

impl RollOptions {
    /// Options for an unskilled roll.
    pub fn unskilled() -> Self {
        Self {
            unskilled: true,
            emphasis: false,
        }
    }

    /// Options for a roll with an applicable emphasis.
    pub fn emphasis() -> Self {
        Self {
            unskilled: false,
            emphasis: true,
        }
    }
}

/// A fully described d10 roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollExpression {
    /// Number of d10s rolled.
    pub count: u32,
    /// Number of highest dice kept.
    pub keep_highest: u32,
    /// Dice at or above this face are rolled again and added.
    pub explode_threshold: Option<u32>,
    /// Dice showing this face are rerolled once.
    pub reroll_threshold: Option<u32>,
    /// Flat modifier added after keeping.
    pub flat_bonus: i64,
}

/// Assemble the roll expression for a normalized pool.
///
/// If both `unskilled` and `emphasis` are set, emphasis wins: the roll
/// rerolls ones and still explodes.
pub fn build_expression(pool: &NormalizedDicePool, options: RollOptions) -> RollExpression {
    RollExpression::from_pool(pool.as_pool(), options)
}

impl RollExpression {
    /// Assemble an expression from any pool, normalized or not.
    pub(crate) fn from_pool(pool: &DicePool, options: RollOptions) -> Self {
        if options.unskilled && options.emphasis {
            warn!(pool = %pool, "unskilled and emphasis both requested; emphasis wins");
        }

        let (explode_threshold, reroll_threshold) = if options.emphasis {
            (Some(EXPLODE_ON), Some(EMPHASIS_REROLL_ON))
        } else if options.unskilled {
            (None, None)
        } else {
            (Some(EXPLODE_ON), None)
        };

        Self {
            count: pool.roll,
            keep_highest: pool.keep,
            explode_threshold,
            reroll_threshold,
            flat_bonus: pool.bonus,
        }
    }

    /// Returns true if dice in this expression can explode.
    pub fn explodes(&self) -> bool {
        self.explode_threshold.is_some()
    }
}

impl std::fmt::Display for RollExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d10", self.count)?;
        if let Some(r) = self.reroll_threshold {
            write!(f, "r{r}")?;
        }
        write!(f, "k{}", self.keep_highest)?;
        if let Some(x) = self.explode_threshold {
            write!(f, "x{x}")?;
        }
        match self.flat_bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}
