//! Typed roll configurations and the check pipeline.
//!
//! Each kind of roll (skill, trait, ring, damage, or a pre-computed pool)
//! has its own configuration struct. All of them describe a [`DicePool`],
//! the [`RollOptions`] that apply, and a [`Target`]. [`perform_check`] runs
//! the full pipeline: Ten Dice Rule, expression, execution, evaluation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coerce::to_count;
use crate::dice::{ExecutedRoll, RollExecutor};
use crate::error::DiceResult;
use crate::evaluate::{TargetResult, evaluate};
use crate::expression::{RollExpression, RollOptions, build_expression};
use crate::notation::ParsedRoll;
use crate::pool::{DicePool, TenDiceRule};

/// What a roll is trying to beat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    /// Base target number; zero or less means none.
    pub tn: i64,
    /// Raises declared by the player.
    pub raises: u32,
    /// Wound penalty added to the target number.
    pub wound_penalty: i64,
}

impl Target {
    /// A target number with no raises or wounds.
    pub fn tn(tn: i64) -> Self {
        Self {
            tn,
            ..Self::default()
        }
    }

    /// The target number the roll is evaluated against, before raises.
    ///
    /// Wound penalties only apply when a target number is set; a roll
    /// without one stays verdict-free.
    pub fn penalized_tn(&self) -> i64 {
        if self.tn <= 0 {
            self.tn
        } else {
            self.tn.saturating_add(self.wound_penalty.max(0))
        }
    }
}

/// A kind of roll that can be fed into [`perform_check`].
pub trait RollConfig {
    /// The raw pool, before the Ten Dice Rule.
    fn pool(&self) -> DicePool;

    /// Dice modifiers for this roll.
    fn options(&self) -> RollOptions {
        RollOptions::default()
    }

    /// What the roll must beat.
    fn target(&self) -> Target {
        Target::default()
    }
}

/// Trait + skill roll: `(trait + skill)k(trait)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillRollConfig {
    /// The governing trait.
    pub trait_value: u32,
    /// Skill rank; zero makes the roll unskilled.
    pub skill_rank: u32,
    /// An emphasis of the skill applies.
    pub emphasis: bool,
    /// Extra rolled dice.
    pub roll_bonus: i64,
    /// Extra kept dice.
    pub keep_bonus: i64,
    /// Flat bonus to the total.
    pub total_bonus: i64,
    /// Target of the roll.
    pub target: Target,
}

impl RollConfig for SkillRollConfig {
    fn pool(&self) -> DicePool {
        let trait_value = i64::from(self.trait_value);
        DicePool {
            roll: to_count(trait_value + i64::from(self.skill_rank) + self.roll_bonus),
            keep: to_count(trait_value + self.keep_bonus),
            bonus: self.total_bonus,
        }
    }

    fn options(&self) -> RollOptions {
        let unskilled = self.skill_rank == 0;
        RollOptions {
            unskilled,
            emphasis: self.emphasis && !unskilled,
        }
    }

    fn target(&self) -> Target {
        self.target
    }
}

/// Bare trait roll: `(trait)k(trait)`, `+1k1` when Void is spent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitRollConfig {
    /// The trait being rolled.
    pub trait_value: u32,
    /// A Void point was spent.
    pub void_spent: bool,
    /// Extra rolled dice.
    pub roll_bonus: i64,
    /// Extra kept dice.
    pub keep_bonus: i64,
    /// Flat bonus to the total.
    pub total_bonus: i64,
    /// Target of the roll.
    pub target: Target,
}

impl RollConfig for TraitRollConfig {
    fn pool(&self) -> DicePool {
        let base = i64::from(self.trait_value) + i64::from(self.void_spent);
        DicePool {
            roll: to_count(base + self.roll_bonus),
            keep: to_count(base + self.keep_bonus),
            bonus: self.total_bonus,
        }
    }

    fn target(&self) -> Target {
        self.target
    }
}

/// Ring roll, e.g. for spellcasting: `(ring + school rank)k(ring)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingRollConfig {
    /// The ring being rolled.
    pub ring: u32,
    /// Insight/school rank added to rolled dice.
    pub school_rank: u32,
    /// A Void point was spent.
    pub void_spent: bool,
    /// Flat bonus to the total.
    pub total_bonus: i64,
    /// Target of the roll.
    pub target: Target,
}

impl RollConfig for RingRollConfig {
    fn pool(&self) -> DicePool {
        let ring = i64::from(self.ring) + i64::from(self.void_spent);
        DicePool {
            roll: to_count(ring + i64::from(self.school_rank)),
            keep: to_count(ring),
            bonus: self.total_bonus,
        }
    }

    fn target(&self) -> Target {
        self.target
    }
}

/// Weapon damage: `(strength + weapon roll)k(weapon keep)`. Never has a TN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageRollConfig {
    /// Wielder's Strength.
    pub strength: u32,
    /// Rolled dice of the weapon's damage rating.
    pub weapon_roll: u32,
    /// Kept dice of the weapon's damage rating.
    pub weapon_keep: u32,
    /// Flat damage bonus.
    pub bonus: i64,
}

impl RollConfig for DamageRollConfig {
    fn pool(&self) -> DicePool {
        DicePool {
            roll: self.strength.saturating_add(self.weapon_roll),
            keep: self.weapon_keep,
            bonus: self.bonus,
        }
    }
}

/// A pool already computed elsewhere, e.g. an NPC's listed attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolRollConfig {
    /// The pool to roll.
    pub pool: DicePool,
    /// Dice modifiers.
    pub options: RollOptions,
    /// Target of the roll.
    pub target: Target,
}

impl RollConfig for PoolRollConfig {
    fn pool(&self) -> DicePool {
        self.pool
    }

    fn options(&self) -> RollOptions {
        self.options
    }

    fn target(&self) -> Target {
        self.target
    }
}

/// Everything produced by one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// The pool that was actually rolled.
    pub pool: DicePool,
    /// The expression that was executed.
    pub expression: RollExpression,
    /// The rolled dice.
    pub roll: ExecutedRoll,
    /// The verdict against the target.
    pub target: TargetResult,
}

/// Normalize, build, execute and evaluate a configured roll.
pub fn perform_check<C, E>(
    config: &C,
    rule: &TenDiceRule,
    executor: &mut E,
) -> DiceResult<CheckResult>
where
    C: RollConfig + ?Sized,
    E: RollExecutor + ?Sized,
{
    let pool = config.pool().normalize(rule);
    let expression = build_expression(&pool, config.options());
    run(pool.into_pool(), expression, config.target(), executor)
}

/// Execute and evaluate a roll decoded from legacy notation.
pub fn perform_parsed<E>(
    parsed: &ParsedRoll,
    target: Target,
    executor: &mut E,
) -> DiceResult<CheckResult>
where
    E: RollExecutor + ?Sized,
{
    run(parsed.pool.pool(), parsed.expression(), target, executor)
}

fn run<E>(
    pool: DicePool,
    expression: RollExpression,
    target: Target,
    executor: &mut E,
) -> DiceResult<CheckResult>
where
    E: RollExecutor + ?Sized,
{
    let roll = executor.execute(&expression)?;
    let result = evaluate(roll.total, target.penalized_tn(), target.raises);
    debug!(
        expression = %expression,
        total = roll.total,
        effective_tn = result.effective_tn,
        outcome = ?result.outcome,
        "check resolved"
    );
    Ok(CheckResult {
        pool,
        expression,
        roll,
        target: result,
    })
}
