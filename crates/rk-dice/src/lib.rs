//! Dice resolution engine for Rokugan-style roll-and-keep games.
//!
//! Turns trait, skill and ring values into `XkY` d10 pools, caps them with
//! the Ten Dice Rule, assembles exploding/rerolling roll expressions, and
//! judges totals against a target number plus raises. Also decodes the
//! legacy compact notation (`6k3x10+4u`) found in older content.
//!
//! The arithmetic is pure. Randomness lives behind [`RollExecutor`].

pub mod check;
pub mod coerce;
pub mod dice;
pub mod error;
pub mod evaluate;
pub mod expression;
pub mod notation;
pub mod pool;

pub use check::{
    CheckResult, DamageRollConfig, PoolRollConfig, RingRollConfig, RollConfig, SkillRollConfig,
    Target, TraitRollConfig, perform_check, perform_parsed,
};
pub use dice::{DieResult, ExecutedRoll, RollExecutor, ScriptedRoller, SeededRoller};
pub use error::{DiceError, DiceResult};
pub use evaluate::{TargetResult, Verdict, evaluate};
pub use expression::{RollExpression, RollOptions, build_expression};
pub use notation::{Notation, ParsedRoll, PoolState};
pub use pool::{DicePool, NormalizedDicePool, TenDiceRule, normalize};
