//! Executing roll expressions.
//!
//! The engine only shapes and interprets rolls; drawing random faces is
//! delegated to a [`RollExecutor`]. A host application plugs in its own
//! executor, while [`SeededRoller`] is a self-contained one backed by
//! `rand` and [`ScriptedRoller`] replays fixed faces.

pub mod roll;
pub mod roller;

pub use roll::{DieResult, ExecutedRoll};
pub use roller::{ScriptedRoller, SeededRoller};

use crate::error::DiceResult;
use crate::expression::RollExpression;

/// Number of faces on every die the engine rolls.
pub const D10: u32 = 10;

/// Something that can turn a roll expression into a rolled total.
pub trait RollExecutor {
    /// Roll the expression and report every die and the total.
    fn execute(&mut self, expression: &RollExpression) -> DiceResult<ExecutedRoll>;
}
