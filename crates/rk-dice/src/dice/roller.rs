//! Built-in roll executors.

use std::cmp::Reverse;
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::roll::{DieResult, ExecutedRoll};
use super::{D10, RollExecutor};
use crate::error::{DiceError, DiceResult};
use crate::expression::RollExpression;

/// Largest number of dice a single expression may roll. Normalized pools
/// never come close; only raw legacy pools can.
pub const MAX_EXECUTED_DICE: u32 = 1000;

/// Rolls d10s from a `StdRng`. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct SeededRoller {
    rng: StdRng,
}

impl SeededRoller {
    /// Create a roller from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a roller seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RollExecutor for SeededRoller {
    fn execute(&mut self, expression: &RollExpression) -> DiceResult<ExecutedRoll> {
        let rng = &mut self.rng;
        roll_expression(expression, || Ok(rng.random_range(1..=D10)))
    }
}

/// Replays a fixed sequence of faces. Useful for tests and demonstrations.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    faces: VecDeque<u32>,
}

impl ScriptedRoller {
    /// Create a roller that will produce `faces` in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// Faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RollExecutor for ScriptedRoller {
    fn execute(&mut self, expression: &RollExpression) -> DiceResult<ExecutedRoll> {
        let faces = &mut self.faces;
        roll_expression(expression, || {
            faces
                .pop_front()
                .ok_or_else(|| DiceError::InvalidExpression("scripted faces exhausted".into()))
        })
    }
}

/// Roll an expression, drawing faces from `next_face`.
///
/// A first face equal to the reroll threshold is replaced once. While the
/// latest face is at or above the explode threshold another face is added.
/// The highest `keep_highest` dice are kept; ties keep the earlier die.
fn roll_expression(
    expression: &RollExpression,
    mut next_face: impl FnMut() -> DiceResult<u32>,
) -> DiceResult<ExecutedRoll> {
    if let Some(threshold @ 0..=1) = expression.explode_threshold {
        return Err(DiceError::InvalidExpression(format!(
            "explode threshold {threshold} would never stop"
        )));
    }

    if expression.count > MAX_EXECUTED_DICE {
        return Err(DiceError::InvalidExpression(format!(
            "{} dice exceeds the limit of {MAX_EXECUTED_DICE}",
            expression.count
        )));
    }

    let mut dice = Vec::with_capacity(expression.count as usize);
    for _ in 0..expression.count {
        let mut first = next_face()?;
        let mut rerolled = None;
        if expression.reroll_threshold == Some(first) {
            rerolled = Some(first);
            first = next_face()?;
        }

        let mut faces = vec![first];
        if let Some(threshold) = expression.explode_threshold {
            let mut last = first;
            while last >= threshold {
                last = next_face()?;
                faces.push(last);
            }
        }

        dice.push(DieResult {
            faces,
            rerolled,
            kept: false,
        });
    }

    let mut order: Vec<usize> = (0..dice.len()).collect();
    order.sort_by_key(|&i| Reverse(dice[i].value()));
    for &i in order.iter().take(expression.keep_highest as usize) {
        dice[i].kept = true;
    }

    let roll = ExecutedRoll::new(dice, expression.flat_bonus);
    debug!(expression = %expression, breakdown = %roll, "executed roll");
    Ok(roll)
}
