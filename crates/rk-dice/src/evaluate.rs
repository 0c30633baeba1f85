//! Target number and raise evaluation.

use serde::{Deserialize, Serialize};

/// Difficulty added to the target number per declared raise.
pub const RAISE_STEP: i64 = 5;

/// Whether a roll met its target number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The total met or exceeded the effective target number.
    Success,
    /// The total fell short.
    Failure,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}

/// The result of comparing a roll total to a target number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResult {
    /// Target number after raises.
    pub effective_tn: i64,
    /// Number of raises declared.
    pub raises: u32,
    /// `None` when no target number was set.
    pub outcome: Option<Verdict>,
}

impl TargetResult {
    /// Returns true if the roll succeeded against a set target number.
    pub fn succeeded(&self) -> bool {
        self.outcome == Some(Verdict::Success)
    }
}

/// Classify a roll total against a target number plus raises.
///
/// Wound penalties are the caller's business and must already be folded
/// into `tn`. A `tn` of zero or less means "no target": the outcome is
/// `None` whatever the total.
pub fn evaluate(total: i64, tn: i64, raises: u32) -> TargetResult {
    let effective_tn = tn.saturating_add(i64::from(raises).saturating_mul(RAISE_STEP));

    let outcome = if tn <= 0 {
        None
    } else if total >= effective_tn {
        Some(Verdict::Success)
    } else {
        Some(Verdict::Failure)
    };

    TargetResult {
        effective_tn,
        raises,
        outcome,
    }
}
