//! Rolled dice and their breakdown.

use serde::{Deserialize, Serialize};

/// One d10 after rerolls and explosions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Faces that count toward this die; more than one when it exploded.
    pub faces: Vec<u32>,
    /// The face discarded by an emphasis reroll, if any.
    pub rerolled: Option<u32>,
    /// Whether this die is among the kept highest.
    pub kept: bool,
}

impl DieResult {
    /// Create an unkept die from its faces.
    pub fn new(faces: Vec<u32>) -> Self {
        Self {
            faces,
            rerolled: None,
            kept: false,
        }
    }

    /// Value of this die: the sum of all its faces.
    pub fn value(&self) -> u32 {
        self.faces.iter().sum()
    }

    /// Returns true if this die exploded at least once.
    pub fn exploded(&self) -> bool {
        self.faces.len() > 1
    }
}

impl std::fmt::Display for DieResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(u32::to_string).collect();
        let faces = faces.join("+");
        let shown = match self.rerolled {
            Some(r) => format!("{r}→{faces}"),
            None => faces,
        };
        if self.kept {
            write!(f, "{shown}")
        } else {
            write!(f, "({shown})")
        }
    }
}

/// The outcome of executing a roll expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedRoll {
    /// Every die rolled, in roll order.
    pub dice: Vec<DieResult>,
    /// Flat modifier added to the kept dice.
    pub flat_bonus: i64,
    /// Sum of kept dice plus the flat bonus.
    pub total: i64,
}

impl ExecutedRoll {
    /// Build a result and compute its total.
    pub fn new(dice: Vec<DieResult>, flat_bonus: i64) -> Self {
        let kept: i64 = dice
            .iter()
            .filter(|d| d.kept)
            .map(|d| i64::from(d.value()))
            .sum();
        Self {
            dice,
            flat_bonus,
            total: kept.saturating_add(flat_bonus),
        }
    }

    /// The kept dice.
    pub fn kept(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(|d| d.kept)
    }

    /// Number of dice that exploded.
    pub fn explosions(&self) -> usize {
        self.dice.iter().filter(|d| d.exploded()).count()
    }
}

impl std::fmt::Display for ExecutedRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dice: Vec<String> = self.dice.iter().map(DieResult::to_string).collect();
        write!(f, "[{}]", dice.join(", "))?;
        match self.flat_bonus {
            0 => {}
            b if b > 0 => write!(f, " +{b}")?,
            b => write!(f, " {b}")?,
        }
        write!(f, " = {}", self.total)
    }
}
