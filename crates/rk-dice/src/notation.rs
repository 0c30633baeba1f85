//! Legacy compact roll notation: `<roll>k<keep>[x<explode>][+<bonus>][u|e]`.
//!
//! Inline rolls and older stored content encode pools as strings such as
//! `6k3`, `6k3x10+4` or `12k14+2e`. New code should build a [`DicePool`]
//! directly; this module exists so that old content keeps rolling the same.
//!
//! Two front doors are provided:
//! - [`parse`] is lenient. Malformed pieces read as `0` and it never fails.
//! - [`Notation`]'s [`FromStr`] is strict and rejects anything malformed.
//!
//! Both feed [`Notation::resolve`], which redistributes excess kept dice
//! ("rises") according to the roll's modifiers and then applies the
//! Ten Dice Rule. A negative bonus marks a hand-tuned roll and skips both
//! steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coerce::{int_or_zero, leading_int, to_count};
use crate::error::{DiceError, DiceResult};
use crate::expression::{EXPLODE_ON, RollExpression, RollOptions};
use crate::pool::{self, DicePool, NormalizedDicePool, TenDiceRule};

/// A decoded notation string, before any redistribution or normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notation {
    /// The pool exactly as written.
    pub pool: DicePool,
    /// Explode threshold, if one was written. Carried through unchanged.
    pub explode: Option<u32>,
    /// Trailing `u`.
    pub unskilled: bool,
    /// Trailing `e` (ignored when `u` is present).
    pub emphasis: bool,
}

/// The pool a notation resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "pool", rename_all = "lowercase")]
pub enum PoolState {
    /// Went through rise redistribution and the Ten Dice Rule.
    Normalized(NormalizedDicePool),
    /// Negative bonus: returned exactly as written.
    Raw(DicePool),
}

impl PoolState {
    /// The resulting pool, whichever path produced it.
    pub fn pool(&self) -> DicePool {
        match self {
            Self::Normalized(p) => p.into_pool(),
            Self::Raw(p) => *p,
        }
    }

    /// Returns true if the Ten Dice Rule was applied.
    pub fn is_normalized(&self) -> bool {
        matches!(self, Self::Normalized(_))
    }
}

/// A legacy roll ready to be turned into an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedRoll {
    /// The pool to roll.
    pub pool: PoolState,
    /// Untrained roll.
    pub unskilled: bool,
    /// Reroll ones.
    pub emphasis: bool,
    /// Explode threshold from the notation (10 when absent).
    pub explode: u32,
}

impl ParsedRoll {
    /// The modifiers carried by the notation.
    pub fn options(&self) -> RollOptions {
        RollOptions {
            unskilled: self.unskilled,
            emphasis: self.emphasis,
        }
    }

    /// Build the roll expression for this roll.
    pub fn expression(&self) -> RollExpression {
        RollExpression::from_pool(&self.pool.pool(), self.options())
    }
}

/// Decode and resolve a legacy notation string, leniently.
///
/// ```
/// use rk_dice::{TenDiceRule, notation};
///
/// let parsed = notation::parse("6k3", &TenDiceRule::standard());
/// assert_eq!(parsed.pool.pool(), rk_dice::DicePool::new(6, 3, 0));
/// assert!(!parsed.unskilled && !parsed.emphasis);
/// ```
pub fn parse(notation: &str, rule: &TenDiceRule) -> ParsedRoll {
    Notation::lenient(notation).resolve(rule)
}

impl Notation {
    /// Decode a notation string without ever failing.
    ///
    /// Missing or non-numeric pieces read as `0`. When the text after `k`
    /// starts with a number of ten or more, the bonus is split off before the
    /// explode segment; otherwise the explode segment is split off first.
    pub fn lenient(notation: &str) -> Self {
        let text = notation.trim().to_ascii_lowercase();
        let unskilled = text.contains('u');
        let emphasis = !unskilled && text.contains('e');
        let body: String = text
            .chars()
            .filter(|&c| !matches!(c, 'u' | 'e') && !c.is_whitespace())
            .collect();

        let (roll_part, rest) = body.split_once('k').unwrap_or((body.as_str(), ""));
        let (keep_part, explode_part, bonus_part) = split_keep_segment(rest);

        let decoded = Self {
            pool: DicePool {
                roll: to_count(int_or_zero(roll_part)),
                keep: to_count(int_or_zero(keep_part)),
                bonus: bonus_part.map(int_or_zero).unwrap_or(0),
            },
            explode: explode_part.and_then(leading_int).map(to_count),
            unskilled,
            emphasis,
        };
        debug!(notation, decoded = %decoded, "decoded legacy notation");
        decoded
    }

    /// Redistribute rises and apply the Ten Dice Rule.
    ///
    /// Kept dice above ten are stepped down in pairs, each pair a rise.
    /// Unskilled rolls forfeit every rise. Emphasis turns three rises into
    /// two kept dice, then two rises into one. Whatever rises remain are
    /// worth +2 each before normalization.
    pub fn resolve(&self, rule: &TenDiceRule) -> ParsedRoll {
        let explode = self.explode.unwrap_or(EXPLODE_ON);

        if self.pool.bonus < 0 {
            debug!(pool = %self.pool, "negative bonus, skipping ten dice rule");
            return ParsedRoll {
                pool: PoolState::Raw(self.pool),
                unskilled: self.unskilled,
                emphasis: self.emphasis,
                explode,
            };
        }

        let (mut keep, mut rises) = pool::step_down_kept(u64::from(self.pool.keep));

        if self.unskilled {
            rises = 0;
        } else if self.emphasis {
            while rises >= 3 {
                keep += 2;
                rises -= 3;
            }
            while rises >= 2 {
                keep += 1;
                rises -= 2;
            }
        }

        let bonus = self.pool.bonus.saturating_add(rises as i64 * 2);
        let keep = u32::try_from(keep).unwrap_or(u32::MAX);
        debug!(keep, rises, bonus, "rises redistributed");

        ParsedRoll {
            pool: PoolState::Normalized(rule.normalize(self.pool.roll, keep, bonus)),
            unskilled: self.unskilled,
            emphasis: self.emphasis,
            explode,
        }
    }
}

impl FromStr for Notation {
    type Err = DiceError;

    fn from_str(s: &str) -> DiceResult<Self> {
        let invalid = |reason: String| DiceError::InvalidNotation {
            notation: s.to_string(),
            reason,
        };

        let text = s.trim().to_ascii_lowercase();
        let (body, unskilled, emphasis) = if let Some(b) = text.strip_suffix('u') {
            (b, true, false)
        } else if let Some(b) = text.strip_suffix('e') {
            (b, false, true)
        } else {
            (text.as_str(), false, false)
        };

        let (roll_part, rest) = body
            .split_once('k')
            .ok_or_else(|| invalid("missing 'k' between rolled and kept dice".to_string()))?;
        let roll = parse_digits(roll_part)
            .ok_or_else(|| invalid(format!("rolled dice '{roll_part}' is not a count")))?;

        let (keep_part, rest) = split_digits(rest);
        let keep = parse_digits(keep_part)
            .ok_or_else(|| invalid("kept dice must follow 'k'".to_string()))?;

        let (explode, rest) = match rest.strip_prefix('x') {
            Some(after) => {
                let (digits, rest) = split_digits(after);
                let explode = parse_digits(digits)
                    .ok_or_else(|| invalid("explode threshold must follow 'x'".to_string()))?;
                (Some(explode), rest)
            }
            None => (None, rest),
        };

        let (bonus, rest) = match rest.chars().next() {
            Some(sign @ ('+' | '-')) => {
                let (digits, rest) = split_digits(&rest[1..]);
                let magnitude = digits
                    .parse::<i64>()
                    .map_err(|_| invalid(format!("bonus must follow '{sign}'")))?;
                (if sign == '-' { -magnitude } else { magnitude }, rest)
            }
            _ => (0, rest),
        };

        if !rest.is_empty() {
            return Err(invalid(format!("unexpected '{rest}'")));
        }

        Ok(Self {
            pool: DicePool { roll, keep, bonus },
            explode,
            unskilled,
            emphasis,
        })
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}k{}", self.pool.roll, self.pool.keep)?;
        if let Some(x) = self.explode {
            write!(f, "x{x}")?;
        }
        match self.pool.bonus {
            0 => {}
            b if b > 0 => write!(f, "+{b}")?,
            b => write!(f, "{b}")?,
        }
        if self.unskilled {
            write!(f, "u")
        } else if self.emphasis {
            write!(f, "e")
        } else {
            Ok(())
        }
    }
}

/// Split the text after `k` into keep, explode and bonus pieces.
fn split_keep_segment(rest: &str) -> (&str, Option<&str>, Option<&str>) {
    if leading_int(rest).is_some_and(|keep| keep >= 10) {
        let (head, bonus) = split_bonus(rest);
        match head.split_once('x') {
            Some((keep, explode)) => (keep, Some(explode), bonus),
            None => (head, None, bonus),
        }
    } else {
        match rest.split_once('x') {
            Some((keep, tail)) => {
                let (keep, keep_bonus) = split_bonus(keep);
                let (explode, bonus) = split_bonus(tail);
                (keep, Some(explode), bonus.or(keep_bonus))
            }
            None => {
                let (keep, bonus) = split_bonus(rest);
                (keep, None, bonus)
            }
        }
    }
}

/// Split at the first `+` or `-` after the leading character.
///
/// A `-` stays on the bonus so that it parses negative.
fn split_bonus(s: &str) -> (&str, Option<&str>) {
    match s.char_indices().skip(1).find(|&(_, c)| matches!(c, '+' | '-')) {
        Some((i, '+')) => (&s[..i], Some(&s[i + 1..])),
        Some((i, _)) => (&s[..i], Some(&s[i..])),
        None => (s, None),
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
