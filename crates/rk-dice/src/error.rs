//! Error types for the dice engine.
//!
//! The arithmetic core (pools, expressions, evaluation, lenient notation)
//! never fails. Errors only come from strict parsing, dice execution, and
//! settings validation.

/// Errors that can occur outside the pure arithmetic core.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// A roll notation string could not be parsed strictly.
    #[error("invalid roll notation '{notation}': {reason}")]
    InvalidNotation {
        /// The offending notation string.
        notation: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A roll expression cannot be executed.
    #[error("invalid roll expression: {0}")]
    InvalidExpression(String),

    /// Engine settings are malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
