// ============================================================================
// Recurrence Errors
// Error types for recurrence configuration and rule parsing
// ============================================================================

use chrono::NaiveDateTime;
use std::fmt;

/// Errors raised when a recurrence is configured or parsed.
///
/// Every error is reported by the setter that caused it; a failed setter
/// leaves the recurrence unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// Multiplier must be at least 1
    InvalidMultiplier(u32),
    /// End instant precedes the start instant
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Calendar stepping left the representable date range
    DateOutOfRange,
    /// Rule string could not be parsed
    InvalidRule(String),
}

impl fmt::Display for RecurrenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceError::InvalidMultiplier(m) => {
                write!(f, "invalid multiplier {}: must be at least 1", m)
            },
            RecurrenceError::EndBeforeStart { start, end } => {
                write!(f, "period end {} is before period start {}", end, start)
            },
            RecurrenceError::DateOutOfRange => write!(f, "date out of representable range"),
            RecurrenceError::InvalidRule(reason) => write!(f, "invalid rule string: {}", reason),
        }
    }
}

impl std::error::Error for RecurrenceError {}

/// Result type alias for recurrence operations
pub type RecurrenceResult<T> = Result<T, RecurrenceError>;
