// ============================================================================
// Numeric Errors
// Error types for exact fraction arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur while building or mutating an exact fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result does not fit in an i64 numerator or denominator
    Overflow,
    /// Attempted to use a zero denominator
    DivisionByZero,
    /// Input string or configuration is invalid
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: value does not fit in 64 bits")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Fraction;

    #[test]
    fn test_invalid_input_message() {
        let err = "twelve".parse::<Fraction>().unwrap_err();
        assert_eq!(err, NumericError::InvalidInput);
        assert_eq!(err.to_string(), "invalid input: could not parse value");
    }

    #[test]
    fn test_zero_denominator_and_sign_overflow_are_distinct() {
        let zero = Fraction::new(1, 0).unwrap_err();
        let overflow = Fraction::new(i64::MIN, -1).unwrap_err();

        assert_eq!(zero, NumericError::DivisionByZero);
        assert_eq!(overflow, NumericError::Overflow);
        assert!(overflow.to_string().contains("64 bits"));
    }

    #[test]
    fn test_boxes_as_std_error() {
        fn parse(s: &str) -> Result<Fraction, Box<dyn std::error::Error>> {
            Ok(s.parse::<Fraction>()?)
        }

        assert!(parse("3/4").is_ok());
        assert_eq!(parse("3/0").unwrap_err().to_string(), "division by zero");
    }
}
