// ============================================================================
// Exact Fraction
// Reduced i64 numerator/denominator pair with bounded decimal expansion
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exact rational number stored in lowest terms.
///
/// # Invariants
/// - `denom > 0`; the sign always lives on the numerator
/// - `gcd(|num|, denom) == 1`; zero is stored as `0/1`
///
/// Every constructor and `with_*` method funnels through [`Fraction::new`],
/// which restores both invariants or fails.
///
/// # Example
/// ```
/// use ledger_core::numeric::Fraction;
///
/// let f = Fraction::new(2, 6).unwrap();
/// assert_eq!((f.numerator(), f.denominator()), (1, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFraction", into = "RawFraction"))]
pub struct Fraction {
    num: i64,
    denom: i64,
}

/// Wire form of a [`Fraction`]; deserialized pairs are reduced and checked
/// through [`Fraction::new`].
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawFraction {
    num: i64,
    denom: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFraction> for Fraction {
    type Error = NumericError;

    fn try_from(raw: RawFraction) -> NumericResult<Self> {
        Self::new(raw.num, raw.denom)
    }
}

#[cfg(feature = "serde")]
impl From<Fraction> for RawFraction {
    fn from(value: Fraction) -> Self {
        Self {
            num: value.num,
            denom: value.denom,
        }
    }
}

/// Greatest common divisor (Euclid). `gcd(0, n) == n`.
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Fraction {
    /// Zero (0/1)
    pub const ZERO: Self = Self { num: 0, denom: 1 };

    /// One (1/1)
    pub const ONE: Self = Self { num: 1, denom: 1 };

    /// Largest fractional digit count [`Fraction::to_decimal`] will produce.
    ///
    /// `i64::MAX * 10^18` still fits in an i128 intermediate.
    pub const MAX_FRACTION_DIGITS: u32 = 18;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a reduced fraction.
    ///
    /// # Errors
    /// - `DivisionByZero` if `denominator == 0`
    /// - `Overflow` if moving the sign onto the numerator leaves the i64 range
    ///   (only possible with `i64::MIN` operands)
    pub fn new(numerator: i64, denominator: i64) -> NumericResult<Self> {
        if denominator == 0 {
            return Err(NumericError::DivisionByZero);
        }
        if numerator == 0 {
            return Ok(Self::ZERO);
        }

        let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i128;
        let sign: i128 = if denominator < 0 { -1 } else { 1 };

        let num = sign * numerator as i128 / divisor;
        let denom = (denominator as i128).abs() / divisor;

        let reduced = Self {
            num: i64::try_from(num).map_err(|_| NumericError::Overflow)?,
            denom: i64::try_from(denom).map_err(|_| NumericError::Overflow)?,
        };
        tracing::trace!(numerator, denominator, %reduced, "reduced fraction");
        Ok(reduced)
    }

    /// Create an integer fraction (n/1).
    #[inline]
    pub const fn from_integer(value: i64) -> Self {
        Self { num: value, denom: 1 }
    }

    /// Convert an exact decimal to its minimal fraction.
    ///
    /// The decimal's scale `d` gives `value * 10^d / 10^d`, which is then
    /// reduced, so `0.123` and `0.123000` both become `123/1000`.
    ///
    /// # Errors
    /// Returns `Overflow` if the mantissa or `10^d` does not fit in an i64.
    pub fn from_decimal(value: Decimal) -> NumericResult<Self> {
        let value = value.normalize();
        let denom = 10i64
            .checked_pow(value.scale())
            .ok_or(NumericError::Overflow)?;
        let num = i64::try_from(value.mantissa()).map_err(|_| NumericError::Overflow)?;
        Self::new(num, denom)
    }

    /// Copy with a new numerator, reduced against the current denominator.
    pub fn with_numerator(self, numerator: i64) -> NumericResult<Self> {
        Self::new(numerator, self.denom)
    }

    /// Copy with a new denominator, reduced against the current numerator.
    pub fn with_denominator(self, denominator: i64) -> NumericResult<Self> {
        Self::new(self.num, denominator)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn numerator(self) -> i64 {
        self.num
    }

    #[inline]
    pub const fn denominator(self) -> i64 {
        self.denom
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.num < 0
    }

    /// True when the base-10 expansion terminates (denominator is 2^a * 5^b).
    pub fn is_terminating(self) -> bool {
        let mut d = self.denom;
        while d % 2 == 0 {
            d /= 2;
        }
        while d % 5 == 0 {
            d /= 5;
        }
        d == 1
    }

    // ========================================================================
    // Decimal Expansion
    // ========================================================================

    /// Decimal expansion rounded half-up (away from zero) to at most
    /// `max_fraction_digits` places, trailing zeros removed.
    ///
    /// Never fails: if the scaled quotient does not fit a `Decimal` at the
    /// requested precision, fewer digits are produced, down to an integer.
    pub fn to_decimal(self, max_fraction_digits: u32) -> Decimal {
        let requested = max_fraction_digits.min(Self::MAX_FRACTION_DIGITS);
        let mut digits = requested;
        loop {
            if let Some(value) = self.rounded_at(digits) {
                if digits < requested {
                    tracing::warn!(
                        fraction = %self,
                        requested,
                        digits,
                        "decimal expansion truncated to fit"
                    );
                }
                return value;
            }
            if digits == 0 {
                // rounded_at(0) only scales by 1, so this is unreachable for i64 operands
                return Decimal::from(self.num / self.denom);
            }
            digits -= 1;
        }
    }

    fn rounded_at(self, digits: u32) -> Option<Decimal> {
        let scale = 10i128.checked_pow(digits)?;
        let scaled = (self.num as i128).checked_mul(scale)?;
        let denom = self.denom as i128;

        let quotient = scaled / denom;
        let remainder = scaled % denom;

        // Round half-up: a remainder of at least half the denominator moves
        // the quotient one step away from zero
        let rounded = if remainder.abs() * 2 >= denom {
            quotient + scaled.signum()
        } else {
            quotient
        };

        Decimal::try_from_i128_with_scale(rounded, digits)
            .ok()
            .map(|d| d.normalize())
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Fraction {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Fraction {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication preserves order
        let lhs = self.num as i128 * other.denom as i128;
        let rhs = other.num as i128 * self.denom as i128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

impl TryFrom<Decimal> for Fraction {
    type Error = NumericError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Fraction {
    type Err = NumericError;

    /// Parse either `"num/denom"` or a plain decimal such as `"-0.125"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }

        if let Some((num, denom)) = s.split_once('/') {
            let num: i64 = num.trim().parse().map_err(|_| NumericError::InvalidInput)?;
            let denom: i64 = denom.trim().parse().map_err(|_| NumericError::InvalidInput)?;
            return Self::new(num, denom);
        }

        let value: Decimal = s.parse().map_err(|_| NumericError::InvalidInput)?;
        Self::from_decimal(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
