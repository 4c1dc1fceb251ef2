// ============================================================================
// Number Formatting
// Locale presentation step for decimal values
// ============================================================================

use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fraction::Fraction;

/// Locale conventions used to render a decimal value.
///
/// The digit computation itself is locale-free (see [`Fraction::to_decimal`]);
/// this type only decides which separators go where.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberFormat {
    /// Character between the integer and fractional digits
    pub decimal_separator: char,

    /// Character between integer digit groups
    /// None disables grouping
    pub grouping_separator: Option<char>,

    /// Number of integer digits per group (3 for all presets)
    pub grouping_size: usize,

    /// Upper bound on rendered fractional digits
    pub max_fraction_digits: u32,
}

impl NumberFormat {
    /// Fractional digit bound used by the presets
    pub const DEFAULT_MAX_FRACTION_DIGITS: u32 = 12;

    /// Create a format with the given separators and default precision
    pub fn new(decimal_separator: char, grouping_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            grouping_separator,
            grouping_size: 3,
            max_fraction_digits: Self::DEFAULT_MAX_FRACTION_DIGITS,
        }
    }

    /// Builder method: Set the decimal separator
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Builder method: Set the grouping separator
    pub fn with_grouping_separator(mut self, separator: char) -> Self {
        self.grouping_separator = Some(separator);
        self
    }

    /// Builder method: Disable digit grouping
    pub fn without_grouping(mut self) -> Self {
        self.grouping_separator = None;
        self
    }

    /// Builder method: Set the fractional digit bound
    pub fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.decimal_separator.is_ascii_digit() || self.decimal_separator == '-' {
            return Err("Decimal separator cannot be a digit or sign".to_string());
        }

        if let Some(grouping) = self.grouping_separator {
            if grouping == self.decimal_separator {
                return Err("Grouping and decimal separators must differ".to_string());
            }
            if grouping.is_ascii_digit() || grouping == '-' {
                return Err("Grouping separator cannot be a digit or sign".to_string());
            }
            if self.grouping_size == 0 {
                return Err("Grouping size must be positive".to_string());
            }
        }

        if self.max_fraction_digits > Fraction::MAX_FRACTION_DIGITS {
            return Err(format!(
                "At most {} fractional digits are supported",
                Fraction::MAX_FRACTION_DIGITS
            ));
        }

        Ok(())
    }

    /// Render a decimal value using these conventions.
    ///
    /// The value is printed as-is; round it first if it may carry more
    /// fractional digits than wanted.
    pub fn format_decimal(&self, value: Decimal) -> String {
        let digits = value.abs().normalize().to_string();
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        if value.is_sign_negative() && !value.is_zero() {
            out.push('-');
        }
        self.push_grouped(&mut out, integer);

        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Render a fraction, bounded by `max_fraction_digits`
    pub fn format_fraction(&self, value: Fraction) -> String {
        self.format_decimal(value.to_decimal(self.max_fraction_digits))
    }

    fn push_grouped(&self, out: &mut String, integer: &str) {
        let separator = match self.grouping_separator {
            Some(separator) if self.grouping_size > 0 => separator,
            _ => {
                out.push_str(integer);
                return;
            },
        };

        let len = integer.len();
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (len - i) % self.grouping_size == 0 {
                out.push(separator);
            }
            out.push(digit);
        }
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl NumberFormat {
    /// United States: `1,234.5`
    pub fn en_us() -> Self {
        Self::new('.', Some(','))
    }

    /// United Kingdom: `1,234.5`
    pub fn en_gb() -> Self {
        Self::new('.', Some(','))
    }

    /// Germany: `1.234,5`
    pub fn de_de() -> Self {
        Self::new(',', Some('.'))
    }

    /// Switzerland (German): `1'234.5`
    pub fn de_ch() -> Self {
        Self::new('.', Some('\''))
    }

    /// France: `1 234,5` with a narrow no-break space
    pub fn fr_fr() -> Self {
        Self::new(',', Some('\u{202f}'))
    }

    /// Machine-readable: `1234.5`
    pub fn invariant() -> Self {
        Self::new('.', None)
    }

    /// Pick a preset from a locale tag such as `"de-DE"`, `"fr_FR"` or `"en"`.
    ///
    /// Returns None for locales without a known convention.
    pub fn for_locale(tag: &str) -> Option<Self> {
        let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
        let (language, region) = match tag.split_once('-') {
            Some((language, region)) => (language, Some(region)),
            None => (tag.as_str(), None),
        };

        let format = match (language, region) {
            ("c" | "posix" | "und", _) => Self::invariant(),
            ("en", Some("gb")) => Self::en_gb(),
            ("en", _) => Self::en_us(),
            ("de" | "fr" | "it", Some("ch")) => Self::de_ch(),
            ("de" | "es" | "it" | "nl" | "pt", _) => Self::de_de(),
            ("fr", _) => Self::fr_fr(),
            _ => return None,
        };
        Some(format)
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::en_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_us_formatting() {
        let us = NumberFormat::en_us();
        assert_eq!(us.format_decimal(dec("0.123456")), "0.123456");
        assert_eq!(us.format_decimal(dec("1234.5")), "1,234.5");
        assert_eq!(us.format_decimal(dec("1234567")), "1,234,567");
        assert_eq!(us.format_decimal(dec("123")), "123");
    }

    #[test]
    fn test_german_formatting() {
        let de = NumberFormat::de_de();
        assert_eq!(de.format_decimal(dec("1.234")), "1,234");
        assert_eq!(de.format_decimal(dec("1234.5")), "1.234,5");
    }

    #[test]
    fn test_negative_and_zero() {
        let us = NumberFormat::en_us();
        assert_eq!(us.format_decimal(dec("-9876.25")), "-9,876.25");
        assert_eq!(us.format_decimal(dec("-0.00")), "0");
        assert_eq!(us.format_decimal(Decimal::ZERO), "0");
    }

    #[test]
    fn test_trailing_zeros_removed() {
        let us = NumberFormat::en_us();
        assert_eq!(us.format_decimal(dec("0.123000")), "0.123");
        assert_eq!(us.format_decimal(dec("10.00")), "10");
    }

    #[test]
    fn test_without_grouping() {
        let plain = NumberFormat::en_us().without_grouping();
        assert_eq!(plain.format_decimal(dec("1234567.89")), "1234567.89");
        assert_eq!(
            NumberFormat::invariant().format_decimal(dec("1234.5")),
            "1234.5"
        );
    }

    #[test]
    fn test_format_fraction_bounded() {
        let third = Fraction::new(1, 3).unwrap();
        assert_eq!(
            NumberFormat::en_us().format_fraction(third),
            "0.333333333333"
        );
        assert_eq!(
            NumberFormat::de_de()
                .with_max_fraction_digits(3)
                .format_fraction(third),
            "0,333"
        );
    }

    #[test]
    fn test_swiss_and_french() {
        assert_eq!(
            NumberFormat::de_ch().format_decimal(dec("1234567.5")),
            "1'234'567.5"
        );
        assert_eq!(
            NumberFormat::fr_fr().format_decimal(dec("1234.5")),
            "1\u{202f}234,5"
        );
    }

    #[test]
    fn test_for_locale() {
        assert_eq!(NumberFormat::for_locale("de-DE"), Some(NumberFormat::de_de()));
        assert_eq!(NumberFormat::for_locale("de_CH"), Some(NumberFormat::de_ch()));
        assert_eq!(NumberFormat::for_locale("EN"), Some(NumberFormat::en_us()));
        assert_eq!(NumberFormat::for_locale("fr"), Some(NumberFormat::fr_fr()));
        assert_eq!(NumberFormat::for_locale("C"), Some(NumberFormat::invariant()));
        assert_eq!(NumberFormat::for_locale("ja-JP"), None);
    }

    #[test]
    fn test_validation() {
        assert!(NumberFormat::en_us().validate().is_ok());
        assert!(NumberFormat::en_us()
            .with_grouping_separator('.')
            .validate()
            .is_err());
        assert!(NumberFormat::en_us()
            .with_decimal_separator('5')
            .validate()
            .is_err());
        assert!(NumberFormat::en_us()
            .with_max_fraction_digits(40)
            .validate()
            .is_err());

        let mut zero_groups = NumberFormat::en_us();
        zero_groups.grouping_size = 0;
        assert!(zero_groups.validate().is_err());
    }
}
