// ============================================================================
// Price Domain Model
// Exchange rate between two commodities stored as an exact fraction
// ============================================================================

use crate::numeric::{Fraction, NumberFormat, NumericError, NumericResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceId(Uuid);

impl PriceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PriceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque key of a commodity or currency.
///
/// Never resolved or validated here; the ledger owns the commodity data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommodityId(String);

impl CommodityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommodityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CommodityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CommodityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a quote came from in the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PriceType {
    Bid,
    Ask,
    Last,
    /// Net asset value (funds)
    Nav,
    /// Rate implied by a recorded transaction
    Transaction,
    #[default]
    Unknown,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Bid => "bid",
            PriceType::Ask => "ask",
            PriceType::Last => "last",
            PriceType::Nav => "nav",
            PriceType::Transaction => "transaction",
            PriceType::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for PriceType {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bid" => Ok(PriceType::Bid),
            "ask" => Ok(PriceType::Ask),
            "last" => Ok(PriceType::Last),
            "nav" => Ok(PriceType::Nav),
            "transaction" => Ok(PriceType::Transaction),
            "unknown" => Ok(PriceType::Unknown),
            _ => Err(NumericError::InvalidInput),
        }
    }
}

// ============================================================================
// Rational Price
// ============================================================================

/// Exchange rate `commodity_from -> commodity_to` as an exact fraction.
///
/// The value is kept in lowest terms after every mutation, so
/// [`value_num`](Self::value_num) and [`value_denom`](Self::value_denom)
/// always return the reduced pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RationalPrice {
    /// Unique price identifier
    pub id: PriceId,

    commodity_from: CommodityId,

    commodity_to: CommodityId,

    /// When the price was quoted
    pub date: DateTime<Utc>,

    /// Free-text origin, e.g. "user:xfer-dialog"
    pub source: Option<String>,

    pub price_type: PriceType,

    value: Fraction,
}

impl RationalPrice {
    /// Create a price from an exact decimal exchange rate.
    ///
    /// # Errors
    /// Returns `Overflow` if the decimal needs more than 18 digits of
    /// numerator or denominator.
    ///
    /// # Example
    /// ```
    /// use ledger_core::domain::RationalPrice;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let rate = Decimal::from_str("0.123").unwrap();
    /// let price = RationalPrice::new("EUR", "USD", rate).unwrap();
    /// assert_eq!(price.value_num(), 123);
    /// assert_eq!(price.value_denom(), 1000);
    /// assert_eq!(price.to_string(), "0.123");
    /// ```
    pub fn new(
        commodity_from: impl Into<CommodityId>,
        commodity_to: impl Into<CommodityId>,
        exchange_rate: Decimal,
    ) -> NumericResult<Self> {
        let value = Fraction::from_decimal(exchange_rate)?;
        Ok(Self::with_value(commodity_from.into(), commodity_to.into(), value))
    }

    /// Create a price from a raw numerator/denominator pair.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `denominator == 0`.
    pub fn from_fraction(
        commodity_from: impl Into<CommodityId>,
        commodity_to: impl Into<CommodityId>,
        numerator: i64,
        denominator: i64,
    ) -> NumericResult<Self> {
        let value = Fraction::new(numerator, denominator)?;
        Ok(Self::with_value(commodity_from.into(), commodity_to.into(), value))
    }

    fn with_value(commodity_from: CommodityId, commodity_to: CommodityId, value: Fraction) -> Self {
        Self {
            id: PriceId::new(),
            commodity_from,
            commodity_to,
            date: Utc::now(),
            source: None,
            price_type: PriceType::default(),
            value,
        }
    }

    /// Builder method: Set the quote date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Builder method: Set the source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builder method: Set the price type
    pub fn with_price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = price_type;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn commodity_from_id(&self) -> &CommodityId {
        &self.commodity_from
    }

    pub fn commodity_to_id(&self) -> &CommodityId {
        &self.commodity_to
    }

    /// Reduced numerator
    pub fn value_num(&self) -> i64 {
        self.value.numerator()
    }

    /// Reduced denominator, always positive
    pub fn value_denom(&self) -> i64 {
        self.value.denominator()
    }

    pub fn value(&self) -> Fraction {
        self.value
    }

    /// Decimal value rounded half-up to the default 12 fractional digits
    pub fn to_decimal(&self) -> Decimal {
        self.value
            .to_decimal(NumberFormat::DEFAULT_MAX_FRACTION_DIGITS)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Replace the numerator, keeping the current denominator, and reduce.
    ///
    /// Because the pair is reduced right away, setting the numerator and then
    /// the denominator can differ from [`set_value`](Self::set_value) with the
    /// same two numbers. Prefer `set_value` when both parts change.
    pub fn set_value_num(&mut self, numerator: i64) -> NumericResult<()> {
        self.value = self.value.with_numerator(numerator)?;
        Ok(())
    }

    /// Replace the denominator, keeping the current numerator, and reduce.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator; the price is unchanged.
    pub fn set_value_denom(&mut self, denominator: i64) -> NumericResult<()> {
        self.value = self.value.with_denominator(denominator)?;
        Ok(())
    }

    /// Replace both parts at once and reduce.
    pub fn set_value(&mut self, numerator: i64, denominator: i64) -> NumericResult<()> {
        self.value = Fraction::new(numerator, denominator)?;
        Ok(())
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the value with explicit locale conventions.
    pub fn format_with(&self, format: &NumberFormat) -> String {
        format.format_fraction(self.value)
    }
}

impl Default for RationalPrice {
    fn default() -> Self {
        Self::with_value(CommodityId::default(), CommodityId::default(), Fraction::ZERO)
    }
}

/// Renders with [`NumberFormat::default`] (en-US separators).
impl fmt::Display for RationalPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&NumberFormat::default()))
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
    fn test_creating_from_exchange_rate_keeps_precision() {
        let price = RationalPrice::new("commodity1UID", "commodity2UID", dec("0.123456")).unwrap();
        assert_eq!(price.to_string(), "0.123456");

        // no padding to the previous precision (0.123000)
        let price = RationalPrice::new("commodity1UID", "commodity2UID", dec("0.123")).unwrap();
        assert_eq!(price.to_string(), "0.123");
    }

    #[test]
    fn test_format_with_german_locale() {
        let price = RationalPrice::new("commodity1UID", "commodity2UID", dec("1.234")).unwrap();
        assert_eq!(price.format_with(&NumberFormat::de_de()), "1,234");
    }

    #[test]
    fn test_to_string_bounded_for_infinite_expansion() {
        let mut price = RationalPrice::default();
        price.set_value_num(1).unwrap();
        price.set_value_denom(3).unwrap();
        assert_eq!(price.to_string(), "0.333333333333");
    }

    #[test]
    fn test_numerator_reduces_automatically() {
        let mut price = RationalPrice::default();
        price.set_value_num(2).unwrap();
        price.set_value_denom(6).unwrap();
        assert_eq!(price.value_num(), 1);
        assert_eq!(price.value_denom(), 3);
    }

    #[test]
    fn test_zero_denominator_rejected() {
        let mut price = RationalPrice::from_fraction("EUR", "USD", 3, 4).unwrap();
        assert_eq!(price.set_value_denom(0), Err(NumericError::DivisionByZero));
        // unchanged after the failed write
        assert_eq!((price.value_num(), price.value_denom()), (3, 4));

        assert_eq!(
            RationalPrice::from_fraction("EUR", "USD", 1, 0).unwrap_err(),
            NumericError::DivisionByZero
        );
    }

    #[test]
    fn test_set_value_avoids_intermediate_reduction() {
        let mut price = RationalPrice::from_fraction("EUR", "USD", 1, 2).unwrap();

        // 4/2 reduces to 2/1 before the denominator is replaced
        let mut sequential = price.clone();
        sequential.set_value_num(4).unwrap();
        sequential.set_value_denom(6).unwrap();
        assert_eq!((sequential.value_num(), sequential.value_denom()), (1, 3));

        price.set_value(4, 6).unwrap();
        assert_eq!((price.value_num(), price.value_denom()), (2, 3));
    }

    #[test]
    fn test_negative_denominator_moves_sign() {
        let price = RationalPrice::from_fraction("EUR", "USD", 5, -10).unwrap();
        assert_eq!(price.value_num(), -1);
        assert_eq!(price.value_denom(), 2);
        assert_eq!(price.to_string(), "-0.5");
    }

    #[test]
    fn test_commodity_ids_and_metadata() {
        let date = DateTime::parse_from_rfc3339("2016-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let price = RationalPrice::new("EUR", "USD", dec("1.0850"))
            .unwrap()
            .with_date(date)
            .with_source("user:xfer-dialog")
            .with_price_type(PriceType::Transaction);

        assert_eq!(price.commodity_from_id().as_str(), "EUR");
        assert_eq!(price.commodity_to_id().to_string(), "USD");
        assert_eq!(price.date, date);
        assert_eq!(price.source.as_deref(), Some("user:xfer-dialog"));
        assert_eq!(price.price_type.as_str(), "transaction");
        assert_eq!((price.value_num(), price.value_denom()), (217, 200));
    }

    #[test]
    fn test_to_decimal() {
        let price = RationalPrice::from_fraction("EUR", "USD", 1234567, 1000).unwrap();
        assert_eq!(price.to_decimal(), dec("1234.567"));
        assert_eq!(price.to_string(), "1,234.567");
    }

    #[test]
    fn test_price_type_parse() {
        assert_eq!("NAV".parse::<PriceType>(), Ok(PriceType::Nav));
        assert!("mid".parse::<PriceType>().is_err());
    }

    #[test]
    fn test_unique_ids() {
        let a = RationalPrice::default();
        let b = RationalPrice::default();
        assert_ne!(a.id, b.id);
    }
}
