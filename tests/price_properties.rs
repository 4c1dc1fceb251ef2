//! Property-based tests for exact prices.
//!
//! Uses `proptest` to check reduction and rendering invariants over random
//! numerator/denominator pairs and decimal inputs.

use ledger_core::numeric::gcd;
use ledger_core::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

// =============================================================================
// Generators
// =============================================================================

/// Non-zero denominators, both signs.
fn arb_denominator() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..=1_000_000_000, -1_000_000_000i64..=-1]
}

/// Decimal strings with up to 12 fractional digits.
fn arb_decimal_string() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        0u64..1_000_000,
        proptest::option::of("[0-9]{0,11}[1-9]"),
    )
        .prop_map(|(negative, integer, fraction)| {
            let sign = if negative && (integer != 0 || fraction.is_some()) {
                "-"
            } else {
                ""
            };
            match fraction {
                Some(fraction) => format!("{}{}.{}", sign, integer, fraction),
                None => format!("{}{}", sign, integer),
            }
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn reduced_after_construction(num in any::<i64>(), denom in arb_denominator()) {
        match Fraction::new(num, denom) {
            Ok(f) => {
                prop_assert!(f.denominator() > 0);
                prop_assert_eq!(gcd(f.numerator().unsigned_abs(), f.denominator().unsigned_abs()), 1);
            }
            // only i64::MIN over a negative denominator cannot flip its sign
            Err(e) => {
                prop_assert_eq!(e, NumericError::Overflow);
                prop_assert!(denom < 0);
            }
        }
    }

    #[test]
    fn reduction_is_scale_invariant(
        num in -1_000_000i64..1_000_000,
        denom in arb_denominator(),
        k in prop_oneof![1i64..1000, -1000i64..-1],
    ) {
        let plain = Fraction::new(num, denom).unwrap();
        let scaled = Fraction::new(num * k, denom * k).unwrap();
        prop_assert_eq!(plain, scaled);
    }

    #[test]
    fn rendering_never_panics(num in any::<i64>(), denom in any::<i64>().prop_filter("non-zero", |d| *d != 0)) {
        if let Ok(price) = RationalPrice::from_fraction("A", "B", num, denom) {
            let rendered = price.to_string();
            prop_assert!(!rendered.is_empty());
            let _ = price.format_with(&NumberFormat::de_de());
        }
    }

    #[test]
    fn terminating_decimals_round_trip(text in arb_decimal_string()) {
        let value = Decimal::from_str(&text).unwrap();
        let price = RationalPrice::new("A", "B", value).unwrap();
        let plain = NumberFormat::en_us().without_grouping();
        prop_assert_eq!(price.format_with(&plain), text);
    }

    #[test]
    fn rendering_is_bounded(num in any::<i64>(), denom in 1i64..i64::MAX, digits in 0u32..=18) {
        let f = Fraction::new(num, denom).unwrap();
        prop_assert!(f.to_decimal(digits).scale() <= digits);
    }
}

#[test]
fn zero_denominator_is_an_error() {
    assert_eq!(Fraction::new(5, 0), Err(NumericError::DivisionByZero));
    assert_eq!(
        RationalPrice::from_fraction("A", "B", 5, 0).unwrap_err(),
        NumericError::DivisionByZero
    );
}
