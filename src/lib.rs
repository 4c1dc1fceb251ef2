// ============================================================================
// Ledger Core Library
// Exact prices and calendar-correct recurrence rules for bookkeeping
// ============================================================================

//! # Ledger Core
//!
//! Two independent building blocks for financial records.
//!
//! ## Features
//!
//! - **Exact prices**: exchange rates stored as reduced `i64` fractions,
//!   built from exact decimals without floating-point drift
//! - **Bounded rendering**: locale-aware decimal output that never fails,
//!   even for non-terminating fractions like 1/3
//! - **Recurrence rules**: hourly to yearly schedules with calendar-correct
//!   month and year stepping
//! - **Single bound**: a recurrence is bounded by end time *or* count; the
//!   other is always derived, never stored
//! - **Rule strings**: compact RRULE-style serialization that parses back
//!   to an equal recurrence
//!
//! ## Example
//!
//! ```rust
//! use ledger_core::prelude::*;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! // Exchange rate EUR -> USD
//! let price = RationalPrice::new("EUR", "USD", Decimal::from_str("1.0850").unwrap()).unwrap();
//! assert_eq!((price.value_num(), price.value_denom()), (217, 200));
//! assert_eq!(price.format_with(&NumberFormat::de_de()), "1,085");
//!
//! // Monthly budget, three occurrences
//! let start = NaiveDate::from_ymd_opt(2015, 10, 5).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let budget = Recurrence::new(PeriodType::Month, start).with_count(3).unwrap();
//! assert_eq!(budget.rule_string(), "FREQ=MONTHLY;INTERVAL=1;DTSTART=20151005T000000;COUNT=3;");
//!
//! let parsed: Recurrence = budget.rule_string().parse().unwrap();
//! assert_eq!(parsed, budget);
//! ```

pub mod domain;
pub mod numeric;
pub mod recurrence;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{CommodityId, PriceId, PriceType, RationalPrice};
    pub use crate::numeric::{Fraction, NumberFormat, NumericError, NumericResult};
    pub use crate::recurrence::{
        PeriodType, Recurrence, RecurrenceBound, RecurrenceError, RecurrenceResult,
    };
}
