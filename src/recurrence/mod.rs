// ============================================================================
// Recurrence Module
// Calendar-correct recurrence rules for scheduled transactions and budgets
// ============================================================================
//
// This module provides:
// - PeriodType: HOUR, DAY, WEEK, MONTH, YEAR and their nominal durations
// - Recurrence: period type, multiplier, start and a single bound
//   (end time or count, the other derived on demand)
// - Rule strings: RRULE-style serialization and parsing
// - RecurrenceError: Error types raised at the point of mutation
//
// Nominal durations are only used for estimates; occurrences are always
// stepped with calendar arithmetic.

mod calendar;
mod describe;
mod errors;
mod period_type;
mod rule;
mod schedule;

pub use calendar::add_periods;
pub use errors::{RecurrenceError, RecurrenceResult};
pub use period_type::{
    PeriodType, DAY_MILLIS, HOUR_MILLIS, MINUTE_MILLIS, MONTH_MILLIS, SECOND_MILLIS, WEEK_MILLIS,
    YEAR_MILLIS,
};
pub use rule::{format_rule, parse_rule};
pub use schedule::{Recurrence, RecurrenceBound};
