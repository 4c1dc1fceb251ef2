// ============================================================================
// Calendar Arithmetic
// Calendar-correct stepping over wall-clock instants
// ============================================================================
//
// Months and years are added as calendar units: the day of month is kept
// and clamped to the last day when the target month is shorter
// (2016-01-31 + 1 month = 2016-02-29). Hours, days and weeks are exact
// durations on wall-clock time.

use super::period_type::PeriodType;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeDelta};

/// Step `instant` forward by `count` whole periods.
///
/// Returns None when the result leaves chrono's representable range.
pub fn add_periods(
    instant: NaiveDateTime,
    period_type: PeriodType,
    count: u64,
) -> Option<NaiveDateTime> {
    match period_type {
        PeriodType::Hour => {
            let hours = TimeDelta::try_hours(i64::try_from(count).ok()?)?;
            instant.checked_add_signed(hours)
        },
        PeriodType::Day => instant.checked_add_days(Days::new(count)),
        PeriodType::Week => instant.checked_add_days(Days::new(count.checked_mul(7)?)),
        PeriodType::Month => instant.checked_add_months(Months::new(u32::try_from(count).ok()?)),
        PeriodType::Year => {
            let months = u32::try_from(count.checked_mul(12)?).ok()?;
            instant.checked_add_months(Months::new(months))
        },
    }
}

/// Sunday of the ISO week containing `instant`, same time of day
pub fn end_of_week(instant: NaiveDateTime) -> Option<NaiveDateTime> {
    let remaining = 6 - u64::from(instant.weekday().num_days_from_monday());
    instant.checked_add_days(Days::new(remaining))
}

/// Last day of the month containing `instant`, same time of day
pub fn end_of_month(instant: NaiveDateTime) -> Option<NaiveDateTime> {
    let last_day = NaiveDate::from_ymd_opt(instant.year(), instant.month(), 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()?;
    Some(last_day.and_time(instant.time()))
}

/// 31 December of the year containing `instant`, same time of day
pub fn end_of_year(instant: NaiveDateTime) -> Option<NaiveDateTime> {
    let last_day = NaiveDate::from_ymd_opt(instant.year(), 12, 31)?;
    Some(last_day.and_time(instant.time()))
}
