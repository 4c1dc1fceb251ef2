// ============================================================================
// Period Types
// Calendar units of recurrence and their nominal durations
// ============================================================================

use super::errors::RecurrenceError;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Nominal Durations (milliseconds)
// ============================================================================
//
// Estimates only. Months and years vary in length, so date stepping always
// goes through calendar arithmetic instead of these offsets.

pub const SECOND_MILLIS: i64 = 1000;
pub const MINUTE_MILLIS: i64 = 60 * SECOND_MILLIS;
pub const HOUR_MILLIS: i64 = 60 * MINUTE_MILLIS;
pub const DAY_MILLIS: i64 = 24 * HOUR_MILLIS;
pub const WEEK_MILLIS: i64 = 7 * DAY_MILLIS;
pub const MONTH_MILLIS: i64 = 30 * DAY_MILLIS;
pub const YEAR_MILLIS: i64 = 12 * MONTH_MILLIS;

/// Calendar unit a recurrence steps by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PeriodType {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl PeriodType {
    /// All period types, shortest first
    pub const ALL: [PeriodType; 5] = [
        PeriodType::Hour,
        PeriodType::Day,
        PeriodType::Week,
        PeriodType::Month,
        PeriodType::Year,
    ];

    /// Nominal duration of one period in milliseconds
    pub const fn nominal_millis(self) -> i64 {
        match self {
            PeriodType::Hour => HOUR_MILLIS,
            PeriodType::Day => DAY_MILLIS,
            PeriodType::Week => WEEK_MILLIS,
            PeriodType::Month => MONTH_MILLIS,
            PeriodType::Year => YEAR_MILLIS,
        }
    }

    /// RRULE `FREQ` value
    pub const fn frequency_description(self) -> &'static str {
        match self {
            PeriodType::Hour => "HOURLY",
            PeriodType::Day => "DAILY",
            PeriodType::Week => "WEEKLY",
            PeriodType::Month => "MONTHLY",
            PeriodType::Year => "YEARLY",
        }
    }

    pub fn from_frequency_description(freq: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.frequency_description().eq_ignore_ascii_case(freq.trim()))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PeriodType::Hour => "HOUR",
            PeriodType::Day => "DAY",
            PeriodType::Week => "WEEK",
            PeriodType::Month => "MONTH",
            PeriodType::Year => "YEAR",
        }
    }

    /// English unit name, e.g. "week" / "weeks"
    pub const fn unit_name(self, plural: bool) -> &'static str {
        match (self, plural) {
            (PeriodType::Hour, false) => "hour",
            (PeriodType::Hour, true) => "hours",
            (PeriodType::Day, false) => "day",
            (PeriodType::Day, true) => "days",
            (PeriodType::Week, false) => "week",
            (PeriodType::Week, true) => "weeks",
            (PeriodType::Month, false) => "month",
            (PeriodType::Month, true) => "months",
            (PeriodType::Year, false) => "year",
            (PeriodType::Year, true) => "years",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PeriodType {
    type Err = RecurrenceError;

    /// Accepts either the unit name (`"MONTH"`) or the RRULE frequency
    /// (`"MONTHLY"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_frequency_description(s))
            .ok_or_else(|| RecurrenceError::InvalidRule(format!("unknown period type '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(HOUR_MILLIS, 3_600_000);
        assert_eq!(DAY_MILLIS, 86_400_000);
        assert_eq!(WEEK_MILLIS, 604_800_000);
        assert_eq!(MONTH_MILLIS, 2_592_000_000);
        assert_eq!(YEAR_MILLIS, 31_104_000_000);
    }

    #[test]
    fn test_nominal_millis() {
        assert_eq!(PeriodType::Hour.nominal_millis(), HOUR_MILLIS);
        assert_eq!(PeriodType::Year.nominal_millis(), YEAR_MILLIS);
    }

    #[test]
    fn test_frequency_round_trip() {
        for period in PeriodType::ALL {
            let freq = period.frequency_description();
            assert_eq!(PeriodType::from_frequency_description(freq), Some(period));
        }
        assert_eq!(PeriodType::from_frequency_description("FORTNIGHTLY"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("week".parse::<PeriodType>(), Ok(PeriodType::Week));
        assert_eq!("Monthly".parse::<PeriodType>(), Ok(PeriodType::Month));
        assert!("decade".parse::<PeriodType>().is_err());
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(PeriodType::Day.unit_name(false), "day");
        assert_eq!(PeriodType::Week.unit_name(true), "weeks");
    }
}
