// ============================================================================
// Rule Strings
// RRULE-style serialization and parsing of recurrences
// ============================================================================
//
// Grammar (keys in any order, ';' separated, trailing ';' allowed):
//
//   FREQ=<HOURLY|DAILY|WEEKLY|MONTHLY|YEARLY>   required
//   INTERVAL=<n>                                 default 1
//   DTSTART=<YYYYMMDDTHHMMSS[.fff]>              required
//   COUNT=<n> | UNTIL=<YYYYMMDDTHHMMSS[.fff]>    optional, mutually exclusive
//   BYDAY=<MO..SU>                               single day, must match DTSTART
//   BYMONTHDAY=<d>, BYMONTH=<m>                  must match DTSTART
//
// Fractional seconds are written only when present (3, 6 or 9 digits).
// An optional leading "RRULE:" is ignored.

use super::errors::{RecurrenceError, RecurrenceResult};
use super::period_type::PeriodType;
use super::schedule::{Recurrence, RecurrenceBound};
use chrono::{Datelike, NaiveDateTime, Weekday};

const SEPARATOR: char = ';';
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S%.f";

/// Two-letter RRULE weekday code
fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Serialize a recurrence. Never empty.
///
/// Count-bounded rules carry `COUNT`, end-bounded rules carry the exact
/// `UNTIL` instant, and weekly rules add the start weekday as `BYDAY`.
pub fn format_rule(recurrence: &Recurrence) -> String {
    let period_type = recurrence.period_type();
    let start = recurrence.period_start();

    let mut parts = vec![
        format!("FREQ={}", period_type.frequency_description()),
        format!("INTERVAL={}", recurrence.multiplier()),
        format!("DTSTART={}", start.format(DATE_TIME_FORMAT)),
    ];

    match recurrence.bound() {
        RecurrenceBound::Unbounded => {},
        RecurrenceBound::ByCount(count) => parts.push(format!("COUNT={}", count)),
        RecurrenceBound::ByEndTime(end) => {
            parts.push(format!("UNTIL={}", end.format(DATE_TIME_FORMAT)))
        },
    }

    if period_type == PeriodType::Week {
        parts.push(format!("BYDAY={}", weekday_code(start.weekday())));
    }

    let mut rule = parts.join(&SEPARATOR.to_string());
    rule.push(SEPARATOR);
    rule
}

fn invalid(reason: impl Into<String>) -> RecurrenceError {
    RecurrenceError::InvalidRule(reason.into())
}

fn set_once<T>(slot: &mut Option<T>, key: &str, value: T) -> RecurrenceResult<()> {
    if slot.is_some() {
        return Err(invalid(format!("duplicate {}", key)));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> RecurrenceResult<T> {
    value
        .parse()
        .map_err(|_| invalid(format!("{} is not a valid number: '{}'", key, value)))
}

fn parse_instant(key: &str, value: &str) -> RecurrenceResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map_err(|e| invalid(format!("{} '{}': {}", key, value, e)))
}

fn parse_weekday(value: &str) -> RecurrenceResult<Weekday> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|day| weekday_code(*day) == value)
    .ok_or_else(|| invalid(format!("unsupported BYDAY '{}'", value)))
}

/// Parse a rule string produced by [`format_rule`] (or a compatible one).
pub fn parse_rule(rule: &str) -> RecurrenceResult<Recurrence> {
    let rule = rule.trim();
    let rule = rule.strip_prefix("RRULE:").unwrap_or(rule);

    let mut frequency: Option<PeriodType> = None;
    let mut interval: Option<u32> = None;
    let mut start: Option<NaiveDateTime> = None;
    let mut count: Option<u32> = None;
    let mut until: Option<NaiveDateTime> = None;
    let mut by_day: Option<Weekday> = None;
    let mut by_month_day: Option<u32> = None;
    let mut by_month: Option<u32> = None;

    for part in rule.split(SEPARATOR).map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| invalid(format!("malformed part '{}'", part)))?;
        let key = key.trim().to_ascii_uppercase();
        let value = value.trim();

        match key.as_str() {
            "FREQ" => {
                let period_type = PeriodType::from_frequency_description(value)
                    .ok_or_else(|| invalid(format!("unsupported FREQ '{}'", value)))?;
                set_once(&mut frequency, "FREQ", period_type)?
            },
            "INTERVAL" => set_once(&mut interval, "INTERVAL", parse_number(&key, value)?)?,
            "DTSTART" => set_once(&mut start, "DTSTART", parse_instant(&key, value)?)?,
            "COUNT" => set_once(&mut count, "COUNT", parse_number(&key, value)?)?,
            "UNTIL" => set_once(&mut until, "UNTIL", parse_instant(&key, value)?)?,
            "BYDAY" => set_once(&mut by_day, "BYDAY", parse_weekday(&value.to_ascii_uppercase())?)?,
            "BYMONTHDAY" => set_once(&mut by_month_day, "BYMONTHDAY", parse_number(&key, value)?)?,
            "BYMONTH" => set_once(&mut by_month, "BYMONTH", parse_number(&key, value)?)?,
            other => return Err(invalid(format!("unsupported part '{}'", other))),
        }
    }

    let period_type = frequency.ok_or_else(|| invalid("missing FREQ"))?;
    let start = start.ok_or_else(|| invalid("missing DTSTART"))?;

    if by_day.is_some_and(|day| day != start.weekday()) {
        return Err(invalid("BYDAY does not match DTSTART"));
    }
    if by_month_day.is_some_and(|day| day != start.day()) {
        return Err(invalid("BYMONTHDAY does not match DTSTART"));
    }
    if by_month.is_some_and(|month| month != start.month()) {
        return Err(invalid("BYMONTH does not match DTSTART"));
    }

    let mut recurrence = Recurrence::new(period_type, start).with_multiplier(interval.unwrap_or(1))?;
    match (count, until) {
        (Some(_), Some(_)) => return Err(invalid("COUNT and UNTIL are mutually exclusive")),
        (Some(count), None) => recurrence.set_count(count)?,
        (None, Some(until)) => recurrence.set_period_end(until)?,
        (None, None) => {},
    }

    tracing::debug!(rule, ?recurrence, "parsed recurrence rule");
    Ok(recurrence)
}

impl Recurrence {
    /// Compact rule string; see [`format_rule`]
    pub fn rule_string(&self) -> String {
        format_rule(self)
    }
}

impl std::str::FromStr for Recurrence {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rule(s)
    }
}
