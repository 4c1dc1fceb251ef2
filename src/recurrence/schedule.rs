// ============================================================================
// Recurrence
// Period type, multiplier, start and a single authoritative bound
// ============================================================================

use super::calendar::{add_periods, end_of_month, end_of_week, end_of_year};
use super::errors::{RecurrenceError, RecurrenceResult};
use super::period_type::PeriodType;
use chrono::{Local, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How far a recurrence runs.
///
/// Only one representation is stored; the other one (end time or count)
/// is derived on demand, so the pair can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecurrenceBound {
    /// Runs forever
    #[default]
    Unbounded,
    /// Occurrences strictly before this instant
    ByEndTime(NaiveDateTime),
    /// Exactly this many occurrences
    ByCount(u32),
}

/// A recurring schedule: every `multiplier` periods of `period_type`,
/// starting at `period_start`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use ledger_core::recurrence::{PeriodType, Recurrence};
///
/// let start = NaiveDate::from_ymd_opt(2015, 10, 5).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let mut monthly = Recurrence::new(PeriodType::Month, start);
/// monthly.set_count(3).unwrap();
///
/// let end = NaiveDate::from_ymd_opt(2016, 1, 5).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(monthly.period_end(), Some(end));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRecurrence", into = "RawRecurrence"))]
pub struct Recurrence {
    period_type: PeriodType,
    multiplier: u32,
    period_start: NaiveDateTime,
    bound: RecurrenceBound,
}

/// Wire form of a [`Recurrence`]; deserialized values pass the same
/// validation as the setters.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawRecurrence {
    period_type: PeriodType,
    multiplier: u32,
    period_start: NaiveDateTime,
    bound: RecurrenceBound,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRecurrence> for Recurrence {
    type Error = RecurrenceError;

    fn try_from(raw: RawRecurrence) -> RecurrenceResult<Self> {
        let recurrence = Self {
            period_type: raw.period_type,
            multiplier: raw.multiplier,
            period_start: raw.period_start,
            bound: raw.bound,
        };
        recurrence.validate()?;
        Ok(recurrence)
    }
}

#[cfg(feature = "serde")]
impl From<Recurrence> for RawRecurrence {
    fn from(recurrence: Recurrence) -> Self {
        Self {
            period_type: recurrence.period_type,
            multiplier: recurrence.multiplier,
            period_start: recurrence.period_start,
            bound: recurrence.bound,
        }
    }
}

impl Recurrence {
    /// Value of [`count`](Self::count) for an unbounded recurrence
    pub const UNBOUNDED_COUNT: i64 = -1;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Unbounded recurrence every single period from `period_start`
    pub fn new(period_type: PeriodType, period_start: NaiveDateTime) -> Self {
        Self {
            period_type,
            multiplier: 1,
            period_start,
            bound: RecurrenceBound::Unbounded,
        }
    }

    /// Unbounded recurrence starting at the current local wall-clock time
    pub fn starting_now(period_type: PeriodType) -> Self {
        Self::new(period_type, Local::now().naive_local())
    }

    /// Convert a legacy fixed-millisecond interval.
    ///
    /// Picks the longest period type that fits at least once and uses the
    /// quotient as multiplier; anything shorter than an hour becomes daily.
    pub fn from_legacy_period(period_millis: i64, period_start: NaiveDateTime) -> Self {
        let fitted = PeriodType::ALL.into_iter().rev().find_map(|period_type| {
            let multiplier = period_millis / period_type.nominal_millis();
            u32::try_from(multiplier)
                .ok()
                .filter(|m| *m > 0)
                .map(|m| (period_type, m))
        });

        let (period_type, multiplier) = fitted.unwrap_or((PeriodType::Day, 1));
        tracing::debug!(period_millis, %period_type, multiplier, "converted legacy period");

        Self {
            multiplier,
            ..Self::new(period_type, period_start)
        }
    }

    /// Builder method: Set the multiplier
    pub fn with_multiplier(mut self, multiplier: u32) -> RecurrenceResult<Self> {
        self.set_multiplier(multiplier)?;
        Ok(self)
    }

    /// Builder method: Bound by occurrence count
    pub fn with_count(mut self, count: u32) -> RecurrenceResult<Self> {
        self.set_count(count)?;
        Ok(self)
    }

    /// Builder method: Bound by end instant
    pub fn with_period_end(mut self, period_end: NaiveDateTime) -> RecurrenceResult<Self> {
        self.set_period_end(period_end)?;
        Ok(self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn period_start(&self) -> NaiveDateTime {
        self.period_start
    }

    pub fn bound(&self) -> RecurrenceBound {
        self.bound
    }

    // ========================================================================
    // Mutation
    // ========================================================================
    //
    // Each setter validates a candidate copy and only commits it on success.

    /// Set the interval multiplier.
    ///
    /// # Errors
    /// - `InvalidMultiplier` if `multiplier == 0`
    /// - `DateOutOfRange` if a count bound can no longer be stepped
    pub fn set_multiplier(&mut self, multiplier: u32) -> RecurrenceResult<()> {
        self.commit(Self {
            multiplier,
            ..self.clone()
        })
    }

    /// Move the start instant, keeping the current bound.
    pub fn set_period_start(&mut self, period_start: NaiveDateTime) -> RecurrenceResult<()> {
        self.commit(Self {
            period_start,
            ..self.clone()
        })
    }

    /// Bound the recurrence by an end instant; [`count`](Self::count) is
    /// derived from it.
    ///
    /// # Errors
    /// Returns `EndBeforeStart` if `period_end < period_start`.
    pub fn set_period_end(&mut self, period_end: NaiveDateTime) -> RecurrenceResult<()> {
        self.commit(Self {
            bound: RecurrenceBound::ByEndTime(period_end),
            ..self.clone()
        })?;
        tracing::debug!(%period_end, count = self.count(), "recurrence bounded by end time");
        Ok(())
    }

    /// Bound the recurrence by an occurrence count; [`period_end`](Self::period_end)
    /// is derived by stepping `count * multiplier` calendar periods.
    ///
    /// # Errors
    /// Returns `DateOutOfRange` if the derived end cannot be represented.
    pub fn set_count(&mut self, count: u32) -> RecurrenceResult<()> {
        self.commit(Self {
            bound: RecurrenceBound::ByCount(count),
            ..self.clone()
        })?;
        tracing::debug!(count, period_end = ?self.period_end(), "recurrence bounded by count");
        Ok(())
    }

    /// Make the recurrence unbounded
    pub fn clear_bound(&mut self) {
        self.bound = RecurrenceBound::Unbounded;
    }

    fn commit(&mut self, candidate: Self) -> RecurrenceResult<()> {
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    fn validate(&self) -> RecurrenceResult<()> {
        if self.multiplier == 0 {
            return Err(RecurrenceError::InvalidMultiplier(self.multiplier));
        }

        match self.bound {
            RecurrenceBound::Unbounded => Ok(()),
            RecurrenceBound::ByEndTime(end) if end < self.period_start => {
                Err(RecurrenceError::EndBeforeStart {
                    start: self.period_start,
                    end,
                })
            },
            RecurrenceBound::ByEndTime(_) => Ok(()),
            RecurrenceBound::ByCount(count) => self
                .occurrence(u64::from(count))
                .map(|_| ())
                .ok_or(RecurrenceError::DateOutOfRange),
        }
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Start of the `index`-th occurrence (0-based), stepped directly from
    /// the start so month-end clamping does not accumulate.
    pub fn occurrence(&self, index: u64) -> Option<NaiveDateTime> {
        let periods = index.checked_mul(u64::from(self.multiplier))?;
        add_periods(self.period_start, self.period_type, periods)
    }

    /// End instant, explicit or derived from the count; None when unbounded
    pub fn period_end(&self) -> Option<NaiveDateTime> {
        match self.bound {
            RecurrenceBound::Unbounded => None,
            RecurrenceBound::ByEndTime(end) => Some(end),
            RecurrenceBound::ByCount(count) => self.occurrence(u64::from(count)),
        }
    }

    /// Number of occurrences, explicit or derived from the end time;
    /// None when unbounded
    pub fn occurrences(&self) -> Option<u32> {
        match self.bound {
            RecurrenceBound::Unbounded => None,
            RecurrenceBound::ByEndTime(end) => Some(self.occurrences_before(end)),
            RecurrenceBound::ByCount(count) => Some(count),
        }
    }

    /// Number of occurrences, or [`UNBOUNDED_COUNT`](Self::UNBOUNDED_COUNT)
    /// (-1) when unbounded
    pub fn count(&self) -> i64 {
        self.occurrences()
            .map_or(Self::UNBOUNDED_COUNT, i64::from)
    }

    /// Count of occurrences starting strictly before `end`.
    ///
    /// A final partial period is not an extra occurrence: weekly×2 from
    /// 2016-06-06 09:00 to 2016-08-29 10:00 yields 7.
    fn occurrences_before(&self, end: NaiveDateTime) -> u32 {
        if end <= self.period_start {
            return 0;
        }

        // Nominal estimate, then walk to the exact calendar boundary
        let elapsed = i128::from((end - self.period_start).num_milliseconds());
        let interval = i128::from(self.multiplier) * i128::from(self.period());
        let mut index = u64::try_from(elapsed / interval).unwrap_or(0);

        while index > 0 && !self.starts_before(index - 1, end) {
            index -= 1;
        }
        while index < u64::from(u32::MAX) && self.starts_before(index, end) {
            index += 1;
        }

        u32::try_from(index).unwrap_or(u32::MAX)
    }

    fn starts_before(&self, index: u64, end: NaiveDateTime) -> bool {
        self.occurrence(index).is_some_and(|start| start < end)
    }

    /// First occurrence strictly after `instant` that lies within the bound
    pub fn next_occurrence_after(&self, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut index = u64::from(self.occurrences_before(instant));
        let mut next = self.occurrence(index)?;
        if next <= instant {
            index += 1;
            next = self.occurrence(index)?;
        }

        let within = match self.bound {
            RecurrenceBound::Unbounded => true,
            RecurrenceBound::ByEndTime(end) => next < end,
            RecurrenceBound::ByCount(count) => index < u64::from(count),
        };
        within.then_some(next)
    }

    /// Nominal duration of one period of this type in milliseconds.
    ///
    /// Independent of the multiplier; see [`interval_millis`](Self::interval_millis).
    pub fn period(&self) -> i64 {
        self.period_type.nominal_millis()
    }

    /// Nominal duration between two occurrences (`multiplier * period`),
    /// saturating at `i64::MAX`
    pub fn interval_millis(&self) -> i64 {
        i64::from(self.multiplier).saturating_mul(self.period())
    }

    /// Whole days from `as_of` to the end of the current period window.
    ///
    /// The window ends `multiplier - 1` periods after the end of the
    /// current hour/day, ISO week, month or year. This is a coarse bucket,
    /// so HOUR×2 gives 0 and DAY×2 gives 1.
    pub fn days_left_in_current_period(&self, as_of: NaiveDateTime) -> i64 {
        let interval = u64::from(self.multiplier.saturating_sub(1));
        let window_end = match self.period_type {
            PeriodType::Hour | PeriodType::Day => add_periods(as_of, self.period_type, interval),
            PeriodType::Week => end_of_week(as_of)
                .and_then(|end| add_periods(end, PeriodType::Week, interval)),
            PeriodType::Month => end_of_month(as_of)
                .and_then(|end| add_periods(end, PeriodType::Month, interval)),
            PeriodType::Year => end_of_year(as_of)
                .and_then(|end| add_periods(end, PeriodType::Year, interval)),
        };

        window_end.map_or(0, |end| (end - as_of).num_days())
    }

    /// Number of `multiplier`-sized periods needed for a horizon of
    /// `periods` units.
    ///
    /// Hourly and daily recurrences report the horizon unchanged; longer
    /// period types divide it by the multiplier.
    pub fn number_of_periods(&self, periods: u32) -> u32 {
        match self.period_type {
            PeriodType::Hour | PeriodType::Day => periods,
            PeriodType::Week | PeriodType::Month | PeriodType::Year => periods / self.multiplier,
        }
    }
}
