// ============================================================================
// Recurrence Descriptions
// Human-readable text for schedules and periods
// ============================================================================

use super::period_type::PeriodType;
use super::schedule::Recurrence;
use chrono::Datelike;

impl Recurrence {
    /// "Weekly", "Every 3 days", ...
    pub fn frequency_repeat_string(&self) -> String {
        if self.multiplier() == 1 {
            let adjective = match self.period_type() {
                PeriodType::Hour => "Hourly",
                PeriodType::Day => "Daily",
                PeriodType::Week => "Weekly",
                PeriodType::Month => "Monthly",
                PeriodType::Year => "Yearly",
            };
            return adjective.to_string();
        }

        format!(
            "Every {} {}",
            self.multiplier(),
            self.period_type().unit_name(true)
        )
    }

    /// Full English description, e.g.
    /// "Every 2 weeks on Monday, until Aug 29, 2016".
    pub fn repeat_string(&self) -> String {
        let mut text = self.frequency_repeat_string();

        if self.period_type() == PeriodType::Week {
            text.push_str(&format!(" on {}", self.period_start().format("%A")));
        }

        if let Some(end) = self.period_end() {
            text.push_str(&format!(", until {}", end.format("%b %-d, %Y")));
        }

        text
    }

    /// Label for the period a schedule starts in: weekday name for daily,
    /// ISO week number for weekly, month name for monthly, year for yearly.
    /// Hourly schedules fall back to "Period {period_num}".
    pub fn text_of_current_period(&self, period_num: u32) -> String {
        let start = self.period_start();
        match self.period_type() {
            PeriodType::Hour => format!("Period {}", period_num),
            PeriodType::Day => start.format("%A").to_string(),
            PeriodType::Week => start.iso_week().week().to_string(),
            PeriodType::Month => start.format("%B").to_string(),
            PeriodType::Year => start.year().to_string(),
        }
    }
}
