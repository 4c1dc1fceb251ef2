// ============================================================================
// Basic Usage Example
// ============================================================================

use chrono::NaiveDate;
use ledger_core::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn main() {
    #[cfg(feature = "logging")]
    ledger_core::utils::init_logging(true);

    println!("=== Ledger Core Example ===\n");

    // Exchange rates
    let rate = Decimal::from_str("1234.5678").unwrap();
    let price = RationalPrice::new("EUR", "USD", rate)
        .unwrap()
        .with_source("user:price-editor");
    println!(
        "EUR -> USD: {}/{}",
        price.value_num(),
        price.value_denom()
    );
    for tag in ["en-US", "de-DE", "fr-FR", "de-CH"] {
        if let Some(format) = NumberFormat::for_locale(tag) {
            println!("  {:<6} {}", tag, price.format_with(&format));
        }
    }

    let third = RationalPrice::from_fraction("GOLD", "USD", 1, 3).unwrap();
    println!("One third renders as {}\n", third);

    // Recurring transactions
    let start = NaiveDate::from_ymd_opt(2016, 6, 6)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let mut rent = Recurrence::new(PeriodType::Week, start)
        .with_multiplier(2)
        .unwrap();

    let end = NaiveDate::from_ymd_opt(2016, 8, 29)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    rent.set_period_end(end).unwrap();

    println!("{}", rent.repeat_string());
    println!("Occurrences: {}", rent.count());
    println!("Rule: {}", rent.rule_string());

    for index in 0..rent.occurrences().unwrap_or(0) {
        if let Some(date) = rent.occurrence(u64::from(index)) {
            println!("  #{:<2} {}", index + 1, date);
        }
    }

    let parsed: Recurrence = rent.rule_string().parse().unwrap();
    println!("\nParsed back equal: {}", parsed == rent);
}
