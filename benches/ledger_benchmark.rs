// ============================================================================
// Ledger Core Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Fractions - Reduction and bounded decimal rendering
// 2. Recurrence - Count derivation and rule string round trips

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use ledger_core::prelude::*;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

// ============================================================================
// Fraction Benchmarks
// ============================================================================

fn benchmark_fraction_reduction(c: &mut Criterion) {
    c.bench_function("fraction_reduce", |b| {
        b.iter(|| black_box(Fraction::new(black_box(1_234_567_890), black_box(9_876_543_210))));
    });
}

fn benchmark_price_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_rendering");

    let cases = [("terminating", 1234567, 1000), ("repeating", 1, 3), ("large", i64::MAX, 7)];
    for (name, num, denom) in cases {
        let price = RationalPrice::from_fraction("EUR", "USD", num, denom).unwrap();
        group.bench_with_input(BenchmarkId::new("en_us", name), &price, |b, price| {
            b.iter(|| black_box(price.to_string()));
        });
        let german = NumberFormat::de_de();
        group.bench_with_input(BenchmarkId::new("de_de", name), &price, |b, price| {
            b.iter(|| black_box(price.format_with(&german)));
        });
    }

    group.finish();
}

// ============================================================================
// Recurrence Benchmarks
// ============================================================================

fn benchmark_count_from_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_from_end");

    for period_type in PeriodType::ALL {
        let recurrence = Recurrence::new(period_type, at(2000, 1, 31))
            .with_period_end(at(2030, 6, 15))
            .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(period_type),
            &recurrence,
            |b, recurrence| {
                b.iter(|| black_box(recurrence.count()));
            },
        );
    }

    group.finish();
}

fn benchmark_rule_round_trip(c: &mut Criterion) {
    let recurrence = Recurrence::new(PeriodType::Week, at(2016, 6, 6))
        .with_multiplier(2)
        .unwrap()
        .with_count(26)
        .unwrap();

    c.bench_function("rule_round_trip", |b| {
        b.iter(|| {
            let rule = recurrence.rule_string();
            black_box(rule.parse::<Recurrence>())
        });
    });
}

criterion_group!(
    benches,
    benchmark_fraction_reduction,
    benchmark_price_rendering,
    benchmark_count_from_end,
    benchmark_rule_round_trip,
);
criterion_main!(benches);
