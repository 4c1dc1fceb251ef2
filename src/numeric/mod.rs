// ============================================================================
// Numeric Module
// Exact rational arithmetic for prices and exchange rates
// ============================================================================
//
// This module provides:
// - Fraction: i64 numerator/denominator, always in lowest terms
// - NumberFormat: locale presentation of decimal expansions
// - NumericError: Error types for fraction construction and mutation
//
// Design principles:
// - No floating-point operations
// - Construction and mutation return Result (no panics)
// - Rendering is infallible and always bounded in length
// - Digit computation is locale-free; separators are applied last

mod errors;
mod format;
mod fraction;

pub use errors::{NumericError, NumericResult};
pub use format::NumberFormat;
pub use fraction::{gcd, Fraction};
