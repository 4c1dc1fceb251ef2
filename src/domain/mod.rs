// ============================================================================
// Domain Models Module
// Contains the ledger-facing entities built on the numeric core
// ============================================================================

pub mod price;

pub use price::{CommodityId, PriceId, PriceType, RationalPrice};
