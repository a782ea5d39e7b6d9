//! Aggregation pipeline for the map service.
//!
//! Submodules:
//! - `units` — tenths-of-°C → °F conversion.
//! - `aggregate` — county/monthly grouping, averaging, wide pivot, and the
//!   persisted aggregate artifact.

pub mod aggregate;
pub mod units;
