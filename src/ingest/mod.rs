//! Input-file loaders for the map service.
//!
//! Everything here runs once at startup and is fail-fast: a malformed input
//! file prevents the service from starting at all (no partial or degraded
//! map is ever shown).
//!
//! Submodules:
//! - `observations` — raw daily temperature CSV → `StationRecord`s.
//! - `geometry` — county boundary GeoJSON → `CountyGeometryStore`.

pub mod geometry;
pub mod observations;
