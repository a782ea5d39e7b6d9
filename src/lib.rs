//! County monthly temperature map service.
//!
//! Ingests daily station temperature observations for the 2016–2020
//! window, aggregates them into county-level monthly TMAX/TMIN summaries,
//! and serves an interactive county map: pick a year, a month, and a
//! statistic, and the service joins the aggregate table against the county
//! boundary geometry and republishes a refreshed GeoJSON dataset to the
//! rendering surface.
//!
//! Module map:
//! - `model` — shared domain types and the error taxonomy.
//! - `config` — TOML application configuration.
//! - `logging` — console/file logging backend for the `log` facade.
//! - `stations` — station→county reference index.
//! - `ingest` — fail-fast loaders for the three input files.
//! - `analysis` — unit conversion and the aggregation pipeline.
//! - `assemble` — per-selection geometry join and GeoJSON payload.
//! - `controller` — the selection state machine driving the surface.
//! - `plot` — style table and the rendering-surface boundary.

pub mod analysis;
pub mod assemble;
pub mod config;
pub mod controller;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod plot;
pub mod stations;
