//! Core data types for the county temperature map service.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no I/O — only types, the month-name table, and the load-time
//! error taxonomy.

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Statistic kinds
// ---------------------------------------------------------------------------

/// Which daily temperature statistic a record or selection refers to.
///
/// The raw observation file tags rows with the wire names `TMAX`/`TMIN`;
/// the selection widget emits the long display labels. Both map here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Max,
    Min,
}

impl StatKind {
    /// Column/wire name as it appears in the observation file and the
    /// aggregate artifact header (`TMAX` / `TMIN`).
    pub fn field_name(&self) -> &'static str {
        match self {
            StatKind::Max => "TMAX",
            StatKind::Min => "TMIN",
        }
    }

    /// Label shown in the statistic dropdown.
    pub fn display_label(&self) -> &'static str {
        match self {
            StatKind::Max => "Average Maximum Temperature",
            StatKind::Min => "Average Minimum Temperature",
        }
    }

    /// Parses the wire name. Anything other than TMAX/TMIN (the raw file
    /// also carries precipitation and snow rows) returns `None`.
    pub fn from_field_name(name: &str) -> Option<StatKind> {
        match name {
            "TMAX" => Some(StatKind::Max),
            "TMIN" => Some(StatKind::Min),
            _ => None,
        }
    }

    /// Parses the dropdown display label.
    pub fn from_display_label(label: &str) -> Option<StatKind> {
        match label {
            "Average Maximum Temperature" => Some(StatKind::Max),
            "Average Minimum Temperature" => Some(StatKind::Min),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A single daily temperature observation from one station.
///
/// `raw_value` is in tenths of a degree Celsius, exactly as recorded in the
/// raw weather file. Conversion to °F happens only after aggregation, in
/// `analysis::units`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub station_id: String,
    pub date: NaiveDate,
    pub kind: StatKind,
    pub raw_value: f64,
}

/// One county's monthly climate summary, in °F rounded to 2 decimals.
///
/// Produced by `analysis::aggregate::build_county_monthly`; unique on
/// (county, year, month). A county/month with data for only one statistic
/// keeps `None` in the other field — never interpolated, never dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyAggregate {
    pub county: String,
    pub year: i32,
    pub month: u32,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
}

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// First year covered by the observation window.
pub const YEAR_MIN: i32 = 2016;
/// Last year covered by the observation window.
pub const YEAR_MAX: i32 = 2020;

/// The (year, month, statistic) triple currently selected by the user.
///
/// Exactly one `FilterState` is live per session, owned by the
/// `SelectionController`; no other module mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub year: i32,
    pub month: u32,
    pub stat: StatKind,
}

impl FilterState {
    /// Initial selection: 2020, January, maximum temperature.
    pub fn initial() -> FilterState {
        FilterState {
            year: YEAR_MAX,
            month: 1,
            stat: StatKind::Max,
        }
    }
}

// ---------------------------------------------------------------------------
// Month names
// ---------------------------------------------------------------------------

/// Three-letter month abbreviations in calendar order, as the month
/// dropdown presents them.
pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Maps a dropdown abbreviation to its 1-based month number.
pub fn month_number(abbr: &str) -> Option<u32> {
    MONTH_ABBR
        .iter()
        .position(|&m| m == abbr)
        .map(|i| i as u32 + 1)
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Load-time failures. All of these are fatal: the service refuses to start
/// on partial or malformed input rather than show a degraded map.
///
/// Per-row gaps discovered after a successful load (a station with no county
/// link, a county/month missing one statistic, a geometry county with no
/// aggregate row) are not errors — they are absorbed by the drop/fill
/// policies in `analysis` and `assemble`.
#[derive(Debug, Error)]
pub enum WxError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{column}' in {file}")]
    MissingColumn { column: String, file: String },

    #[error("unparsable date '{raw}' for station {station_id} (expected YYYYMMDD)")]
    BadDate { station_id: String, raw: String },

    #[error("non-numeric value '{raw}' for station {station_id}")]
    BadValue { station_id: String, raw: String },

    #[error("bad county geometry: {0}")]
    BadGeometry(String),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_kind_field_names_round_trip() {
        for kind in [StatKind::Max, StatKind::Min] {
            assert_eq!(StatKind::from_field_name(kind.field_name()), Some(kind));
            assert_eq!(
                StatKind::from_display_label(kind.display_label()),
                Some(kind)
            );
        }
    }

    #[test]
    fn test_non_temperature_kinds_are_rejected() {
        // PRCP, SNOW and friends appear in the raw file but must never
        // reach the aggregation pipeline.
        for other in ["PRCP", "SNOW", "SNWD", "tmax", ""] {
            assert_eq!(StatKind::from_field_name(other), None, "accepted '{other}'");
        }
    }

    #[test]
    fn test_month_number_covers_all_twelve() {
        assert_eq!(month_number("Jan"), Some(1));
        assert_eq!(month_number("Jun"), Some(6));
        assert_eq!(month_number("Dec"), Some(12));
        for (i, abbr) in MONTH_ABBR.iter().enumerate() {
            assert_eq!(month_number(abbr), Some(i as u32 + 1));
        }
    }

    #[test]
    fn test_month_number_rejects_unknown_names() {
        assert_eq!(month_number("January"), None);
        assert_eq!(month_number("jan"), None);
        assert_eq!(month_number(""), None);
    }

    #[test]
    fn test_initial_filter_state() {
        let f = FilterState::initial();
        assert_eq!(f.year, 2020);
        assert_eq!(f.month, 1);
        assert_eq!(f.stat, StatKind::Max);
    }
}
