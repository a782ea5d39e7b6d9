//! Raw daily observation loader.
//!
//! Reads the fixed-window (2016–2020) station observation CSV into
//! `StationRecord`s. Validation here is fail-fast: an unparsable date or a
//! non-numeric value aborts the load, because the pipeline must not build
//! aggregates from partial data. Rows for non-temperature statistics
//! (precipitation, snowfall, ...) are skipped — only TMAX/TMIN feed the map.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{StatKind, StationRecord, WxError};

/// One row of the raw weather file, before validation. `date` and
/// `wthr_val` stay strings so a bad cell can be reported precisely.
#[derive(Debug, Deserialize)]
struct ObservationRow {
    station_id: String,
    date: String,
    wthr_dtype: String,
    wthr_val: String,
}

/// Loads the raw observation CSV from a file path.
pub fn load_observations(path: &Path) -> Result<Vec<StationRecord>, WxError> {
    let file = File::open(path).map_err(|source| WxError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_observations(BufReader::new(file), &path.display().to_string())
}

/// Reads observation rows from any reader. `file_label` only feeds error
/// messages.
pub fn read_observations<R: Read>(
    reader: R,
    file_label: &str,
) -> Result<Vec<StationRecord>, WxError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["station_id", "date", "wthr_dtype", "wthr_val"] {
        if !headers.iter().any(|h| h == required) {
            return Err(WxError::MissingColumn {
                column: required.to_string(),
                file: file_label.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let raw: ObservationRow = row?;

        // Non-temperature rows are out of scope, not malformed.
        let Some(kind) = StatKind::from_field_name(&raw.wthr_dtype) else {
            continue;
        };

        let date =
            NaiveDate::parse_from_str(raw.date.trim(), "%Y%m%d").map_err(|_| WxError::BadDate {
                station_id: raw.station_id.clone(),
                raw: raw.date.clone(),
            })?;

        let raw_value: f64 = raw.wthr_val.trim().parse().map_err(|_| WxError::BadValue {
            station_id: raw.station_id.clone(),
            raw: raw.wthr_val.clone(),
        })?;

        records.push(StationRecord {
            station_id: raw.station_id,
            date,
            kind,
            raw_value,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
