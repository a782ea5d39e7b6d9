//! County/monthly aggregation of raw station observations.
//!
//! Turns per-station per-day temperature records into one row per
//! (county, year, month), with the monthly mean of each statistic converted
//! to °F. Also owns the persisted aggregate artifact — the CSV hand-off
//! contract between this pipeline stage and the visualization stage.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::Datelike;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::units::celsius_tenths_to_fahrenheit;
use crate::model::{CountyAggregate, StatKind, StationRecord, WxError};
use crate::stations::StationCountyIndex;

/// Running mean for one (group, statistic) cell.
#[derive(Debug, Default)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// Builds the county monthly aggregate table.
///
/// Each record is resolved to its county through `index`, keyed by the
/// (county, year, month) of its date, averaged per statistic, converted to
/// °F, and pivoted so TMAX and TMIN land in one row. Output is sorted by
/// (county, year, month) and unique on that key; a group with records for
/// only one statistic leaves the other field `None`.
///
/// Records whose station has no county link are dropped; the total drop
/// count is surfaced once at warn level rather than silently swallowed.
pub fn build_county_monthly(
    records: &[StationRecord],
    index: &StationCountyIndex,
) -> Vec<CountyAggregate> {
    // BTreeMap keeps groups ordered by (county, year, month), so the
    // aggregate table comes out sorted without a second pass.
    let mut groups: BTreeMap<(String, i32, u32), (MeanAccumulator, MeanAccumulator)> =
        BTreeMap::new();
    let mut unresolved = 0u64;

    for record in records {
        let Some(county) = index.county_of(&record.station_id) else {
            unresolved += 1;
            continue;
        };

        let key = (county.to_string(), record.date.year(), record.date.month());
        let (max_acc, min_acc) = groups.entry(key).or_default();
        match record.kind {
            StatKind::Max => max_acc.push(record.raw_value),
            StatKind::Min => min_acc.push(record.raw_value),
        }
    }

    if unresolved > 0 {
        warn!(
            "dropped {unresolved} observation(s) from stations with no county link ({} records kept)",
            records.len() as u64 - unresolved
        );
    }

    let aggregates: Vec<CountyAggregate> = groups
        .into_iter()
        .map(|((county, year, month), (max_acc, min_acc))| CountyAggregate {
            county,
            year,
            month,
            tmax: max_acc.mean().map(celsius_tenths_to_fahrenheit),
            tmin: min_acc.mean().map(celsius_tenths_to_fahrenheit),
        })
        .collect();

    info!(
        "aggregated {} records into {} county/month rows",
        records.len(),
        aggregates.len()
    );
    aggregates
}

// ---------------------------------------------------------------------------
// Aggregate artifact (CSV hand-off contract)
// ---------------------------------------------------------------------------

/// One row of the persisted aggregate file. Column names and order are the
/// stable contract read by the visualization stage; do not reorder.
#[derive(Debug, Serialize, Deserialize)]
struct AggregateRow {
    county: String,
    year: i32,
    month: u32,
    #[serde(rename = "TMAX")]
    tmax: Option<f64>,
    #[serde(rename = "TMIN")]
    tmin: Option<f64>,
}

/// Writes the aggregate table as `county,year,month,TMAX,TMIN`, one row per
/// (county, year, month). Missing statistics serialize as empty cells.
pub fn write_aggregate_csv(path: &Path, aggregates: &[CountyAggregate]) -> Result<(), WxError> {
    let file = File::create(path).map_err(|source| WxError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_aggregate(BufWriter::new(file), aggregates)
}

/// Writer-generic body of `write_aggregate_csv`.
pub fn write_aggregate<W: Write>(writer: W, aggregates: &[CountyAggregate]) -> Result<(), WxError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for aggregate in aggregates {
        csv_writer.serialize(AggregateRow {
            county: aggregate.county.clone(),
            year: aggregate.year,
            month: aggregate.month,
            tmax: aggregate.tmax,
            tmin: aggregate.tmin,
        })?;
    }
    csv_writer.flush().map_err(|source| WxError::Io {
        path: "<aggregate output>".to_string(),
        source,
    })?;
    Ok(())
}

/// Reads a previously written aggregate artifact back into memory.
pub fn read_aggregate_csv(path: &Path) -> Result<Vec<CountyAggregate>, WxError> {
    let file = File::open(path).map_err(|source| WxError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_aggregate(BufReader::new(file), &path.display().to_string())
}

/// Reader-generic body of `read_aggregate_csv`.
pub fn read_aggregate<R: Read>(reader: R, file_label: &str) -> Result<Vec<CountyAggregate>, WxError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["county", "year", "month", "TMAX", "TMIN"] {
        if !headers.iter().any(|h| h == required) {
            return Err(WxError::MissingColumn {
                column: required.to_string(),
                file: file_label.to_string(),
            });
        }
    }

    let mut aggregates = Vec::new();
    for row in csv_reader.deserialize() {
        let row: AggregateRow = row?;
        aggregates.push(CountyAggregate {
            county: row.county,
            year: row.year,
            month: row.month,
            tmax: row.tmax,
            tmin: row.tmin,
        });
    }
    Ok(aggregates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
