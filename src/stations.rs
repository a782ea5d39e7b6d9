//! Station→county reference index.
//!
//! Loaded once from the station reference CSV at startup and read-only for
//! the process lifetime. This is the single source of truth for which county
//! a station belongs to — the aggregation pipeline resolves every raw record
//! through here, and a record whose station has no entry is dropped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::model::WxError;

/// One row of the station reference file. Auxiliary metadata columns
/// (name, latitude, elevation, ...) are ignored on load.
#[derive(Debug, Deserialize)]
struct StationLinkRow {
    station_id: String,
    county: String,
}

/// Read-only map from station identifier to containing county.
#[derive(Debug, Clone)]
pub struct StationCountyIndex {
    by_station: HashMap<String, String>,
}

impl StationCountyIndex {
    /// Loads the index from a CSV file with at least `station_id` and
    /// `county` columns. A missing required column is fatal.
    pub fn from_csv_path(path: &Path) -> Result<StationCountyIndex, WxError> {
        let file = File::open(path).map_err(|source| WxError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Loads the index from any reader producing station reference CSV.
    /// `file_label` only feeds error messages.
    pub fn from_reader<R: Read>(reader: R, file_label: &str) -> Result<StationCountyIndex, WxError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for required in ["station_id", "county"] {
            if !headers.iter().any(|h| h == required) {
                return Err(WxError::MissingColumn {
                    column: required.to_string(),
                    file: file_label.to_string(),
                });
            }
        }

        let mut by_station = HashMap::new();
        for row in csv_reader.deserialize() {
            let link: StationLinkRow = row?;
            by_station.insert(link.station_id, link.county);
        }

        Ok(StationCountyIndex { by_station })
    }

    /// Looks up the county containing a station. `None` means the station
    /// has no reference entry (ReferenceResolutionGap — the caller drops
    /// the record and counts it, never errors).
    pub fn county_of(&self, station_id: &str) -> Option<&str> {
        self.by_station.get(station_id).map(String::as_str)
    }

    /// Number of linked stations.
    pub fn len(&self) -> usize {
        self.by_station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_station.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
station_id,name,county,latitude,longitude
USC00040693,BERKELEY,Alameda,37.8744,-122.2605
USC00042319,DEATH VALLEY,Inyo,36.4622,-116.8669
USC00047902,SAN FRANCISCO DWTN,San Francisco,37.7706,-122.4269
";

    #[test]
    fn test_lookup_resolves_known_stations() {
        let index = StationCountyIndex::from_reader(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.county_of("USC00040693"), Some("Alameda"));
        assert_eq!(index.county_of("USC00042319"), Some("Inyo"));
    }

    #[test]
    fn test_unknown_station_returns_none() {
        let index = StationCountyIndex::from_reader(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(index.county_of("USC99999999"), None);
    }

    #[test]
    fn test_auxiliary_columns_are_ignored() {
        // The reference file carries station metadata beyond the link
        // columns; only station_id/county matter here.
        let index = StationCountyIndex::from_reader(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(index.county_of("USC00047902"), Some("San Francisco"));
    }

    #[test]
    fn test_missing_county_column_is_fatal() {
        let bad = "station_id,name\nUSC00040693,BERKELEY\n";
        let err = StationCountyIndex::from_reader(bad.as_bytes(), "bad.csv").unwrap_err();
        match err {
            WxError::MissingColumn { column, file } => {
                assert_eq!(column, "county");
                assert_eq!(file, "bad.csv");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_station_id_column_is_fatal() {
        let bad = "id,county\nX,Alameda\n";
        let err = StationCountyIndex::from_reader(bad.as_bytes(), "bad.csv").unwrap_err();
        assert!(matches!(err, WxError::MissingColumn { ref column, .. } if column == "station_id"));
    }
}
