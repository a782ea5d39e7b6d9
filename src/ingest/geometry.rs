//! County boundary geometry store.
//!
//! Parses the county GeoJSON file once at startup into an insertion-ordered,
//! read-only store. County name is the join key against the aggregate table
//! and must match its spelling exactly; the source file keys features by
//! either `county` or the TIGER export's `NAME` property.
//!
//! Iteration order is load order, so every assembly pass over the store
//! produces features in the same order.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use geojson::{FeatureCollection, GeoJson, Geometry, Value};

use crate::model::WxError;

/// One county's boundary polygon.
#[derive(Debug, Clone)]
pub struct CountyGeometry {
    pub county: String,
    pub boundary: Geometry,
}

/// Read-only polygon store, one entry per county, in file order.
#[derive(Debug, Clone)]
pub struct CountyGeometryStore {
    counties: Vec<CountyGeometry>,
    by_name: HashMap<String, usize>,
}

impl CountyGeometryStore {
    /// Loads the store from a GeoJSON file.
    pub fn from_geojson_path(path: &Path) -> Result<CountyGeometryStore, WxError> {
        let file = File::open(path).map_err(|source| WxError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a GeoJSON FeatureCollection from any reader.
    ///
    /// Every feature must carry a county name property and a polygon or
    /// multipolygon geometry; anything else is fatal, as is a duplicate
    /// county name (the county is the unique join key).
    pub fn from_reader<R: Read>(reader: R) -> Result<CountyGeometryStore, WxError> {
        let geojson = GeoJson::from_reader(reader).map_err(geojson::Error::from)?;
        let collection = FeatureCollection::try_from(geojson)?;

        let mut counties = Vec::with_capacity(collection.features.len());
        let mut by_name = HashMap::new();

        for feature in collection.features {
            let name = county_name(feature.properties.as_ref()).ok_or_else(|| {
                WxError::BadGeometry("feature without a 'county' or 'NAME' property".to_string())
            })?;

            let boundary = feature.geometry.ok_or_else(|| {
                WxError::BadGeometry(format!("county '{name}' has no geometry"))
            })?;
            if !matches!(boundary.value, Value::Polygon(_) | Value::MultiPolygon(_)) {
                return Err(WxError::BadGeometry(format!(
                    "county '{name}' geometry is not a polygon"
                )));
            }

            if by_name.insert(name.clone(), counties.len()).is_some() {
                return Err(WxError::BadGeometry(format!("duplicate county '{name}'")));
            }
            counties.push(CountyGeometry {
                county: name,
                boundary,
            });
        }

        Ok(CountyGeometryStore { counties, by_name })
    }

    /// Counties in load order.
    pub fn counties(&self) -> impl Iterator<Item = &CountyGeometry> {
        self.counties.iter()
    }

    /// Exact-name lookup.
    pub fn get(&self, county: &str) -> Option<&CountyGeometry> {
        self.by_name.get(county).map(|&i| &self.counties[i])
    }

    /// Number of counties in the store.
    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }
}

/// Pulls the county name out of a feature's properties, preferring the
/// already-normalized `county` key over the raw TIGER `NAME` key.
fn county_name(properties: Option<&geojson::JsonObject>) -> Option<String> {
    let properties = properties?;
    for key in ["county", "NAME"] {
        if let Some(value) = properties.get(key) {
            if let Some(name) = value.as_str() {
                return Some(name.to_string());
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_county_geojson() -> String {
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"NAME": "Alameda", "STATEFP": "06"},
                    "geometry": {"type": "Polygon", "coordinates": [[[-122.3, 37.9], [-122.0, 37.9], [-122.0, 37.4], [-122.3, 37.9]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"county": "Inyo"},
                    "geometry": {"type": "MultiPolygon", "coordinates": [[[[-118.8, 37.5], [-117.0, 37.5], [-117.0, 35.8], [-118.8, 37.5]]]]}
                }
            ]
        }"#
        .to_string()
    }

    #[test]
    fn test_load_preserves_file_order() {
        let store = CountyGeometryStore::from_reader(two_county_geojson().as_bytes()).unwrap();
        let names: Vec<_> = store.counties().map(|c| c.county.as_str()).collect();
        assert_eq!(names, ["Alameda", "Inyo"]);
    }

    #[test]
    fn test_name_key_accepts_both_spellings() {
        // TIGER exports carry NAME; pre-normalized files carry county.
        let store = CountyGeometryStore::from_reader(two_county_geojson().as_bytes()).unwrap();
        assert!(store.get("Alameda").is_some());
        assert!(store.get("Inyo").is_some());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // The join key must match the aggregate table's spelling exactly.
        let store = CountyGeometryStore::from_reader(two_county_geojson().as_bytes()).unwrap();
        assert!(store.get("alameda").is_none());
    }

    #[test]
    fn test_feature_without_name_is_fatal() {
        let bad = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"STATEFP": "06"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}}
            ]
        }"#;
        let err = CountyGeometryStore::from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, WxError::BadGeometry(_)));
    }

    #[test]
    fn test_point_geometry_is_fatal() {
        let bad = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"county": "Alameda"},
                 "geometry": {"type": "Point", "coordinates": [-122.0, 37.5]}}
            ]
        }"#;
        let err = CountyGeometryStore::from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, WxError::BadGeometry(_)));
    }

    #[test]
    fn test_duplicate_county_is_fatal() {
        let bad = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"county": "Alameda"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}},
                {"type": "Feature", "properties": {"county": "Alameda"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}}
            ]
        }"#;
        let err = CountyGeometryStore::from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, WxError::BadGeometry(_)));
    }
}
