//! Selection-driven dataset assembly.
//!
//! For the currently selected (year, month), joins the static county
//! geometry against the aggregate table and emits the GeoJSON
//! FeatureCollection consumed by the rendering surface. The geometry store
//! is the left side of the join: every county appears in every payload,
//! with the filter's own year/month and null statistics filling the gaps.
//!
//! `assemble` is a pure function of its inputs; feature order follows the
//! geometry store's load order, so identical inputs produce identical
//! payloads.

use std::collections::HashMap;

use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use serde_json::json;

use crate::ingest::geometry::CountyGeometryStore;
use crate::model::{CountyAggregate, FilterState};

/// Builds the geo-interchange payload for one filter selection.
///
/// Aggregate rows for counties with no geometry never reach the output;
/// the visual simply has nowhere to draw them.
pub fn assemble(
    filter: &FilterState,
    aggregates: &[CountyAggregate],
    geometry: &CountyGeometryStore,
) -> FeatureCollection {
    // Slice the aggregate table down to the selected year/month first, so
    // the join below is a straight county lookup.
    let slice: HashMap<&str, &CountyAggregate> = aggregates
        .iter()
        .filter(|a| a.year == filter.year && a.month == filter.month)
        .map(|a| (a.county.as_str(), a))
        .collect();

    let features = geometry
        .counties()
        .map(|county| {
            let mut properties = JsonObject::new();
            properties.insert("county".to_string(), json!(county.county));

            match slice.get(county.county.as_str()) {
                Some(aggregate) => {
                    properties.insert("year".to_string(), json!(aggregate.year));
                    properties.insert("month".to_string(), json!(aggregate.month));
                    properties.insert("TMAX".to_string(), json!(aggregate.tmax));
                    properties.insert("TMIN".to_string(), json!(aggregate.tmin));
                }
                None => {
                    // Gap fill: the row stays self-describing even with no
                    // aggregate data behind it.
                    properties.insert("year".to_string(), json!(filter.year));
                    properties.insert("month".to_string(), json!(filter.month));
                    properties.insert("TMAX".to_string(), serde_json::Value::Null);
                    properties.insert("TMIN".to_string(), serde_json::Value::Null);
                }
            }

            Feature {
                bbox: None,
                geometry: Some(county.boundary.clone()),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Serializes an assembled dataset to the JSON string handed to the
/// rendering surface's dataset handle.
pub fn payload_string(collection: FeatureCollection) -> String {
    GeoJson::FeatureCollection(collection).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatKind;

    fn geometry() -> CountyGeometryStore {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"county": "Alameda"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-122.3, 37.9], [-122.0, 37.9], [-122.0, 37.4], [-122.3, 37.9]]]}},
                {"type": "Feature", "properties": {"county": "Inyo"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-118.8, 37.5], [-117.0, 37.5], [-117.0, 35.8], [-118.8, 37.5]]]}}
            ]
        }"#;
        CountyGeometryStore::from_reader(geojson.as_bytes()).unwrap()
    }

    fn aggregates() -> Vec<CountyAggregate> {
        vec![
            CountyAggregate {
                county: "Alameda".to_string(),
                year: 2019,
                month: 3,
                tmax: Some(82.4),
                tmin: Some(46.4),
            },
            CountyAggregate {
                county: "Alameda".to_string(),
                year: 2019,
                month: 4,
                tmax: Some(70.0),
                tmin: Some(48.0),
            },
            // No geometry exists for this county; it must never surface.
            CountyAggregate {
                county: "Nye".to_string(),
                year: 2019,
                month: 3,
                tmax: Some(90.0),
                tmin: Some(40.0),
            },
        ]
    }

    fn filter(year: i32, month: u32) -> FilterState {
        FilterState {
            year,
            month,
            stat: StatKind::Max,
        }
    }

    fn property<'a>(feature: &'a Feature, key: &str) -> &'a serde_json::Value {
        feature.properties.as_ref().unwrap().get(key).unwrap()
    }

    #[test]
    fn test_every_geometry_county_appears_exactly_once() {
        // Even a filter matching nothing yields one feature per county.
        for (year, month) in [(2019, 3), (2019, 4), (2016, 11)] {
            let collection = assemble(&filter(year, month), &aggregates(), &geometry());
            assert_eq!(collection.features.len(), 2, "filter ({year},{month})");
        }
    }

    #[test]
    fn test_matched_county_carries_aggregate_values() {
        let collection = assemble(&filter(2019, 3), &aggregates(), &geometry());
        let alameda = &collection.features[0];
        assert_eq!(property(alameda, "county"), "Alameda");
        assert_eq!(property(alameda, "TMAX"), &serde_json::json!(82.4));
        assert_eq!(property(alameda, "TMIN"), &serde_json::json!(46.4));
        assert_eq!(property(alameda, "year"), &serde_json::json!(2019));
        assert_eq!(property(alameda, "month"), &serde_json::json!(3));
    }

    #[test]
    fn test_unmatched_county_is_gap_filled_with_filter_year_month() {
        let collection = assemble(&filter(2019, 3), &aggregates(), &geometry());
        let inyo = &collection.features[1];
        assert_eq!(property(inyo, "county"), "Inyo");
        assert!(property(inyo, "TMAX").is_null());
        assert!(property(inyo, "TMIN").is_null());
        assert_eq!(property(inyo, "year"), &serde_json::json!(2019));
        assert_eq!(property(inyo, "month"), &serde_json::json!(3));
    }

    #[test]
    fn test_aggregate_without_geometry_is_silently_dropped() {
        let collection = assemble(&filter(2019, 3), &aggregates(), &geometry());
        assert!(
            collection
                .features
                .iter()
                .all(|f| property(f, "county") != "Nye"),
            "Nye has no boundary and must not be rendered"
        );
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let first = payload_string(assemble(&filter(2019, 3), &aggregates(), &geometry()));
        let second = payload_string(assemble(&filter(2019, 3), &aggregates(), &geometry()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_month_slice_matches_nothing() {
        // Month 4 exists for Alameda, month 5 does not — both years equal.
        let collection = assemble(&filter(2019, 5), &aggregates(), &geometry());
        for feature in &collection.features {
            assert!(property(feature, "TMAX").is_null());
        }
    }
}
