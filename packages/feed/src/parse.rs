//! Conversion of feed `GeoJSON` into [`EarthquakeRecord`]s.
//!
//! Features without a point geometry or an origin time cannot be placed
//! on the map and are skipped with a warning. A missing or non-numeric
//! magnitude is kept as `None`.

use geojson::{Feature, FeatureCollection, GeoJson, Value, feature::Id};
use quake_map_quake_models::{Coordinates, EarthquakeRecord};

use crate::FeedError;

/// Float times beyond this are rejected rather than saturated.
const MAX_EPOCH_MILLIS: f64 = 9.0e15;

/// Parses a feed body into earthquake records, in feed order.
///
/// # Errors
///
/// Returns [`FeedError::GeoJson`] if the body is not a `GeoJSON`
/// `FeatureCollection`.
pub fn parse_feed(body: &str) -> Result<Vec<EarthquakeRecord>, FeedError> {
    let geojson: GeoJson = body.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;
    Ok(records_from_collection(&collection))
}

/// Converts every usable feature of `collection` into a record.
#[must_use]
pub fn records_from_collection(collection: &FeatureCollection) -> Vec<EarthquakeRecord> {
    let total = collection.features.len();
    let records: Vec<EarthquakeRecord> = collection
        .features
        .iter()
        .filter_map(|feature| match record_from_feature(feature) {
            Ok(record) => Some(record),
            Err(reason) => {
                log::warn!(
                    "Skipping feature {}: {reason}",
                    feature_id(feature).as_deref().unwrap_or("<no id>")
                );
                None
            }
        })
        .collect();

    if records.len() < total {
        log::info!("Parsed {} of {total} feed features", records.len());
    } else {
        log::debug!("Parsed {total} feed features");
    }

    records
}

/// Builds a record from one feed feature.
///
/// # Errors
///
/// Returns a short reason when the feature has no point geometry or no
/// numeric `time` property.
pub fn record_from_feature(feature: &Feature) -> Result<EarthquakeRecord, &'static str> {
    let location = point_location(feature).ok_or("no point geometry")?;
    let time_millis = feature
        .property("time")
        .and_then(epoch_millis)
        .ok_or("no time property")?;

    Ok(EarthquakeRecord {
        id: feature_id(feature),
        magnitude: feature
            .property("mag")
            .and_then(serde_json::Value::as_f64),
        place: feature
            .property("place")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        time_millis,
        location,
    })
}

/// Reads an epoch-milliseconds `time`, accepting whole numbers written as
/// floats (`1.7e12`). Fractional milliseconds are truncated.
#[allow(clippy::cast_possible_truncation)]
fn epoch_millis(value: &serde_json::Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|millis| millis.is_finite() && millis.abs() < MAX_EPOCH_MILLIS)
            .map(|millis| millis.trunc() as i64)
    })
}

/// Reads `[longitude, latitude, depth?]` from a `Point` geometry.
fn point_location(feature: &Feature) -> Option<Coordinates> {
    let geometry = feature.geometry.as_ref()?;
    match &geometry.value {
        Value::Point(position) if position.len() >= 2 => Some(Coordinates {
            latitude: position[1],
            longitude: position[0],
        }),
        _ => None,
    }
}

fn feature_id(feature: &Feature) -> Option<String> {
    match feature.id.as_ref()? {
        Id::String(id) => Some(id.clone()),
        Id::Number(id) => Some(id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"title": "USGS All Earthquakes, Past Month", "count": 4},
        "features": [
            {
                "type": "Feature",
                "id": "us7000test",
                "properties": {"mag": 4.2, "place": "10km N of Testville", "time": 1700000000000},
                "geometry": {"type": "Point", "coordinates": [-118.25, 35.5, 10.0]}
            },
            {
                "type": "Feature",
                "id": "nc0000null",
                "properties": {"mag": null, "place": null, "time": 1700000100000},
                "geometry": {"type": "Point", "coordinates": [-122.0, 37.0]}
            },
            {
                "type": "Feature",
                "id": "xx0000nogeom",
                "properties": {"mag": 2.0, "place": "Nowhere", "time": 1700000200000},
                "geometry": null
            },
            {
                "type": "Feature",
                "id": "xx0000notime",
                "properties": {"mag": 1.5, "place": "Somewhere"},
                "geometry": {"type": "Point", "coordinates": [10.0, 20.0]}
            }
        ]
    }"#;

    #[test]
    fn parses_point_features_in_order() {
        let records = parse_feed(FEED).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id.as_deref(), Some("us7000test"));
        assert_eq!(first.magnitude, Some(4.2));
        assert_eq!(first.place.as_deref(), Some("10km N of Testville"));
        assert_eq!(first.time_millis, 1_700_000_000_000);
        assert_eq!(
            first.location,
            Coordinates {
                latitude: 35.5,
                longitude: -118.25,
            }
        );
    }

    #[test]
    fn null_magnitude_and_place_are_kept_as_none() {
        let records = parse_feed(FEED).unwrap();
        let second = &records[1];
        assert_eq!(second.id.as_deref(), Some("nc0000null"));
        assert_eq!(second.magnitude, None);
        assert_eq!(second.place, None);
    }

    #[test]
    fn unplaceable_features_are_skipped() {
        let records = parse_feed(FEED).unwrap();
        assert!(records.iter().all(|r| {
            r.id.as_deref() != Some("xx0000nogeom") && r.id.as_deref() != Some("xx0000notime")
        }));
    }

    #[test]
    fn empty_collection_yields_no_records() {
        let records = parse_feed(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn non_collection_geojson_is_an_error() {
        let point = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        assert!(matches!(parse_feed(point), Err(FeedError::GeoJson(_))));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(parse_feed("<html>"), Err(FeedError::GeoJson(_))));
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": 42,
                "properties": {"mag": 3.1, "place": "P", "time": 0},
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
            }]
        }"#;
        let records = parse_feed(body).unwrap();
        assert_eq!(records[0].id.as_deref(), Some("42"));
    }

    #[test]
    fn float_times_are_accepted() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "us0000float",
                "properties": {"mag": 2.4, "place": "Offshore", "time": 1.5e12},
                "geometry": {"type": "Point", "coordinates": [140.0, 36.0]}
            }]
        }"#;
        let records = parse_feed(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time_millis, 1_500_000_000_000);
    }

    #[test]
    fn out_of_range_float_times_are_skipped() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "xx0000huge",
                "properties": {"mag": 2.4, "place": "Offshore", "time": 1e300},
                "geometry": {"type": "Point", "coordinates": [140.0, 36.0]}
            }]
        }"#;
        assert!(parse_feed(body).unwrap().is_empty());
    }
}
