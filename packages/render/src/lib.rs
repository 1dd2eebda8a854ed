#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Display adapter for the earthquake map.
//!
//! Combines the pure style functions with feed records and the map
//! configuration into a [`MapDocument`]: one [`RenderedMarker`] per record,
//! the legend, and the base map settings. The document is what a map widget
//! consumes, either as files written by the generator or as API responses.

use chrono::{Local, TimeZone};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use quake_map_feed_models::{ControlPosition, MapConfig, TileLayer};
use quake_map_quake_models::{
    Coordinates, EarthquakeRecord, LEGEND_LEVELS, LegendEntry, StyleAttributes,
};
use quake_map_style::{
    LEGEND_TITLE, build_legend, classify_optional, format_popup_in, render_legend_html,
};
use serde::Serialize;

/// Render output for a single earthquake.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMarker {
    /// Feed event identifier, if present.
    pub id: Option<String>,
    /// Marker style derived from the magnitude.
    pub style: StyleAttributes,
    /// Popup markup.
    pub popup: String,
    /// Where the marker is drawn.
    pub coordinates: Coordinates,
    /// Magnitude the style was derived from.
    pub magnitude: Option<f64>,
    /// Origin time in epoch milliseconds.
    pub time_millis: i64,
}

/// Renders one record with its popup time in the local zone.
#[must_use]
pub fn render_marker(record: &EarthquakeRecord) -> RenderedMarker {
    render_marker_in(record, &Local)
}

/// Renders one record with its popup time in `tz`.
#[must_use]
pub fn render_marker_in<Tz>(record: &EarthquakeRecord, tz: &Tz) -> RenderedMarker
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    RenderedMarker {
        id: record.id.clone(),
        style: classify_optional(record.magnitude),
        popup: format_popup_in(record, tz),
        coordinates: record.location,
        magnitude: record.magnitude,
        time_millis: record.time_millis,
    }
}

/// Renders every record, preserving feed order.
#[must_use]
pub fn render_markers(records: &[EarthquakeRecord]) -> Vec<RenderedMarker> {
    records.iter().map(render_marker).collect()
}

/// Converts rendered markers into a `GeoJSON` `FeatureCollection`.
///
/// Each feature is a `Point` carrying the marker's path style under
/// `properties.style` and the popup under `properties.popup`, so a widget
/// can style and bind popups without recomputing anything.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if a marker style fails to serialize.
pub fn to_feature_collection(
    markers: &[RenderedMarker],
) -> Result<FeatureCollection, serde_json::Error> {
    let features = markers
        .iter()
        .map(marker_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn marker_feature(marker: &RenderedMarker) -> Result<Feature, serde_json::Error> {
    let mut properties = JsonObject::new();
    properties.insert("style".to_string(), serde_json::to_value(&marker.style)?);
    properties.insert("popup".to_string(), marker.popup.clone().into());
    properties.insert("mag".to_string(), serde_json::to_value(marker.magnitude)?);
    properties.insert("time".to_string(), marker.time_millis.into());

    let Coordinates {
        latitude,
        longitude,
    } = marker.coordinates;

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![longitude, latitude]))),
        id: marker.id.clone().map(Id::String),
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Legend control contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendDocument {
    /// Heading shown above the entries.
    pub title: String,
    /// Corner the legend is anchored to.
    pub position: ControlPosition,
    /// Legend rows, lowest band first.
    pub entries: Vec<LegendEntry>,
    /// Pre-rendered HTML of the whole legend.
    pub html: String,
}

/// A base layer as offered to the layer control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayerSettings {
    /// Name shown in the layer control.
    pub name: String,
    /// Tile URL template.
    pub url_template: String,
    /// Attribution HTML.
    pub attribution: String,
    /// Maximum zoom the tile server supports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
    /// Whether this layer is shown when the map loads.
    pub default: bool,
}

impl BaseLayerSettings {
    fn from_layer(layer: &TileLayer, default: bool) -> Self {
        Self {
            name: layer.name.clone(),
            url_template: layer.url_template.clone(),
            attribution: layer.attribution.clone(),
            max_zoom: layer.max_zoom,
            default,
        }
    }
}

/// Map construction settings: initial view, base layers, and overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    /// Map center as `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Name of the earthquake overlay layer.
    pub overlay_name: String,
    /// Base layers in layer-control order.
    pub base_layers: Vec<BaseLayerSettings>,
    /// URL of the feed the markers were built from.
    pub feed_url: String,
}

impl From<&MapConfig> for MapSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            center: config.view.center,
            zoom: config.view.zoom,
            overlay_name: config.view.overlay_name.clone(),
            base_layers: config
                .base_layers
                .iter()
                .enumerate()
                .map(|(i, layer)| BaseLayerSettings::from_layer(layer, i == 0))
                .collect(),
            feed_url: config.feed.url(),
        }
    }
}

/// Everything the map widget needs for one render pass.
///
/// Not serialized as a whole: callers publish its parts through
/// [`Self::feature_collection`], [`Self::legend_document`], and
/// [`Self::map_settings`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    /// Map view, base layers, and feed selection.
    pub config: MapConfig,
    /// One marker per usable feed record.
    pub markers: Vec<RenderedMarker>,
    /// Legend rows, lowest band first.
    pub legend: Vec<LegendEntry>,
    /// Legend rendered as the legend control's HTML.
    pub legend_html: String,
}

impl MapDocument {
    /// Builds the document for `records` under `config`.
    #[must_use]
    pub fn build(config: MapConfig, records: &[EarthquakeRecord]) -> Self {
        let markers = render_markers(records);
        let legend = build_legend(&LEGEND_LEVELS);
        let legend_html = render_legend_html(&legend);
        log::debug!(
            "Rendered {} markers and {} legend entries",
            markers.len(),
            legend.len()
        );

        Self {
            config,
            markers,
            legend,
            legend_html,
        }
    }

    /// Returns the markers as a styled `GeoJSON` `FeatureCollection`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if a marker style fails to serialize.
    pub fn feature_collection(&self) -> Result<FeatureCollection, serde_json::Error> {
        to_feature_collection(&self.markers)
    }

    /// Returns the legend control contents.
    #[must_use]
    pub fn legend_document(&self) -> LegendDocument {
        LegendDocument {
            title: LEGEND_TITLE.to_string(),
            position: self.config.view.legend_position,
            entries: self.legend.clone(),
            html: self.legend_html.clone(),
        }
    }

    /// Returns the map construction settings.
    #[must_use]
    pub fn map_settings(&self) -> MapSettings {
        MapSettings::from(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quake_map_feed::config::default_map_config;
    use quake_map_quake_models::MarkerColor;

    fn testville() -> EarthquakeRecord {
        EarthquakeRecord {
            id: Some("us7000test".to_string()),
            magnitude: Some(4.2),
            place: Some("10km N of Testville".to_string()),
            time_millis: 1_700_000_000_000,
            location: Coordinates {
                latitude: 35.5,
                longitude: -118.25,
            },
        }
    }

    #[test]
    fn marker_combines_style_popup_and_location() {
        let marker = render_marker_in(&testville(), &Utc);
        assert_eq!(marker.style.radius, 24);
        assert_eq!(marker.style.fill_color, MarkerColor::DarkOrange);
        assert!(marker.popup.contains("Testville"));
        assert!(marker.popup.contains("Tue Nov 14 2023 22:13:20 GMT+0000"));
        assert!(marker.popup.contains("4.2"));
        assert_eq!(marker.coordinates, testville().location);
    }

    #[test]
    fn missing_magnitude_renders_default_marker() {
        let record = EarthquakeRecord {
            magnitude: None,
            ..testville()
        };
        let marker = render_marker(&record);
        assert_eq!(marker.style.radius, 3);
        assert_eq!(marker.style.fill_color, MarkerColor::White);
    }

    #[test]
    fn features_use_lon_lat_order_and_carry_style() {
        let markers = vec![render_marker_in(&testville(), &Utc)];
        let collection = to_feature_collection(&markers).unwrap();
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        assert!(matches!(&feature.id, Some(Id::String(id)) if id == "us7000test"));
        let geometry = feature.geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![-118.25, 35.5]));

        let style = feature.property("style").unwrap();
        assert_eq!(style["radius"], 24);
        assert_eq!(style["fillColor"], "DarkOrange");
        assert_eq!(style["color"], "#000000");
        assert_eq!(feature.property("mag").unwrap(), 4.2);
        assert_eq!(feature.property("time").unwrap(), 1_700_000_000_000_i64);
        assert!(
            feature
                .property("popup")
                .and_then(serde_json::Value::as_str)
                .unwrap()
                .contains("Testville")
        );
    }

    #[test]
    fn null_magnitude_serializes_as_null() {
        let record = EarthquakeRecord {
            magnitude: None,
            id: None,
            ..testville()
        };
        let collection = to_feature_collection(&[render_marker(&record)]).unwrap();
        let feature = &collection.features[0];
        assert_eq!(feature.property("mag"), Some(&serde_json::Value::Null));
        assert!(feature.id.is_none());
    }

    #[test]
    fn document_has_markers_legend_and_config() {
        let doc = MapDocument::build(default_map_config(), &[testville(), testville()]);
        assert_eq!(doc.markers.len(), 2);
        assert_eq!(doc.legend.len(), 6);
        assert_eq!(doc.legend[5].label, "5+");
        assert!(doc.legend_html.starts_with("<h3>Magnitude</h3>"));
        assert_eq!(doc.config.view.overlay_name, "Earthquakes");
        assert_eq!(doc.feature_collection().unwrap().features.len(), 2);
    }

    #[test]
    fn legend_document_follows_config_position() {
        let mut config = default_map_config();
        config.view.legend_position = ControlPosition::TopRight;
        let legend = MapDocument::build(config, &[]).legend_document();
        assert_eq!(legend.title, "Magnitude");
        assert_eq!(legend.position, ControlPosition::TopRight);
        assert_eq!(legend.entries.len(), 6);

        let json = serde_json::to_value(&legend).unwrap();
        assert_eq!(json["position"], "topright");
        assert_eq!(json["entries"][0]["color"], "White");
    }

    #[test]
    fn map_settings_mark_first_base_layer_default() {
        let settings = MapDocument::build(default_map_config(), &[]).map_settings();
        assert_eq!(settings.zoom, 4);
        assert_eq!(settings.overlay_name, "Earthquakes");
        let defaults: Vec<bool> = settings.base_layers.iter().map(|l| l.default).collect();
        assert_eq!(defaults, [true, false]);
        assert!(settings.feed_url.ends_with("all_month.geojson"));

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["baseLayers"][0]["maxZoom"], 17);
        assert!(json["baseLayers"][1].get("maxZoom").is_none());
    }

    #[test]
    fn empty_feed_still_has_legend() {
        let doc = MapDocument::build(default_map_config(), &[]);
        assert!(doc.markers.is_empty());
        assert_eq!(doc.legend.len(), 6);
    }
}
