#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Earthquake feed selection and map configuration types.
//!
//! Defines the TOML schema for the map configuration: which USGS summary
//! feed to read, where the map opens, and which base tile layers the layer
//! control offers.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Base URL of the USGS real-time summary feeds.
pub const USGS_SUMMARY_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Minimum-magnitude tier of a USGS summary feed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum FeedLevel {
    /// Events flagged as significant by USGS.
    #[serde(rename = "significant")]
    #[strum(serialize = "significant")]
    Significant,
    /// M4.5+
    #[serde(rename = "4.5")]
    #[strum(serialize = "4.5")]
    M4_5,
    /// M2.5+
    #[serde(rename = "2.5")]
    #[strum(serialize = "2.5")]
    M2_5,
    /// M1.0+
    #[serde(rename = "1.0")]
    #[strum(serialize = "1.0")]
    M1_0,
    /// Every recorded event.
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    All,
}

impl FeedLevel {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Significant, Self::M4_5, Self::M2_5, Self::M1_0, Self::All]
    }
}

/// Time window covered by a USGS summary feed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedPeriod {
    /// Past hour.
    Hour,
    /// Past day.
    Day,
    /// Past seven days.
    Week,
    /// Past thirty days.
    #[default]
    Month,
}

impl FeedPeriod {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Hour, Self::Day, Self::Week, Self::Month]
    }
}

/// Which feed to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Magnitude tier (default: `all`).
    #[serde(default)]
    pub level: FeedLevel,
    /// Time window (default: `month`).
    #[serde(default)]
    pub period: FeedPeriod,
    /// Explicit feed URL. Overrides `level` and `period` when set.
    pub url: Option<String>,
}

impl FeedConfig {
    /// Returns the URL of the configured feed.
    #[must_use]
    pub fn url(&self) -> String {
        self.url.clone().unwrap_or_else(|| {
            format!(
                "{USGS_SUMMARY_BASE_URL}/{}_{}.geojson",
                self.level, self.period
            )
        })
    }
}

/// A base tile layer offered by the map's layer control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    /// Name shown in the layer control (e.g., "Open Map").
    pub name: String,
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    pub url_template: String,
    /// Attribution HTML shown in the map corner.
    pub attribution: String,
    /// Maximum zoom the tile server supports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
}

/// Corner of the map a control is anchored to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ControlPosition {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    #[default]
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

/// Initial viewport and layers of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Map center as `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Name of the overlay layer holding the earthquake markers.
    pub overlay_name: String,
    /// Where the legend control is placed.
    #[serde(default)]
    pub legend_position: ControlPosition,
}

/// Complete map configuration, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Feed selection.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Viewport and overlay settings.
    pub view: MapView,
    /// Base layers, in layer-control order. The first is shown initially.
    pub base_layers: Vec<TileLayer>,
}

impl MapConfig {
    /// Returns the base layer shown when the map first loads.
    #[must_use]
    pub fn default_base_layer(&self) -> Option<&TileLayer> {
        self.base_layers.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_feed_is_all_month() {
        assert_eq!(
            FeedConfig::default().url(),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson"
        );
    }

    #[test]
    fn level_and_period_build_summary_url() {
        let feed = FeedConfig {
            level: FeedLevel::M4_5,
            period: FeedPeriod::Week,
            url: None,
        };
        assert!(feed.url().ends_with("/summary/4.5_week.geojson"));
    }

    #[test]
    fn explicit_url_wins() {
        let feed = FeedConfig {
            level: FeedLevel::Significant,
            period: FeedPeriod::Hour,
            url: Some("http://localhost/feed.geojson".to_string()),
        };
        assert_eq!(feed.url(), "http://localhost/feed.geojson");
    }

    #[test]
    fn levels_parse_from_feed_names() {
        for level in FeedLevel::all() {
            assert_eq!(level.as_ref().parse::<FeedLevel>().ok(), Some(*level));
        }
        assert_eq!("2.5".parse::<FeedLevel>().ok(), Some(FeedLevel::M2_5));
        assert_eq!("day".parse::<FeedPeriod>().ok(), Some(FeedPeriod::Day));
    }

    #[test]
    fn legend_position_uses_leaflet_names() {
        assert_eq!(ControlPosition::BottomLeft.to_string(), "bottomleft");
        assert_eq!(ControlPosition::TopRight.as_ref(), "topright");
    }
}
