#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Earthquake record, magnitude band, and marker style types.
//!
//! This crate defines the data shared by every stage of the quake-map
//! pipeline: the records read from the feed, the fixed magnitude bands used
//! to style them, and the render attributes handed to the map widget.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Stroke color drawn around every marker.
pub const STROKE_COLOR: &str = "#000000";

/// Stroke width of every marker, in pixels.
pub const STROKE_WEIGHT: f64 = 0.75;

/// Stroke opacity of every marker.
pub const OPACITY: f64 = 1.0;

/// Fill opacity of every marker.
pub const FILL_OPACITY: f64 = 1.0;

/// Magnitude boundaries shown in the legend, in ascending order.
pub const LEGEND_LEVELS: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

/// Named CSS color used to fill a marker.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum MarkerColor {
    /// Magnitude above 5
    DarkRed,
    /// Magnitude above 4
    DarkOrange,
    /// Magnitude above 3
    Gold,
    /// Magnitude above 2
    Green,
    /// Magnitude above 1
    LightGreen,
    /// Everything else, including missing magnitudes
    White,
}

impl MarkerColor {
    /// Returns all variants of this enum, strongest band first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::DarkRed,
            Self::DarkOrange,
            Self::Gold,
            Self::Green,
            Self::LightGreen,
            Self::White,
        ]
    }
}

/// A contiguous magnitude interval bound to one radius and one color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnitudeBand {
    /// Exclusive lower bound. `None` for the default band, which catches
    /// everything the bounded bands do not.
    pub lower_exclusive: Option<f64>,
    /// Marker radius in pixels.
    pub radius: u32,
    /// Marker fill color.
    pub color: MarkerColor,
}

impl MagnitudeBand {
    /// Returns `true` if `magnitude` lies strictly above this band's lower
    /// bound. The default band contains every value.
    #[must_use]
    pub fn contains(&self, magnitude: f64) -> bool {
        self.lower_exclusive.is_none_or(|lower| magnitude > lower)
    }
}

/// The classifier's bands, ordered from the highest threshold down.
///
/// Evaluated top-down: the first band containing a magnitude wins. The
/// final entry is the unbounded default band.
pub const MAGNITUDE_BANDS: [MagnitudeBand; 6] = [
    MagnitudeBand {
        lower_exclusive: Some(5.0),
        radius: 30,
        color: MarkerColor::DarkRed,
    },
    MagnitudeBand {
        lower_exclusive: Some(4.0),
        radius: 24,
        color: MarkerColor::DarkOrange,
    },
    MagnitudeBand {
        lower_exclusive: Some(3.0),
        radius: 18,
        color: MarkerColor::Gold,
    },
    MagnitudeBand {
        lower_exclusive: Some(2.0),
        radius: 12,
        color: MarkerColor::Green,
    },
    MagnitudeBand {
        lower_exclusive: Some(1.0),
        radius: 6,
        color: MarkerColor::LightGreen,
    },
    DEFAULT_BAND,
];

/// Band used when no threshold matches.
pub const DEFAULT_BAND: MagnitudeBand = MagnitudeBand {
    lower_exclusive: None,
    radius: 3,
    color: MarkerColor::White,
};

/// Render attributes for a single circle marker.
///
/// Field names serialize to the option names of a Leaflet `circleMarker`
/// path style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAttributes {
    /// Marker radius in pixels.
    pub radius: u32,
    /// Marker fill color.
    pub fill_color: MarkerColor,
    /// Stroke color, always [`STROKE_COLOR`].
    #[serde(rename = "color")]
    pub stroke_color: String,
    /// Stroke width, always [`STROKE_WEIGHT`].
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
    /// Stroke opacity, always [`OPACITY`].
    pub opacity: f64,
    /// Fill opacity, always [`FILL_OPACITY`].
    pub fill_opacity: f64,
    /// Whether the stroke is drawn.
    pub stroke: bool,
}

impl StyleAttributes {
    /// Builds the attributes for a marker of the given band.
    #[must_use]
    pub fn for_band(band: &MagnitudeBand) -> Self {
        Self {
            radius: band.radius,
            fill_color: band.color,
            stroke_color: STROKE_COLOR.to_string(),
            stroke_weight: STROKE_WEIGHT,
            opacity: OPACITY,
            fill_opacity: FILL_OPACITY,
            stroke: true,
        }
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// A single earthquake as reported by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthquakeRecord {
    /// Feed-assigned event identifier, if present.
    pub id: Option<String>,
    /// Event magnitude. The feed reports `null` for some events.
    pub magnitude: Option<f64>,
    /// Human-readable place description (e.g., "10km N of Testville").
    pub place: Option<String>,
    /// Origin time in epoch milliseconds.
    pub time_millis: i64,
    /// Epicenter.
    pub location: Coordinates,
}

/// One row of the map legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Band description, e.g. `"2–3"` or `"5+"`.
    pub label: String,
    /// Representative color of the band.
    pub color: MarkerColor,
}
