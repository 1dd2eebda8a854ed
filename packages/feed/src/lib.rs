#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Earthquake feed fetching, `GeoJSON` parsing, and map configuration.
//!
//! The feed is a USGS `GeoJSON` `FeatureCollection` fetched once per render
//! pass. Each point feature becomes an [`EarthquakeRecord`]. The map
//! configuration is a TOML file embedded at compile time that can be
//! replaced by a file on disk.
//!
//! [`EarthquakeRecord`]: quake_map_quake_models::EarthquakeRecord

pub mod config;
pub mod fetch;
pub mod parse;

use thiserror::Error;

/// Errors that can occur while fetching or parsing the feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Feed request to {url} failed with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: reqwest::StatusCode,
    },

    /// The body was not a `GeoJSON` `FeatureCollection`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

/// Errors that can occur while loading the map configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but is not usable.
    #[error("Invalid map configuration: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}
