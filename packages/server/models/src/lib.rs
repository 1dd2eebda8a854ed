#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the quake map server.
//!
//! Marker, legend, and map payloads are the render crate's documents served
//! as-is. The types here cover server status.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy. `false` when the startup feed
    /// fetch failed.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Feed status as loaded at startup.
    pub feed: ApiFeedStatus,
}

/// Outcome of the startup feed fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFeedStatus {
    /// URL the feed was requested from.
    pub url: String,
    /// Number of earthquakes loaded.
    pub earthquake_count: usize,
    /// Error message if the fetch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body returned by failing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}
