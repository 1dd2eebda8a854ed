//! Map configuration loading and validation.
//!
//! The default configuration is embedded via `include_str!`. A file on disk
//! replaces it entirely; environment variables override single fields.

use std::collections::BTreeSet;
use std::path::Path;

use quake_map_feed_models::MapConfig;

use crate::ConfigError;

/// Environment variable overriding the feed URL.
pub const FEED_URL_ENV: &str = "QUAKE_FEED_URL";

/// Highest zoom level accepted for the initial view.
const MAX_ZOOM: u8 = 22;

/// Embedded default configuration.
const DEFAULT_MAP_TOML: &str = include_str!("../config/map.toml");

/// Returns the embedded default map configuration.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse or validate. Since it is a
/// compile-time constant, a failure indicates a development error and is
/// caught by the tests below.
#[must_use]
pub fn default_map_config() -> MapConfig {
    parse_map_config(DEFAULT_MAP_TOML)
        .unwrap_or_else(|e| panic!("Failed to load embedded map configuration: {e}"))
}

/// Parses and validates a map configuration from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError`] if the text is not valid TOML for
/// [`MapConfig`] or fails [`validate`].
pub fn parse_map_config(text: &str) -> Result<MapConfig, ConfigError> {
    let config: MapConfig = toml::de::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the map configuration from `path`, or the embedded default when
/// `path` is `None`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed, or
/// validated.
pub fn load_map_config(path: Option<&Path>) -> Result<MapConfig, ConfigError> {
    match path {
        Some(path) => {
            log::info!("Loading map configuration from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            parse_map_config(&text)
        }
        None => Ok(default_map_config()),
    }
}

/// Applies environment variable overrides to `config`.
pub fn apply_env_overrides(config: &mut MapConfig) {
    if let Ok(url) = std::env::var(FEED_URL_ENV)
        && !url.trim().is_empty()
    {
        log::info!("Using feed URL from {FEED_URL_ENV}: {url}");
        config.feed.url = Some(url.trim().to_string());
    }
}

/// Checks that a configuration can be rendered.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if there are no base layers, a base
/// layer name repeats, or the initial view is out of range.
pub fn validate(config: &MapConfig) -> Result<(), ConfigError> {
    if config.base_layers.is_empty() {
        return Err(invalid("at least one base layer is required"));
    }

    let mut seen = BTreeSet::new();
    for layer in &config.base_layers {
        if layer.name.trim().is_empty() {
            return Err(invalid("base layer with empty name"));
        }
        if !seen.insert(layer.name.as_str()) {
            return Err(invalid(&format!("duplicate base layer '{}'", layer.name)));
        }
    }

    let [latitude, longitude] = config.view.center;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(invalid(&format!("center latitude {latitude} out of range")));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(invalid(&format!(
            "center longitude {longitude} out of range"
        )));
    }
    if config.view.zoom > MAX_ZOOM {
        return Err(invalid(&format!(
            "zoom {} exceeds maximum {MAX_ZOOM}",
            config.view.zoom
        )));
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_string(),
    }
}
