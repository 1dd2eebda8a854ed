#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for writing the earthquake map's display files.
//!
//! Fetches the configured feed once, renders it through
//! [`quake_map_render::MapDocument`], and writes the results to the output
//! directory:
//!
//! * `earthquakes.geojson`: styled marker features with popups
//! * `legend.json` / `legend.html`: the legend control contents
//! * `map.json`: initial view, base layers, and overlay name
//!
//! The feed is only downloaded when the markers are requested.

use std::path::{Path, PathBuf};

use quake_map_cli_utils::{MultiProgress, spinner};
use quake_map_feed::ConfigError;
use quake_map_feed::config::{apply_env_overrides, load_map_config};
use quake_map_feed::fetch::{build_client, fetch_records};
use quake_map_feed_models::{FeedLevel, FeedPeriod, MapConfig};
use quake_map_render::MapDocument;
use serde::Serialize;

/// Output name constant for the styled marker `GeoJSON`.
pub const OUTPUT_MARKERS: &str = "markers";

/// Output name constant for the legend JSON and HTML.
pub const OUTPUT_LEGEND: &str = "legend";

/// Output name constant for the map settings JSON.
pub const OUTPUT_MAP: &str = "map";

/// All outputs, in generation order.
pub const ALL_OUTPUTS: &[&str] = &[OUTPUT_MARKERS, OUTPUT_LEGEND, OUTPUT_MAP];

const MARKERS_FILE: &str = "earthquakes.geojson";
const LEGEND_JSON_FILE: &str = "legend.json";
const LEGEND_HTML_FILE: &str = "legend.html";
const MAP_FILE: &str = "map.json";

/// Returns the default output directory, `data/generated` under the
/// workspace root.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR` so output paths do
/// not depend on the caller's working directory.
#[must_use]
pub fn output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(
            || PathBuf::from("data/generated"),
            |root| root.join("data/generated"),
        )
}

/// Shared arguments for all generate subcommands.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Map configuration file. The embedded default is used when `None`.
    pub config: Option<PathBuf>,

    /// Feed URL, overriding the configuration and `QUAKE_FEED_URL`.
    pub feed_url: Option<String>,

    /// Feed magnitude tier, overriding the configuration.
    pub level: Option<FeedLevel>,

    /// Feed time window, overriding the configuration.
    pub period: Option<FeedPeriod>,
}

/// Loads the map configuration and applies overrides.
///
/// Precedence, highest first: command-line arguments, environment
/// variables, configuration file, embedded default.
///
/// # Errors
///
/// Returns [`ConfigError`] if the configuration file cannot be loaded.
pub fn resolve_config(args: &GenerateArgs) -> Result<MapConfig, ConfigError> {
    let mut config = load_map_config(args.config.as_deref())?;
    apply_env_overrides(&mut config);

    if let Some(level) = args.level {
        config.feed.level = level;
        config.feed.url = None;
    }
    if let Some(period) = args.period {
        config.feed.period = period;
        config.feed.url = None;
    }
    if let Some(url) = &args.feed_url {
        config.feed.url = Some(url.clone());
    }

    Ok(config)
}

/// Runs the generation pipeline for `requested_outputs`.
///
/// Returns the paths of every file written.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the feed
/// request fails, or any output cannot be written.
pub async fn run(
    args: &GenerateArgs,
    dir: &Path,
    requested_outputs: &[&str],
    multi: Option<&MultiProgress>,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;

    let records = if requested_outputs.contains(&OUTPUT_MARKERS) {
        let url = config.feed.url();
        let progress = multi.map(|m| spinner(m, &format!("Fetching {url}")));
        let client = build_client()?;
        let result = fetch_records(&client, &url).await;
        if let Some(bar) = progress {
            match &result {
                Ok(records) => {
                    bar.finish_with_message(format!("Fetched {} earthquakes", records.len()));
                }
                Err(_) => bar.finish_and_clear(),
            }
        }
        result?
    } else {
        log::info!("Markers not requested, skipping feed download");
        Vec::new()
    };

    let doc = MapDocument::build(config, &records);
    write_outputs(&doc, dir, requested_outputs)
}

/// Writes the requested outputs of `doc` into `dir`.
///
/// # Errors
///
/// Returns an error if an output name is unknown, serialization fails, or
/// a file cannot be written.
pub fn write_outputs(
    doc: &MapDocument,
    dir: &Path,
    requested_outputs: &[&str],
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for &name in requested_outputs {
        match name {
            OUTPUT_MARKERS => {
                written.push(write_json(dir, MARKERS_FILE, &doc.feature_collection()?)?);
            }
            OUTPUT_LEGEND => {
                written.push(write_json(dir, LEGEND_JSON_FILE, &doc.legend_document())?);
                let html_path = dir.join(LEGEND_HTML_FILE);
                std::fs::write(&html_path, &doc.legend_html)?;
                written.push(html_path);
            }
            OUTPUT_MAP => {
                written.push(write_json(dir, MAP_FILE, &doc.map_settings())?);
            }
            other => return Err(format!("Unknown output '{other}'").into()),
        }
        log::info!("{name}: written");
    }

    Ok(written)
}

fn write_json<T: Serialize>(
    dir: &Path,
    file_name: &str,
    value: &T,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(file_name);
    std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}
