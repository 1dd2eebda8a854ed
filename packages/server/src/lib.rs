#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the earthquake map.
//!
//! Fetches the configured USGS feed once at startup, renders it into a
//! [`MapDocument`], and serves the styled markers, legend, and map settings
//! to the map frontend. The document is immutable after startup. A failed
//! fetch does not stop the server: it serves an empty marker layer and
//! reports the failure through `/api/health` and `/api/earthquakes`.

mod handlers;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use quake_map_feed::FeedError;
use quake_map_feed::config::{apply_env_overrides, load_map_config};
use quake_map_feed::fetch::{build_client, fetch_records};
use quake_map_feed_models::MapConfig;
use quake_map_quake_models::EarthquakeRecord;
use quake_map_render::MapDocument;
use quake_map_server_models::ApiFeedStatus;

/// Environment variable naming a map configuration file.
pub const CONFIG_ENV: &str = "QUAKE_MAP_CONFIG";

/// Shared application state.
pub struct AppState {
    /// Rendered markers, legend, and map settings.
    pub document: MapDocument,
    /// Outcome of the startup feed fetch.
    pub feed: ApiFeedStatus,
}

impl AppState {
    /// Wraps a rendered document. `feed_error` is the message of a failed
    /// fetch, if any.
    #[must_use]
    pub fn new(document: MapDocument, feed_error: Option<String>) -> Self {
        let feed = ApiFeedStatus {
            url: document.config.feed.url(),
            earthquake_count: document.markers.len(),
            error: feed_error,
        };
        Self { document, feed }
    }
}

/// Fetches the feed for `config` and renders it.
///
/// Never fails: a fetch error is logged and kept in the returned state,
/// which then holds an empty marker layer.
pub async fn load_state(config: MapConfig) -> AppState {
    let url = config.feed.url();
    match fetch(&url).await {
        Ok(records) => AppState::new(MapDocument::build(config, &records), None),
        Err(e) => {
            log::error!("Failed to load earthquake feed from {url}: {e}");
            AppState::new(MapDocument::build(config, &[]), Some(e.to_string()))
        }
    }
}

async fn fetch(url: &str) -> Result<Vec<EarthquakeRecord>, FeedError> {
    let client = build_client()?;
    fetch_records(&client, url).await
}

/// Registers the API routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/earthquakes", web::get().to(handlers::earthquakes))
            .route("/markers", web::get().to(handlers::markers))
            .route("/legend", web::get().to(handlers::legend))
            .route("/legend.html", web::get().to(handlers::legend_html))
            .route("/map", web::get().to(handlers::map)),
    );
}

/// Starts the earthquake map API server.
///
/// Loads the map configuration (from `QUAKE_MAP_CONFIG` if set, otherwise
/// the embedded default), fetches the feed, and serves the API on
/// `BIND_ADDR:PORT`. This is a regular async function; the caller provides
/// the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the configuration cannot be
/// loaded, or the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
    let mut config = load_map_config(config_path.as_deref()).map_err(std::io::Error::other)?;
    apply_env_overrides(&mut config);

    log::info!("Loading earthquake feed...");
    let state = web::Data::new(load_state(config).await);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
