//! Single-shot download of the earthquake feed.
//!
//! The feed is requested once and read in full. There is no pagination or
//! retry: a failure is returned to the caller, which decides how to surface
//! it.

use std::time::Duration;

use quake_map_quake_models::EarthquakeRecord;

use crate::FeedError;
use crate::parse::parse_feed;

/// Per-request timeout. The month-long `all` feed is several megabytes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds the HTTP client used for feed requests.
///
/// # Errors
///
/// Returns [`FeedError::Http`] if the TLS backend cannot be initialized.
pub fn build_client() -> Result<reqwest::Client, FeedError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("quake-map/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Downloads the feed at `url` and parses it into earthquake records.
///
/// # Errors
///
/// Returns [`FeedError`] if the request fails, the server answers with a
/// non-success status, or the body is not a `GeoJSON` `FeatureCollection`.
pub async fn fetch_records(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<EarthquakeRecord>, FeedError> {
    log::info!("Fetching earthquake feed from {url}");

    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let body = resp.text().await?;
    log::debug!("Received {} bytes from {url}", body.len());

    let records = parse_feed(&body)?;
    log::info!("Loaded {} earthquakes", records.len());
    Ok(records)
}
