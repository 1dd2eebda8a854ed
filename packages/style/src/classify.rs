//! Magnitude to marker style classification.

use quake_map_quake_models::{DEFAULT_BAND, MAGNITUDE_BANDS, MagnitudeBand, StyleAttributes};

static BANDS: [MagnitudeBand; MAGNITUDE_BANDS.len()] = MAGNITUDE_BANDS;

/// Returns the band a magnitude falls into.
///
/// Bands are scanned from the highest threshold down and the first match
/// wins. `NaN` fails every comparison and lands in the default band.
#[must_use]
pub fn band_for(magnitude: f64) -> &'static MagnitudeBand {
    BANDS
        .iter()
        .find(|band| band.contains(magnitude))
        .unwrap_or(&DEFAULT_BAND)
}

/// Maps a magnitude to the render attributes of its marker.
#[must_use]
pub fn classify(magnitude: f64) -> StyleAttributes {
    StyleAttributes::for_band(band_for(magnitude))
}

/// Like [`classify`], but a missing magnitude yields the default band.
#[must_use]
pub fn classify_optional(magnitude: Option<f64>) -> StyleAttributes {
    magnitude.map_or_else(|| StyleAttributes::for_band(&DEFAULT_BAND), classify)
}
