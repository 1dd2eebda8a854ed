#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Magnitude classification, legend construction, and popup formatting.
//!
//! Everything in this crate is a pure function of its input. The feed and
//! server crates call into it once per record (classification and popups)
//! and once per render pass (legend).

pub mod classify;
pub mod legend;
pub mod popup;

pub use classify::{band_for, classify, classify_optional};
pub use legend::{LEGEND_TITLE, build_legend, render_legend_html};
pub use popup::{format_popup, format_popup_in};
