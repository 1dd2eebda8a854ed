//! Legend construction from magnitude boundaries.
//!
//! The legend samples the classifier one unit above each boundary to pick
//! the band's color, so its colors always agree with the markers on the map.

use quake_map_quake_models::LegendEntry;

use crate::classify::classify;

/// Heading rendered above the legend entries.
pub const LEGEND_TITLE: &str = "Magnitude";

/// Builds one legend entry per boundary, preserving input order.
///
/// Every entry but the last is labelled `"{b}–{next}"`; the last is the
/// open-ended `"{b}+"`. Non-ascending input is not rejected; each boundary
/// still produces exactly one entry.
#[must_use]
pub fn build_legend(boundaries: &[f64]) -> Vec<LegendEntry> {
    boundaries
        .iter()
        .enumerate()
        .map(|(i, &boundary)| {
            let label = boundaries.get(i + 1).map_or_else(
                || format!("{boundary}+"),
                |next| format!("{boundary}\u{2013}{next}"),
            );
            LegendEntry {
                label,
                color: classify(boundary + 1.0).fill_color,
            }
        })
        .collect()
}

/// Renders legend entries as the HTML fragment shown inside the map's
/// legend control.
#[must_use]
pub fn render_legend_html(entries: &[LegendEntry]) -> String {
    let mut html = format!("<h3>{LEGEND_TITLE}</h3>");
    let last = entries.len().saturating_sub(1);
    for (i, entry) in entries.iter().enumerate() {
        let label = entry.label.replace('\u{2013}', "&ndash;");
        html.push_str(&format!(
            "<i style=\"background: {}\"></i> {label}",
            entry.color
        ));
        if i < last {
            html.push_str("<br>");
        }
    }
    html
}
