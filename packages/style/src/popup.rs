//! Popup markup for a single earthquake marker.
//!
//! Place names come straight from the feed and are not escaped.

use chrono::{DateTime, Local, TimeZone};
use quake_map_quake_models::EarthquakeRecord;

/// Format of the Date/Time line, e.g. `Tue Nov 14 2023 22:13:20 GMT+0000`.
///
/// This is a browser `Date` string without its trailing ` (Zone Name)`:
/// chrono has no portable source for localized zone names.
const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Rendered in place of timestamps chrono cannot represent.
const INVALID_TIME: &str = "Invalid Date";

/// Formats the popup for `record`, rendering its time in the local zone.
#[must_use]
pub fn format_popup(record: &EarthquakeRecord) -> String {
    format_popup_in(record, &Local)
}

/// Formats the popup for `record`, rendering its time in `tz`.
///
/// A missing place or magnitude renders as an empty segment.
#[must_use]
pub fn format_popup_in<Tz>(record: &EarthquakeRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let place = record.place.as_deref().unwrap_or_default();
    let time = format_time(record.time_millis, tz);
    let magnitude = record
        .magnitude
        .map(|m| m.to_string())
        .unwrap_or_default();

    format!(
        "<h4>Location: {place}</h4><hr>\
         <p>Date/Time: {time}</p><hr>\
         <p>Magnitude: {magnitude}</p>"
    )
}

fn format_time<Tz>(time_millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp_millis(time_millis).map_or_else(
        || INVALID_TIME.to_string(),
        |utc| utc.with_timezone(tz).format(TIME_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use quake_map_quake_models::Coordinates;

    fn testville() -> EarthquakeRecord {
        EarthquakeRecord {
            id: Some("us7000test".to_string()),
            magnitude: Some(4.2),
            place: Some("10km N of Testville".to_string()),
            time_millis: 1_700_000_000_000,
            location: Coordinates {
                latitude: 35.0,
                longitude: -118.0,
            },
        }
    }

    #[test]
    fn popup_embeds_place_time_and_magnitude() {
        let popup = format_popup_in(&testville(), &Utc);
        assert_eq!(
            popup,
            "<h4>Location: 10km N of Testville</h4><hr>\
             <p>Date/Time: Tue Nov 14 2023 22:13:20 GMT+0000</p><hr>\
             <p>Magnitude: 4.2</p>"
        );
    }

    #[test]
    fn time_follows_requested_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let popup = format_popup_in(&testville(), &tokyo);
        assert!(popup.contains("Wed Nov 15 2023 07:13:20 GMT+0900"), "{popup}");
    }

    #[test]
    fn local_popup_contains_record_fields() {
        let popup = format_popup(&testville());
        assert!(popup.contains("Testville"));
        assert!(popup.contains("Magnitude: 4.2"));
        assert!(popup.contains("2023"));
    }

    #[test]
    fn missing_fields_render_empty_segments() {
        let record = EarthquakeRecord {
            magnitude: None,
            place: None,
            ..testville()
        };
        let popup = format_popup_in(&record, &Utc);
        assert!(popup.starts_with("<h4>Location: </h4>"), "{popup}");
        assert!(popup.ends_with("<p>Magnitude: </p>"), "{popup}");
    }

    #[test]
    fn out_of_range_time_is_reported() {
        let record = EarthquakeRecord {
            time_millis: i64::MAX,
            ..testville()
        };
        assert!(format_popup_in(&record, &Utc).contains("Date/Time: Invalid Date"));
    }

    #[test]
    fn place_is_not_escaped() {
        let record = EarthquakeRecord {
            place: Some("<b>Bold</b>".to_string()),
            ..testville()
        };
        assert!(format_popup_in(&record, &Utc).contains("<b>Bold</b>"));
    }
}
