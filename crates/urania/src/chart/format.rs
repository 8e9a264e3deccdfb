//! Text helpers for the chart legends.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::{ChartError, Result};

/// Longest location string shown in the header.
pub const MAX_LOCATION_LEN: usize = 35;

/// Format decimal degrees with XML character entities.
///
/// Precision 3 gives `DD°MM'SS"`, 2 gives `DD°MM'` with rounded minutes and 1
/// gives `DD°`.
pub fn format_degrees(value: f64, precision: u8) -> Result<String> {
    let degrees = value.trunc();
    let minutes_exact = (value - degrees) * 60.0;
    let minutes = minutes_exact.trunc();
    let seconds = ((minutes_exact - minutes) * 60.0).round_ties_even();
    let (d, m, s) = (degrees as i64, minutes as i64, seconds as i64);

    match precision {
        3 => Ok(format!("{:02}&#176;{:02}&#39;{:02}&#34;", d, m, s)),
        2 => Ok(format!(
            "{:02}&#176;{:02}&#39;",
            d,
            minutes_exact.round_ties_even() as i64
        )),
        1 => Ok(format!("{:02}&#176;", d)),
        other => Err(ChartError::validation(format!(
            "degree precision must be 1, 2 or 3, got {}",
            other
        ))),
    }
}

fn compact_coordinate(value: f64, positive: &str, negative: &str) -> String {
    let (label, value) = if value < 0.0 {
        (negative, value.abs())
    } else {
        (positive, value)
    };
    let degrees = value.trunc();
    let minutes = ((value - degrees) * 60.0).trunc();
    let initial = label
        .chars()
        .next()
        .map(|c| c.to_lowercase().to_string())
        .unwrap_or_default();
    format!("{}{}{}", degrees as i64, initial, minutes as i64)
}

/// `52.1234` with labels North/South becomes `52n7 `.
pub fn format_latitude(value: f64, north: &str, south: &str) -> String {
    format!("{} ", compact_coordinate(value, north, south))
}

/// `-13.4` with labels East/West becomes `13w24`.
pub fn format_longitude(value: f64, east: &str, west: &str) -> String {
    compact_coordinate(value, east, west)
}

fn truncate(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Keep long locations readable: the first and last comma parts are kept,
/// anything still too long is cut.
pub fn shorten_location(location: &str) -> String {
    if location.chars().count() <= MAX_LOCATION_LEN {
        return location.to_string();
    }
    let parts: Vec<&str> = location.split(',').collect();
    if parts.len() > 1 {
        let joined = format!("{}, {}", parts[0], parts[parts.len() - 1]);
        if joined.chars().count() > MAX_LOCATION_LEN {
            truncate(&joined, MAX_LOCATION_LEN)
        } else {
            joined
        }
    } else {
        truncate(location, MAX_LOCATION_LEN)
    }
}

/// `1 January 2000 · 12:05`
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    format!(
        "{} {} {} · {:02}:{:02}",
        datetime.day(),
        datetime.format("%B"),
        datetime.year(),
        datetime.hour(),
        datetime.minute()
    )
}

/// `1 1 2000 12:05`, the terse form used for a synastry partner.
pub fn format_datetime_short(datetime: &NaiveDateTime) -> String {
    format!(
        "{} {} {} {:02}:{:02}",
        datetime.day(),
        datetime.month(),
        datetime.year(),
        datetime.hour(),
        datetime.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(5.5, 3).unwrap(), "05&#176;30&#39;00&#34;");
        assert_eq!(format_degrees(12.26, 2).unwrap(), "12&#176;16&#39;");
        assert_eq!(format_degrees(29.99, 1).unwrap(), "29&#176;");
        assert!(matches!(
            format_degrees(1.0, 4),
            Err(ChartError::Validation { .. })
        ));
        assert!(format_degrees(1.0, 0).is_err());
    }

    #[test]
    fn test_coordinates() {
        assert_eq!(format_latitude(52.1234, "North", "South"), "52n7 ");
        assert_eq!(format_latitude(-33.5, "North", "South"), "33s30 ");
        assert_eq!(format_longitude(-13.4, "East", "West"), "13w24");
    }

    #[test]
    fn test_shorten_location() {
        assert_eq!(shorten_location("Rome"), "Rome");
        assert_eq!(
            shorten_location("Rome, Lazio, Central Italy, Italy, Europe"),
            "Rome, Europe"
        );
        let long = "A".repeat(40);
        assert_eq!(shorten_location(&long), format!("{}...", "A".repeat(35)));
    }

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2003, 2, 22)
            .unwrap()
            .and_hms_opt(3, 5, 0)
            .unwrap();
        assert_eq!(format_datetime(&dt), "22 February 2003 · 03:05");
        assert_eq!(format_datetime_short(&dt), "22 2 2003 03:05");
    }
}
