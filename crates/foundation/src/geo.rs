use serde::{Deserialize, Serialize};

/// Geographic position in degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `None` unless both components are finite and in range.
    pub fn checked(lat: f64, lon: f64) -> Option<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self { lat, lon })
    }
}

/// Parses a decimal number written with either `.` or `,` as separator.
///
/// Only the first comma is treated as a decimal separator, matching how the
/// source datasets write coordinates (`50,4445`). Surrounding whitespace is
/// ignored. Returns `None` for empty, malformed, or non-finite input.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replacen(',', ".", 1);
    let value = normalized.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Splits a combined coordinate field of the form
/// `"50°26′N 18°51′E / 50,4445 18,8554"` into a position.
///
/// Everything before the first `/` is ignored; the remainder must hold two
/// whitespace-separated decimals (latitude first).
pub fn parse_coordinate_pair(raw: &str) -> Option<LatLon> {
    let (_, after_slash) = raw.split_once('/')?;
    let mut parts = after_slash.split_whitespace();
    let lat = parse_decimal(parts.next()?)?;
    let lon = parse_decimal(parts.next()?)?;
    LatLon::checked(lat, lon)
}
