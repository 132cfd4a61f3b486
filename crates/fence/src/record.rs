//! The canonical geo-fence record and its text representation.

use marsgeo_geo::{to_gcj02, Gcj02Point, Wgs84Point};
use serde::{Deserialize, Serialize};

use crate::{FenceError, Result};

/// Decimal places written for latitude and longitude.
pub const COORDINATE_PRECISION: usize = 6;

/// A circular fence, stored in WGS-84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFence {
    /// Center in the storage datum
    pub center: Wgs84Point,
    /// Radius in meters, always positive
    pub radius_m: f64,
}

impl GeoFence {
    /// Creates a new fence.
    pub fn new(center: Wgs84Point, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Center projected for display.
    ///
    /// Radius needs no projection; meters are the same in both datums.
    pub fn display_center(&self) -> Gcj02Point {
        to_gcj02(self.center)
    }
}

/// Parses a center from latitude and longitude field text.
///
/// Both must be finite numbers inside geodetic bounds. Exactly zero counts as
/// unset, since that is what an empty form submits.
///
/// # Example
/// ```
/// use marsgeo_fence::parse_center;
///
/// let center = parse_center("39.9042", "116.4074").unwrap();
/// assert_eq!(center.lat, 39.9042);
///
/// assert!(parse_center("0", "116.4074").is_err());
/// assert!(parse_center("abc", "116.4074").is_err());
/// assert!(parse_center("-95", "116.4074").is_err());
/// ```
pub fn parse_center(latitude: &str, longitude: &str) -> Result<Wgs84Point> {
    let lat = parse_number("latitude", latitude)?;
    let lng = parse_number("longitude", longitude)?;

    if lat == 0.0 {
        return Err(FenceError::Unset("latitude"));
    }
    if lng == 0.0 {
        return Err(FenceError::Unset("longitude"));
    }

    Ok(Wgs84Point::checked(lng, lat)?)
}

/// Parses a radius in meters; must be a positive finite number.
pub fn parse_radius(text: &str) -> Result<f64> {
    let radius = parse_number("radius", text)?;
    if radius > 0.0 {
        Ok(radius)
    } else {
        Err(FenceError::NonPositiveRadius(radius))
    }
}

/// Parses a finite number, ignoring surrounding whitespace.
pub(crate) fn parse_number(field: &'static str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FenceError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

/// Formats a latitude or longitude for a form field.
#[inline]
pub fn format_coordinate(value: f64) -> String {
    format!("{:.*}", COORDINATE_PRECISION, value)
}

/// Formats a radius for a form field, rounded to whole meters.
///
/// Never writes less than 1, so a submitted radius stays positive.
#[inline]
pub fn format_radius(radius_m: f64) -> String {
    format!("{}", radius_m.round().max(1.0) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FenceErrorCode;

    #[test]
    fn test_parse_center_accepts_whitespace() {
        let center = parse_center(" 31.2304 ", "121.4737\n").unwrap();
        assert_eq!(center, Wgs84Point::new(121.4737, 31.2304));
    }

    #[test]
    fn test_parse_center_rejections() {
        let cases = [
            ("abc", "116.4", FenceErrorCode::InvalidNumber),
            ("", "116.4", FenceErrorCode::InvalidNumber),
            ("NaN", "116.4", FenceErrorCode::InvalidNumber),
            ("39.9abc", "116.4", FenceErrorCode::InvalidNumber),
            ("inf", "116.4", FenceErrorCode::InvalidNumber),
            ("0", "116.4", FenceErrorCode::Unset),
            ("39.9", "0.0", FenceErrorCode::Unset),
            ("200", "116.4", FenceErrorCode::OutOfRange),
            ("-95", "116.4", FenceErrorCode::OutOfRange),
            ("39.9", "-180.5", FenceErrorCode::OutOfRange),
        ];

        for (lat, lng, code) in cases {
            let err = parse_center(lat, lng).unwrap_err();
            assert_eq!(err.code(), code, "lat={lat:?} lng={lng:?}");
        }
    }

    #[test]
    fn test_parse_center_bounds_inclusive() {
        assert!(parse_center("90", "180").is_ok());
        assert!(parse_center("-90", "-180").is_ok());
    }

    #[test]
    fn test_parse_radius() {
        assert_eq!(parse_radius("1200").unwrap(), 1200.0);
        assert_eq!(parse_radius("12.5").unwrap(), 12.5);
        assert!(parse_radius("0").is_err());
        assert!(parse_radius("-3").is_err());
        assert!(parse_radius("wide").is_err());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_coordinate(39.9042), "39.904200");
        assert_eq!(format_coordinate(116.123456789), "116.123457");
        assert_eq!(format_radius(499.5), "500");
        assert_eq!(format_radius(1200.2), "1200");
    }

    #[test]
    fn test_format_radius_stays_positive() {
        assert_eq!(format_radius(0.4), "1");
        assert_eq!(format_radius(0.01), "1");
        assert_eq!(format_radius(1.4), "1");
        assert_eq!(format_radius(1.5), "2");
    }

    #[test]
    fn test_display_center_is_projection() {
        let fence = GeoFence::new(Wgs84Point::new(116.4074, 39.9042), 100.0);
        assert_eq!(fence.display_center(), to_gcj02(fence.center));
    }
}
