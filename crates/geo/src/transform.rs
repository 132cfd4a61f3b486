//! WGS-84 ↔ GCJ-02 transform.
//!
//! GCJ-02 applies an empirical, non-linear offset to WGS-84 coordinates. The
//! offset is modelled by two polynomial-plus-harmonic corrections centred on
//! (105°E, 35°N) and scaled onto the Krasovsky ellipsoid.
//!
//! The inverse subtracts the offset evaluated at the GCJ-02 input instead of
//! solving for the WGS-84 point. Stored geo-fences were produced with this
//! approximation, so it must not be replaced by an iterative solver. The
//! residual stays well below 1e-4 degrees inside China.

use std::f64::consts::PI;

use crate::{Gcj02Point, Wgs84Point};

/// Semi-major axis of the Krasovsky 1940 ellipsoid, in meters.
pub const SEMI_MAJOR_AXIS: f64 = 6378245.0;

/// First eccentricity squared of the Krasovsky 1940 ellipsoid.
pub const ECCENTRICITY_SQUARED: f64 = 0.006_693_421_622_965_943_23;

const ORIGIN_LNG: f64 = 105.0;
const ORIGIN_LAT: f64 = 35.0;

/// Converts a WGS-84 point to GCJ-02.
///
/// Total over all inputs; results outside China are numerically meaningless.
///
/// # Example
/// ```
/// use marsgeo_geo::{to_gcj02, Wgs84Point};
///
/// let gcj = to_gcj02(Wgs84Point::new(116.404, 39.915));
/// assert!((gcj.lng - 116.410244).abs() < 1e-6);
/// assert!((gcj.lat - 39.916404).abs() < 1e-6);
/// ```
#[inline]
pub fn to_gcj02(p: Wgs84Point) -> Gcj02Point {
    let (d_lng, d_lat) = offset(p.lng, p.lat);
    Gcj02Point::new(p.lng + d_lng, p.lat + d_lat)
}

/// Converts a GCJ-02 point back to WGS-84 (approximate inverse).
#[inline]
pub fn to_wgs84(p: Gcj02Point) -> Wgs84Point {
    let (d_lng, d_lat) = offset(p.lng, p.lat);
    Wgs84Point::new(p.lng - d_lng, p.lat - d_lat)
}

/// Offset in degrees `(d_lng, d_lat)` evaluated at `(lng, lat)`.
#[inline]
fn offset(lng: f64, lat: f64) -> (f64, f64) {
    let x = lng - ORIGIN_LNG;
    let y = lat - ORIGIN_LAT;

    let mut d_lat = delta_lat(x, y);
    let mut d_lng = delta_lng(x, y);

    let rad_lat = lat * PI / 180.0;
    let sin_lat = rad_lat.sin();
    let magic = 1.0 - ECCENTRICITY_SQUARED * sin_lat * sin_lat;
    let sqrt_magic = magic.sqrt();

    d_lat = (d_lat * 180.0)
        / ((SEMI_MAJOR_AXIS * (1.0 - ECCENTRICITY_SQUARED)) / (magic * sqrt_magic) * PI);
    d_lng = (d_lng * 180.0) / (SEMI_MAJOR_AXIS / sqrt_magic * rad_lat.cos() * PI);

    (d_lng, d_lat)
}

fn delta_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn delta_lng(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}
