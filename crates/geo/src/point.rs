//! Datum-tagged points.
//!
//! Both types carry `(lng, lat)` in decimal degrees. They are distinct so a
//! display coordinate can never be stored as a canonical one by accident.

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};

/// A point in the WGS-84 datum, the canonical storage and interchange datum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wgs84Point {
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
}

/// A point in the GCJ-02 datum, as understood by the tile provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gcj02Point {
    /// Longitude in degrees
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl Wgs84Point {
    /// Creates a new point without validation.
    #[inline]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Creates a point, rejecting non-finite or out-of-range values.
    ///
    /// # Example
    /// ```
    /// use marsgeo_geo::Wgs84Point;
    ///
    /// assert!(Wgs84Point::checked(116.4074, 39.9042).is_ok());
    /// assert!(Wgs84Point::checked(116.4074, -95.0).is_err());
    /// assert!(Wgs84Point::checked(f64::NAN, 39.9042).is_err());
    /// ```
    pub fn checked(lng: f64, lat: f64) -> Result<Self> {
        let point = Self::new(lng, lat);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(GeoError::InvalidCoordinate(format!("lng={lng}, lat={lat}")))
        }
    }

    /// Returns true if both components are finite and within geodetic bounds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Converts to the display datum.
    #[inline]
    pub fn to_gcj02(self) -> Gcj02Point {
        crate::to_gcj02(self)
    }
}

impl Gcj02Point {
    /// Creates a new point without validation.
    #[inline]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Converts back to the storage datum (approximate inverse).
    #[inline]
    pub fn to_wgs84(self) -> Wgs84Point {
        crate::to_wgs84(self)
    }
}
