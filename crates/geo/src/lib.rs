//! Coordinate datum utilities for marsgeo.
//!
//! This crate provides:
//! - Tagged point types for the WGS-84 and GCJ-02 datums
//! - The GCJ-02 offset transform and its approximate inverse
//! - Batch conversion with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use marsgeo_geo::{to_gcj02, to_wgs84, Wgs84Point};
//!
//! let tiananmen = Wgs84Point::new(116.3975, 39.9087);
//! let shown = to_gcj02(tiananmen);
//! let back = to_wgs84(shown);
//!
//! assert!((back.lng - tiananmen.lng).abs() < 1e-4);
//! assert!((back.lat - tiananmen.lat).abs() < 1e-4);
//! ```

mod transform;
mod point;
pub mod batch;
mod error;

#[cfg(feature = "wasm")]
mod wasm;

pub use transform::{to_gcj02, to_wgs84, SEMI_MAJOR_AXIS, ECCENTRICITY_SQUARED};
pub use point::{Gcj02Point, Wgs84Point};
pub use batch::{to_gcj02_batch, to_gcj02_json, to_wgs84_batch, to_wgs84_json};
pub use error::{GeoError, GeoErrorCode, Result};
