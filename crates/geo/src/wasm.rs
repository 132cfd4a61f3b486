//! WASM bindings for the geo crate.
//!
//! These bindings let page scripts project coordinates for the tile provider
//! without carrying their own copy of the offset model.

use crate::{to_gcj02, to_gcj02_json, to_wgs84, to_wgs84_json, Gcj02Point, Wgs84Point};
use wasm_bindgen::prelude::*;

/// Convert a WGS-84 coordinate to GCJ-02.
///
/// # Returns
/// `[lng, lat]` in the GCJ-02 datum
#[wasm_bindgen]
pub fn wgs84_to_gcj02(lng: f64, lat: f64) -> Vec<f64> {
    let p = to_gcj02(Wgs84Point::new(lng, lat));
    vec![p.lng, p.lat]
}

/// Convert a GCJ-02 coordinate to WGS-84.
///
/// # Returns
/// `[lng, lat]` in the WGS-84 datum
#[wasm_bindgen]
pub fn gcj02_to_wgs84(lng: f64, lat: f64) -> Vec<f64> {
    let p = to_wgs84(Gcj02Point::new(lng, lat));
    vec![p.lng, p.lat]
}

/// Convert a JSON array of `{lng, lat}` WGS-84 points to GCJ-02.
///
/// # Returns
/// JSON string of converted points in the same order
#[wasm_bindgen]
pub fn wgs84_to_gcj02_batch(points_json: &str) -> Result<String, JsValue> {
    to_gcj02_json(points_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a JSON array of `{lng, lat}` GCJ-02 points to WGS-84.
#[wasm_bindgen]
pub fn gcj02_to_wgs84_batch(points_json: &str) -> Result<String, JsValue> {
    to_wgs84_json(points_json).map_err(|e| JsValue::from_str(&e.to_string()))
}
