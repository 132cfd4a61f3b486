//! Batch datum conversion with optional parallelism.
//!
//! Used when a whole path or a set of stored fences has to be projected for
//! display at once. Output order always matches input order.

use crate::{to_gcj02, to_wgs84, Gcj02Point, Result, Wgs84Point};

/// Converts a slice of WGS-84 points to GCJ-02.
///
/// # Example
/// ```
/// use marsgeo_geo::{to_gcj02_batch, Wgs84Point};
///
/// let path = vec![
///     Wgs84Point::new(116.3975, 39.9087),
///     Wgs84Point::new(121.4737, 31.2304),
/// ];
///
/// let shown = to_gcj02_batch(&path);
/// assert_eq!(shown.len(), 2);
/// ```
pub fn to_gcj02_batch(points: &[Wgs84Point]) -> Vec<Gcj02Point> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points.par_iter().map(|p| to_gcj02(*p)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points.iter().map(|p| to_gcj02(*p)).collect()
    }
}

/// Converts a slice of GCJ-02 points back to WGS-84.
pub fn to_wgs84_batch(points: &[Gcj02Point]) -> Vec<Wgs84Point> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points.par_iter().map(|p| to_wgs84(*p)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points.iter().map(|p| to_wgs84(*p)).collect()
    }
}

/// Converts a JSON array of `{lng, lat}` WGS-84 points to a JSON array of
/// GCJ-02 points.
pub fn to_gcj02_json(points_json: &str) -> Result<String> {
    let points: Vec<Wgs84Point> = serde_json::from_str(points_json)?;
    Ok(serde_json::to_string(&to_gcj02_batch(&points))?)
}

/// Converts a JSON array of `{lng, lat}` GCJ-02 points to a JSON array of
/// WGS-84 points.
pub fn to_wgs84_json(points_json: &str) -> Result<String> {
    let points: Vec<Gcj02Point> = serde_json::from_str(points_json)?;
    Ok(serde_json::to_string(&to_wgs84_batch(&points))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoErrorCode;

    fn create_test_path() -> Vec<Wgs84Point> {
        (0..500)
            .map(|i| Wgs84Point::new(116.0 + i as f64 * 0.001, 39.5 + i as f64 * 0.002))
            .collect()
    }

    #[test]
    fn test_batch_preserves_order() {
        let path = create_test_path();
        let shown = to_gcj02_batch(&path);

        assert_eq!(shown.len(), path.len());
        for (wgs, gcj) in path.iter().zip(&shown) {
            assert_eq!(*gcj, to_gcj02(*wgs));
        }
    }

    #[test]
    fn test_inverse_batch_matches_single() {
        let shown = to_gcj02_batch(&create_test_path());
        let back = to_wgs84_batch(&shown);

        for (gcj, wgs) in shown.iter().zip(&back) {
            assert_eq!(*wgs, to_wgs84(*gcj));
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(to_gcj02_batch(&[]).is_empty());
        assert!(to_wgs84_batch(&[]).is_empty());
    }

    #[test]
    fn test_json_batch() {
        let json = r#"[{"lng": 116.404, "lat": 39.915}]"#;
        let shown: Vec<Gcj02Point> = serde_json::from_str(&to_gcj02_json(json).unwrap()).unwrap();
        assert_eq!(shown, vec![to_gcj02(Wgs84Point::new(116.404, 39.915))]);

        let back: Vec<Wgs84Point> = serde_json::from_str(&to_wgs84_json(json).unwrap()).unwrap();
        assert_eq!(back, vec![to_wgs84(Gcj02Point::new(116.404, 39.915))]);

        assert_eq!(to_gcj02_json("[]").unwrap(), "[]");
    }

    #[test]
    fn test_json_batch_rejects_malformed_input() {
        for bad in ["", "{", r#"[{"lng": 116.4}]"#, r#"{"lng": 116.4, "lat": 39.9}"#] {
            let err = to_gcj02_json(bad).unwrap_err();
            assert_eq!(err.code(), GeoErrorCode::JsonParsing, "input={bad:?}");
            assert!(err.to_string().starts_with("JSON parsing error"));
        }
        assert!(to_wgs84_json("not json").is_err());
    }
}
