//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use marsgeo_geo::{Gcj02Point, Wgs84Point};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a labelled value
    pub fn field(label: &str, value: &str) {
        println!("  {:<12} {}", label.dimmed(), value);
    }
}

/// Format a WGS-84 point as `lat, lng (WGS-84)`
pub fn format_wgs84(point: &Wgs84Point) -> String {
    format!("{:.6}, {:.6} (WGS-84)", point.lat, point.lng)
}

/// Format a GCJ-02 point as `lat, lng (GCJ-02)`
pub fn format_gcj02(point: &Gcj02Point) -> String {
    format!("{:.6}, {:.6} (GCJ-02)", point.lat, point.lng)
}

/// Format a distance in meters, switching to kilometers from 1000 m
pub fn format_meters(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
