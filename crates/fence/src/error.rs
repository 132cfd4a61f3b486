//! Error types for the fence crate.
//!
//! None of these reach the page: the synchronizer turns them into its
//! fallback policy. They exist so the policy can log what it absorbed.

use marsgeo_geo::GeoError;
use thiserror::Error;

/// Result type alias for fence operations.
pub type Result<T> = std::result::Result<T, FenceError>;

/// Errors that can occur while reading editor or position input.
#[derive(Debug, Error)]
pub enum FenceError {
    /// Field text is not a finite number
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber {
        /// Field or component name
        field: &'static str,
        /// Raw text
        value: String,
    },

    /// Coordinate is exactly zero, which the form uses as "unset"
    #[error("{0} is unset")]
    Unset(&'static str),

    /// Radius is zero or negative
    #[error("Radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// Position string does not have the `lat,lng[,heading]` shape
    #[error("Invalid position: {0:?}")]
    InvalidPosition(String),

    /// Coordinate rejected by the geo crate
    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// Error code for integration with marsgeo-core error handling.
/// Range: 11xxx for fence errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceErrorCode {
    /// Field text is not a finite number
    InvalidNumber = 11001,
    /// Coordinate left at zero
    Unset = 11002,
    /// Radius is zero or negative
    NonPositiveRadius = 11003,
    /// Malformed position string
    InvalidPosition = 11004,
    /// Out-of-range coordinate
    OutOfRange = 11005,
}

impl FenceError {
    /// Returns the error code for this error.
    pub fn code(&self) -> FenceErrorCode {
        match self {
            FenceError::InvalidNumber { .. } => FenceErrorCode::InvalidNumber,
            FenceError::Unset(_) => FenceErrorCode::Unset,
            FenceError::NonPositiveRadius(_) => FenceErrorCode::NonPositiveRadius,
            FenceError::InvalidPosition(_) => FenceErrorCode::InvalidPosition,
            FenceError::Geo(_) => FenceErrorCode::OutOfRange,
        }
    }
}
