//! CLI utilities for marsgeo tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Coordinate and distance formatting

#![warn(missing_docs)]

pub mod output;
