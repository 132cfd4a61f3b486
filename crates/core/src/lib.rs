//! Core utilities for marsgeo
//!
//! This crate provides shared functionality used by the geo-fence editor and
//! the position view:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with per-field defaults
//! - **Display**: Locale-aware time formatting and keystroke filtering
//!
//! # Example
//!
//! ```rust,no_run
//! use marsgeo_core::config::Config;
//!
//! let config = Config::load(None).expect("Invalid configuration");
//! let url = config.schema.tiles.url_for(3372, 1552, 12);
//! println!("{url}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod display;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, FenceConfig, MapOptions, TileConfig};
    pub use crate::display::{accepts_keystroke, LocalTimeFormatter};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
