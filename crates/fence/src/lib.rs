//! Geo-fence editing for GCJ-02 map widgets.
//!
//! This crate provides:
//! - The canonical WGS-84 [`GeoFence`] record and its form-field text format
//! - The [`Synchronizer`] that keeps fields and the GCJ-02 overlay in step
//! - A read-only [`PositionView`](position::PositionView) for single positions
//! - Plain and directional markers behind one [`RotatableMarker`] capability
//! - The page [`EventChannel`] callback table
//!
//! # Example
//!
//! ```
//! use marsgeo_core::config::FenceConfig;
//! use marsgeo_fence::{EventChannel, Field, FieldStore, FenceEvent, MemoryFields, MemoryOverlay, Synchronizer};
//!
//! let fields = MemoryFields::with_values("abc", "116.4074", "500");
//! let mut editor = Synchronizer::new(fields, MemoryOverlay::default(), EventChannel::new(), FenceConfig::default());
//!
//! editor.handle(FenceEvent::Bootstrap);
//! assert_eq!(editor.fields().get(Field::Latitude), "39.9042");
//! assert_eq!(editor.overlay().circle_radius_m, 500.0);
//! ```

mod error;
mod fields;
mod overlay;
mod record;
mod sync;
pub mod channel;
pub mod marker;
pub mod position;

pub use channel::{ChangeNotifier, EventChannel, OutboundEvent};
pub use error::{FenceError, FenceErrorCode, Result};
pub use fields::{Field, FieldStore, MemoryFields};
pub use marker::{Heading, Marker, MarkerKind, RotatableMarker};
pub use overlay::{MapView, MarkerLayer, MemoryOverlay, Overlay, ShapeId};
pub use position::PositionView;
pub use record::{format_coordinate, format_radius, parse_center, parse_radius, GeoFence, COORDINATE_PRECISION};
pub use sync::{FenceEvent, Synchronizer};
