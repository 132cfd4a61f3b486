//! Interfaces to the map widget.
//!
//! Everything here takes display-datum (GCJ-02) coordinates. The widget does
//! the drawing; these traits only describe what the editor asks of it.

use marsgeo_geo::Gcj02Point;
use serde::{Deserialize, Serialize};

use crate::marker::MarkerRender;

/// Handle of a shape created by the widget's drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// Viewport control.
pub trait MapView {
    /// Centres the map on `center` at `zoom`.
    fn set_view(&mut self, center: Gcj02Point, zoom: u8);

    /// Current zoom level.
    fn zoom(&self) -> u8;
}

/// A layer that draws free-standing markers.
pub trait MarkerLayer {
    /// Draws or redraws the layer's marker.
    fn draw_marker(&mut self, render: &MarkerRender);
}

/// The editor's persistent marker and circle.
pub trait Overlay: MapView {
    /// Moves the draggable marker.
    fn move_marker(&mut self, at: Gcj02Point);

    /// Moves the circle's center.
    fn move_circle(&mut self, center: Gcj02Point);

    /// Resizes the circle; meters, no projection.
    fn set_circle_radius(&mut self, radius_m: f64);

    /// Removes a shape left behind by the drawing tool.
    fn remove_shape(&mut self, shape: ShapeId);
}

/// Overlay state kept in memory, for headless hosts and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryOverlay {
    pub view_center: Option<Gcj02Point>,
    pub zoom: u8,
    pub marker: Option<Gcj02Point>,
    pub circle_center: Option<Gcj02Point>,
    pub circle_radius_m: f64,
    pub drawn_shapes: Vec<ShapeId>,
    pub rendered_marker: Option<MarkerRender>,
}

impl MemoryOverlay {
    /// Empty map at the given zoom with a circle of `circle_radius_m`.
    pub fn new(zoom: u8, circle_radius_m: f64) -> Self {
        Self {
            view_center: None,
            zoom,
            marker: None,
            circle_center: None,
            circle_radius_m,
            drawn_shapes: Vec::new(),
            rendered_marker: None,
        }
    }

    /// Simulates the drawing tool adding a transient shape.
    pub fn add_drawn_shape(&mut self, shape: ShapeId) {
        self.drawn_shapes.push(shape);
    }
}

impl Default for MemoryOverlay {
    fn default() -> Self {
        Self::new(0, 100.0)
    }
}

impl MapView for MemoryOverlay {
    fn set_view(&mut self, center: Gcj02Point, zoom: u8) {
        self.view_center = Some(center);
        self.zoom = zoom;
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }
}

impl MarkerLayer for MemoryOverlay {
    fn draw_marker(&mut self, render: &MarkerRender) {
        self.marker = Some(render.at());
        self.rendered_marker = Some(render.clone());
    }
}

impl Overlay for MemoryOverlay {
    fn move_marker(&mut self, at: Gcj02Point) {
        self.marker = Some(at);
    }

    fn move_circle(&mut self, center: Gcj02Point) {
        self.circle_center = Some(center);
    }

    fn set_circle_radius(&mut self, radius_m: f64) {
        self.circle_radius_m = radius_m;
    }

    fn remove_shape(&mut self, shape: ShapeId) {
        self.drawn_shapes.retain(|s| *s != shape);
    }
}
