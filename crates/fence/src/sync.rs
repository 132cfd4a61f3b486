//! Geo-fence editing synchronizer.
//!
//! Keeps one canonical [`GeoFence`] (WGS-84) consistent with the form fields
//! and with the GCJ-02 marker and circle on the map. Three sources can change
//! it: typed field edits, marker drags, and newly drawn circles.
//!
//! Typed edits are read from the fields and pushed to the overlay. Drags and
//! draws are read from the overlay event and pushed to the fields. No step
//! reads both sides, so the two representations cannot chase each other.
//!
//! Bad field content never fails a step; the center falls back to the
//! configured default and the next valid edit repairs it.

use marsgeo_core::config::FenceConfig;
use marsgeo_geo::{to_gcj02, to_wgs84, Gcj02Point, Wgs84Point};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::channel::ChangeNotifier;
use crate::fields::{Field, FieldStore};
use crate::overlay::{Overlay, ShapeId};
use crate::record::{format_coordinate, format_radius, parse_center, parse_radius, GeoFence};

/// An input to the editor, delivered by the host's event loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FenceEvent {
    /// First reconciliation, scheduled once the map has initialised.
    Bootstrap,
    /// The user typed into a field; its new text is already in the store.
    FieldInput { field: Field },
    /// The drawing tool produced a new circle.
    DrawCreated {
        shape: ShapeId,
        center: Gcj02Point,
        radius_m: f64,
    },
    /// The marker was dropped at a new position.
    MarkerDragged { position: Gcj02Point },
}

/// Editor session state.
///
/// Owns the field store, the overlay and the notifier for the length of one
/// editing session.
#[derive(Debug)]
pub struct Synchronizer<F, O, N> {
    fields: F,
    overlay: O,
    notifier: N,
    config: FenceConfig,
    fence: GeoFence,
    bootstrapped: bool,
}

impl<F, O, N> Synchronizer<F, O, N>
where
    F: FieldStore,
    O: Overlay,
    N: ChangeNotifier,
{
    /// Mounts the editor. Nothing is reconciled until [`FenceEvent::Bootstrap`];
    /// the host should deliver it after [`FenceConfig::bootstrap_delay`].
    pub fn new(fields: F, overlay: O, notifier: N, config: FenceConfig) -> Self {
        let fence = GeoFence::new(fallback_center(&config), config.default_radius_m);
        Self {
            fields,
            overlay,
            notifier,
            config,
            fence,
            bootstrapped: false,
        }
    }

    /// Processes one event to completion.
    pub fn handle(&mut self, event: FenceEvent) {
        match event {
            FenceEvent::Bootstrap => self.bootstrap(),
            FenceEvent::FieldInput { field } => self.field_input(field),
            FenceEvent::DrawCreated {
                shape,
                center,
                radius_m,
            } => self.draw_created(shape, center, radius_m),
            FenceEvent::MarkerDragged { position } => self.marker_dragged(position),
        }
    }

    /// Reads center and radius from the fields and positions the overlay.
    ///
    /// Safe to repeat; each run fully overwrites the overlay from the fields.
    pub fn bootstrap(&mut self) {
        self.reconcile_center();
        self.apply_radius();
        self.bootstrapped = true;
        debug!(
            lat = self.fence.center.lat,
            lng = self.fence.center.lng,
            radius_m = self.fence.radius_m,
            "Geo-fence editor initialised"
        );
    }

    /// A field was edited.
    pub fn field_input(&mut self, field: Field) {
        match field {
            Field::Latitude | Field::Longitude => self.reconcile_center(),
            Field::Radius => self.apply_radius(),
        }
    }

    /// A new circle was drawn; it replaces the fence.
    pub fn draw_created(&mut self, shape: ShapeId, center: Gcj02Point, radius_m: f64) {
        let stored = to_wgs84(center);
        let radius_text = format_radius(radius_m);

        self.write_center(stored);
        self.fields.set(Field::Radius, radius_text);

        self.overlay.move_marker(center);
        self.overlay.move_circle(center);
        self.overlay.set_circle_radius(radius_m);
        self.overlay.remove_shape(shape);

        self.fence = GeoFence::new(stored, radius_m);
        debug!(?shape, lat = stored.lat, lng = stored.lng, radius_m, "Geo-fence drawn");
        self.notifier.fields_changed();
    }

    /// The marker was dragged; the center moves, the radius stays.
    pub fn marker_dragged(&mut self, position: Gcj02Point) {
        let stored = to_wgs84(position);

        self.write_center(stored);
        self.overlay.move_marker(position);
        self.overlay.move_circle(position);

        self.fence.center = stored;
        debug!(lat = stored.lat, lng = stored.lng, "Geo-fence center dragged");
        self.notifier.fields_changed();
    }

    /// The canonical record.
    pub fn fence(&self) -> &GeoFence {
        &self.fence
    }

    /// Whether the first reconciliation has run.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// The form fields.
    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Mutable field access, for hosts that apply typed text before
    /// delivering [`FenceEvent::FieldInput`].
    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    /// The map overlay.
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Mutable overlay access, for hosts relaying drawing-tool shapes.
    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    /// The change notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable notifier access, for draining queued notifications.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Unmounts the editor, handing back its collaborators.
    pub fn into_parts(self) -> (F, O, N) {
        (self.fields, self.overlay, self.notifier)
    }

    /// Center from the fields, or the fallback written back into them.
    fn reconcile_center(&mut self) {
        let latitude = self.fields.get(Field::Latitude);
        let longitude = self.fields.get(Field::Longitude);

        let center = match parse_center(&latitude, &longitude) {
            Ok(center) => center,
            Err(err) => {
                let fallback = fallback_center(&self.config);
                warn!(
                    error = %err,
                    latitude = %latitude,
                    longitude = %longitude,
                    "Unusable geo-fence center, falling back to default"
                );
                self.fields.set(Field::Latitude, fallback.lat.to_string());
                self.fields.set(Field::Longitude, fallback.lng.to_string());
                fallback
            }
        };

        let shown = to_gcj02(center);
        self.overlay.move_marker(shown);
        self.overlay.move_circle(shown);
        self.overlay.set_view(shown, self.config.zoom);
        self.fence.center = center;
    }

    /// Radius field straight to the circle; meters need no projection.
    fn apply_radius(&mut self) {
        let text = self.fields.get(Field::Radius);
        match parse_radius(&text) {
            Ok(radius_m) => {
                self.overlay.set_circle_radius(radius_m);
                self.fence.radius_m = radius_m;
            }
            Err(err) => debug!(error = %err, "Ignoring radius edit"),
        }
    }

    fn write_center(&mut self, center: Wgs84Point) {
        self.fields.set(Field::Latitude, format_coordinate(center.lat));
        self.fields.set(Field::Longitude, format_coordinate(center.lng));
    }
}

fn fallback_center(config: &FenceConfig) -> Wgs84Point {
    Wgs84Point::new(config.fallback_longitude, config.fallback_latitude)
}
