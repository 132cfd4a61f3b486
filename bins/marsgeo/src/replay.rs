//! Scripted editing sessions.
//!
//! A script seeds the form fields and then lists what the user did. Each step
//! is turned into the event the page would deliver and run through a
//! headless editor.

use marsgeo_core::config::FenceConfig;
use marsgeo_fence::{
    EventChannel, FenceEvent, Field, FieldStore, GeoFence, MemoryFields, MemoryOverlay,
    OutboundEvent, ShapeId, Synchronizer,
};
use marsgeo_geo::Gcj02Point;
use serde::{Deserialize, Serialize};

/// Initial text of the three form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitialFields {
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub radius: String,
}

/// One user action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Replace a field's text, as if typed
    Type { field: Field, value: String },
    /// Draw a new circle
    Draw { center: Gcj02Point, radius_m: f64 },
    /// Drop the marker somewhere else
    Drag { position: Gcj02Point },
}

/// A whole session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub fields: InitialFields,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// State after the last step.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub latitude: String,
    pub longitude: String,
    pub radius: String,
    pub fence: GeoFence,
    pub overlay: MemoryOverlay,
    pub notifications: Vec<OutboundEvent>,
}

/// Runs a script from bootstrap to the last step.
pub fn run(script: &Script, config: &FenceConfig) -> Outcome {
    let fields = MemoryFields::with_values(
        &script.fields.latitude,
        &script.fields.longitude,
        &script.fields.radius,
    );
    let overlay = MemoryOverlay::new(config.zoom, config.default_radius_m);
    let mut editor = Synchronizer::new(fields, overlay, EventChannel::new(), config.clone());
    let mut notifications = Vec::new();

    editor.handle(FenceEvent::Bootstrap);

    for (index, step) in script.steps.iter().enumerate() {
        let event = match step {
            Step::Type { field, value } => {
                editor.fields_mut().set(*field, value.clone());
                FenceEvent::FieldInput { field: *field }
            }
            Step::Draw { center, radius_m } => {
                let shape = ShapeId(index as u64);
                editor.overlay_mut().add_drawn_shape(shape);
                FenceEvent::DrawCreated {
                    shape,
                    center: *center,
                    radius_m: *radius_m,
                }
            }
            Step::Drag { position } => FenceEvent::MarkerDragged { position: *position },
        };
        tracing::debug!(step = index, ?event, "Replaying step");
        editor.handle(event);
        notifications.extend(editor.notifier_mut().drain());
    }

    let fence = *editor.fence();
    let (fields, overlay, _) = editor.into_parts();

    Outcome {
        latitude: fields.get(Field::Latitude),
        longitude: fields.get(Field::Longitude),
        radius: fields.get(Field::Radius),
        fence,
        overlay,
        notifications,
    }
}
