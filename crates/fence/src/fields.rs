//! Form fields the editor reads from and writes to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One of the three geo-fence form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Latitude in WGS-84 decimal degrees
    Latitude,
    /// Longitude in WGS-84 decimal degrees
    Longitude,
    /// Radius in meters
    Radius,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 3] = [Field::Latitude, Field::Longitude, Field::Radius];

    /// Short name used in logs and event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Radius => "radius",
        }
    }

    /// The form input's `name` attribute.
    pub fn input_name(&self) -> String {
        format!("geo_fence[{}]", self.as_str())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text-valued storage behind the form inputs.
///
/// The host application owns the values and submits them; the editor only
/// reads and overwrites the text.
pub trait FieldStore {
    /// Current text of a field (empty when never set).
    fn get(&self, field: Field) -> String;

    /// Replaces the text of a field.
    fn set(&mut self, field: Field, value: String);
}

/// In-memory field store, for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryFields {
    values: HashMap<Field, String>,
}

impl MemoryFields {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given texts.
    pub fn with_values(latitude: &str, longitude: &str, radius: &str) -> Self {
        let mut fields = Self::new();
        fields.set(Field::Latitude, latitude.to_string());
        fields.set(Field::Longitude, longitude.to_string());
        fields.set(Field::Radius, radius.to_string());
        fields
    }
}

impl FieldStore for MemoryFields {
    fn get(&self, field: Field) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn set(&mut self, field: Field, value: String) {
        self.values.insert(field, value);
    }
}
