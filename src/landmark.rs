use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::bundle::ResourceBundle;
use crate::error::StoreError;

pub const LANDMARK_DATA_FILE: &str = "landmarkData.json";

/// Geographic position in floating-point degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]. The
/// loader accepts out-of-range values as-is; the shipped data is trusted
/// the same way the bundled images are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// The degree fields are never NaN in practice, so bitwise identity is a
// usable equivalence for keying records by position.
impl Eq for Coordinates {}

impl Hash for Coordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

/// Fixed category set. Serialized as the exact strings "Featured",
/// "Lakes", "Rivers"; anything else is a decode error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Featured,
    Lakes,
    Rivers,
}

/// A point of interest decoded from the bundled data file. Immutable once
/// loaded; lives for the life of whoever owns the loaded sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub id: i32,
    pub name: String,
    pub image_name: String,
    pub coordinates: Coordinates,
    pub state: String,
    pub park: String,
    pub category: Category,
}

impl Eq for Landmark {}

impl Hash for Landmark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.image_name.hash(state);
        self.coordinates.hash(state);
        self.state.hash(state);
        self.park.hash(state);
        self.category.hash(state);
    }
}

impl Landmark {
    /// Center point for map rendering.
    pub fn location_coordinate(&self) -> Coordinates {
        self.coordinates
    }
}

/// Decode the bundled landmark data file, preserving file order.
///
/// Decoding is strict: a missing file or a record that does not conform to
/// the schema is an error, not a partially-loaded sequence.
pub fn load_landmarks(bundle: &dyn ResourceBundle) -> Result<Vec<Landmark>, StoreError> {
    let data = bundle
        .bytes(LANDMARK_DATA_FILE)
        .ok_or_else(|| StoreError::ResourceNotFound(LANDMARK_DATA_FILE.to_string()))?;

    serde_json::from_slice(&data).map_err(|e| StoreError::DecodeFailure {
        name: LANDMARK_DATA_FILE.to_string(),
        reason: e.to_string(),
    })
}
