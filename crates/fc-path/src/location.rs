//! Named world locations.
//!
//! A `Location` is the point-target analogue of a path: a named position an
//! agent can be sent to, with an arrival radius.  Owned by the host's
//! location manager and read-only from the AI's perspective.

use fc_core::Vec3;

/// A named point of interest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub name: String,
    pub position: Vec3,
    /// Arrival tolerance, metres.  Zero means "use the ship's radius".
    pub radius_m: f32,
}

impl Location {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            radius_m: 0.0,
        }
    }

    pub fn with_radius(mut self, radius_m: f32) -> Self {
        self.radius_m = radius_m;
        self
    }
}
