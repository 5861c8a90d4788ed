//! Per-agent cursor along a shared path.

use fc_core::WaypointId;

/// Mutable path-following state owned by one agent.
///
/// The shared [`PathData`][crate::PathData] is immutable; everything that
/// changes while following lives here.  Invariant: whenever the associated
/// path has ≥ 2 waypoints, `segment` indexes a valid segment and
/// `target_waypoint` a valid waypoint.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathProgress {
    /// Cached closest segment — seeds the next closest-point search.
    pub segment: usize,
    /// Interpolation parameter of the closest point within `segment`.
    pub t: f32,
    /// Waypoint the agent is currently steering past (end of `segment`).
    pub target_waypoint: usize,
    /// Latched once an open path's final tangent plane has been crossed.
    /// Closed circuits never set this.
    pub finished: bool,
}

impl PathProgress {
    /// Cursor at the start of a path.
    pub fn new() -> Self {
        Self {
            segment: 0,
            t: 0.0,
            target_waypoint: 1,
            finished: false,
        }
    }

    /// Reset to the path start (e.g. after a path reassignment or teleport).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The tracked waypoint as a typed ID (for telemetry).
    #[inline]
    pub fn target_waypoint_id(&self) -> WaypointId {
        WaypointId(self.target_waypoint as u32)
    }
}

impl Default for PathProgress {
    fn default() -> Self {
        Self::new()
    }
}
