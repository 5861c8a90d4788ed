//! Snapshot of another ship, as seen by an AI agent.
//!
//! Agents never hold live references into other agents' state; the host (or
//! `fc-sim`) captures a `ShipSnapshot` per target at the start of each tick.
//! That keeps the tick data-race free — everything an agent reads about the
//! world is immutable for the duration of the tick.

use glam::Vec3;

use crate::{AgentId, ShipKinematics};

/// Immutable per-tick view of a target (or threat) ship.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSnapshot {
    /// The simulation identity of the ship, if it has one.  Standalone hosts
    /// may leave this `INVALID`.
    pub agent: AgentId,
    pub kinematics: ShipKinematics,
    /// Bounding-sphere radius, metres.
    pub radius_m: f32,
    /// Set when the ship has been destroyed; targeting states complete on it.
    pub destroyed: bool,
    /// Half-angle of the ship's forward firing cone, radians.
    pub fire_cone_half_angle_rad: f32,
    /// Reach of the firing cone, metres.
    pub fire_cone_range_m: f32,
}

impl ShipSnapshot {
    /// A live, unarmed target at `kinematics`.
    pub fn new(agent: AgentId, kinematics: ShipKinematics, radius_m: f32) -> Self {
        Self {
            agent,
            kinematics,
            radius_m,
            destroyed: false,
            fire_cone_half_angle_rad: 15f32.to_radians(),
            fire_cone_range_m: 1_500.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.kinematics.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.kinematics.velocity
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.kinematics.forward()
    }
}
