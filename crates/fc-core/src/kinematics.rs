//! Ship kinematic state — the per-tick snapshot consumed by the AI.
//!
//! The host (physics engine, replay reader, test harness) owns the source of
//! truth for position and velocity; the AI receives a copy each tick and
//! never writes it back.  Local frame: `+Z` forward, `+Y` up, `+X` right.

use glam::{Quat, Vec3};

/// World-space kinematic state of one ship at a tick boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipKinematics {
    /// World position of the ship's reference point (metres).
    pub position: Vec3,
    /// World rotation.  Identity = facing `+Z` with `+Y` up.
    pub rotation: Quat,
    /// World-space linear velocity (m/s).
    pub velocity: Vec3,
    /// World-space angular velocity (rad/s).
    pub angular_velocity: Vec3,
}

impl ShipKinematics {
    /// Stationary at the origin, facing `+Z`.
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    // ── Local frame axes ──────────────────────────────────────────────────

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    // ── Frame conversion ──────────────────────────────────────────────────

    /// Rotate a world-space direction into the ship's local frame.
    #[inline]
    pub fn world_to_local(&self, v: Vec3) -> Vec3 {
        self.rotation.inverse() * v
    }

    /// Rotate a local-space direction into world space.
    #[inline]
    pub fn local_to_world(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }

    /// Current velocity expressed in the ship's local frame.
    #[inline]
    pub fn local_velocity(&self) -> Vec3 {
        self.world_to_local(self.velocity)
    }

    // ── Scalars ───────────────────────────────────────────────────────────

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl Default for ShipKinematics {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO)
    }
}
