//! The sweep-test abstraction between avoidance and the host's physics.

use fc_core::{ShipKinematics, Vec3};

/// Which collision query the avoidance layer runs per probe.
///
/// Higher variants cost more per sweep but catch clearance misses a raycast
/// slips through.  `Off` disables the behavior entirely — it then always
/// reports "no opinion".
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepQuality {
    Off,
    /// Infinitely thin ray from the ship's reference point.
    Raycast,
    /// Sphere of the ship's bounding radius swept along the probe.
    #[default]
    SphereCast,
    /// Full body sweep (host-defined collider set).
    BodySweep,
}

/// Result of a sweep query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepHit {
    /// Distance from the sweep origin to first contact, metres.
    pub distance: f32,
    /// World-space contact point.
    pub point: Vec3,
    /// Surface normal at the contact (unit).
    pub normal: Vec3,
    /// Velocity of the struck body; zero for static geometry.
    pub body_velocity: Vec3,
    /// `true` for static geometry — static hits always count as blocking,
    /// moving hits are additionally filtered through the collision-course
    /// predicate.
    pub is_static: bool,
}

/// Host-provided collision queries.
///
/// Implementations must be `Send + Sync` — one source is typically shared
/// by every agent in the scene, across Rayon workers.
pub trait SweepSource: Send + Sync {
    /// First hit along a ray, within `max_dist`.
    fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<SweepHit>;

    /// First hit of a sphere of `radius` swept along `dir`.
    fn sphere_cast(&self, origin: Vec3, radius: f32, dir: Vec3, max_dist: f32)
        -> Option<SweepHit>;

    /// Full-body sweep.  The default approximates the body with its bounding
    /// sphere; hosts with compound colliders should override.
    fn body_sweep(
        &self,
        kin: &ShipKinematics,
        radius: f32,
        dir: Vec3,
        max_dist: f32,
    ) -> Option<SweepHit> {
        self.sphere_cast(kin.position, radius, dir, max_dist)
    }
}

/// Run the sweep selected by `quality`.  `Off` never hits.
pub fn cast(
    source:      &dyn SweepSource,
    quality:     SweepQuality,
    kin:         &ShipKinematics,
    ship_radius: f32,
    dir:         Vec3,
    max_dist:    f32,
) -> Option<SweepHit> {
    match quality {
        SweepQuality::Off => None,
        SweepQuality::Raycast => source.raycast(kin.position, dir, max_dist),
        SweepQuality::SphereCast => source.sphere_cast(kin.position, ship_radius, dir, max_dist),
        SweepQuality::BodySweep => source.body_sweep(kin, ship_radius, dir, max_dist),
    }
}
