//! Estimated maneuvering envelope, characterized once from a `ShipConfig`.
//!
//! The steering and actuation layers never reach into thruster tables on the
//! hot path: `ShipPerformance::estimate` runs at agent initialisation (and
//! again whenever the loadout changes) and caches the handful of scalars the
//! per-tick formulas need.  Re-run it after any change to mass, thrusters,
//! or weapons.

use glam::Vec3;

use crate::config::ShipConfig;
use crate::math;

/// Fraction of flight turn acceleration usable while grounded (wheels and
/// ground effect cut lateral authority roughly in half).
const GROUND_TURN_FACTOR: f32 = 0.5;

/// Cached performance constants for one ship.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPerformance {
    /// Hard cap on commanded speed (m/s).
    pub max_speed: f32,

    /// Lateral acceleration available for turning in flight (m/s²).
    pub max_turn_accel_flight: f32,
    /// Lateral acceleration available for turning on the ground (m/s²).
    pub max_turn_accel_ground: f32,

    /// Braking deceleration along each local axis (m/s²).
    pub max_brake_x: f32,
    pub max_brake_y: f32,
    pub max_brake_z: f32,

    /// Quadratic drag coefficient along the local forward axis (1/m).
    pub drag_z: f32,

    /// Angular acceleration budget per axis (rad/s²).
    pub max_angular_accel: f32,

    /// Thruster ramp time (seconds); feeds PID gain derivation.
    pub ramp_up_secs: f32,

    /// Slowest projectile speed across all mounts (m/s); 0 when unarmed.
    /// The firing solution uses the slowest round so every mount can hit.
    pub min_projectile_speed: f32,
    /// Shortest projectile lifetime across all mounts (s); 0 when unarmed.
    pub min_projectile_lifetime: f32,
}

impl ShipPerformance {
    /// Characterize `config` into a performance envelope.
    ///
    /// Degenerate configurations (zero mass, all-zero thrust) log a warning
    /// and fall back to a conservative default envelope so the agent idles
    /// instead of dividing by zero.
    pub fn estimate(config: &ShipConfig) -> Self {
        if config.mass_kg <= 0.0 {
            log::warn!("ship config has non-positive mass; using default envelope");
            return Self::conservative_default();
        }

        let t = &config.thrusters;
        if t.forward_n <= 0.0 && t.lateral_n <= 0.0 && t.vertical_n <= 0.0 {
            log::warn!("ship config has no usable thrust; using default envelope");
            return Self::conservative_default();
        }

        let inv_mass = 1.0 / config.mass_kg;
        // Turning is flown with the lateral/vertical thrusters; take the
        // stronger pair member as the usable lateral budget.
        let turn_accel = t.lateral_n.max(t.vertical_n) * inv_mass;

        let inertia = config.moment_of_inertia().max(math::EPSILON);

        let (min_speed, min_life) = config
            .weapons
            .iter()
            .fold((f32::INFINITY, f32::INFINITY), |(s, l), w| {
                (s.min(w.projectile_speed), l.min(w.projectile_lifetime_secs))
            });

        Self {
            max_speed:               config.max_speed.max(0.0),
            max_turn_accel_flight:   turn_accel,
            max_turn_accel_ground:   turn_accel * GROUND_TURN_FACTOR,
            max_brake_x:             t.lateral_n * inv_mass,
            max_brake_y:             t.vertical_n * inv_mass,
            max_brake_z:             t.reverse_n * inv_mass,
            drag_z:                  config.drag_coefficient_z.max(0.0),
            max_angular_accel:       t.turn_moment_nm / inertia,
            ramp_up_secs:            t.ramp_up_secs.max(0.01),
            min_projectile_speed:    if min_speed.is_finite() { min_speed } else { 0.0 },
            min_projectile_lifetime: if min_life.is_finite() { min_life } else { 0.0 },
        }
    }

    /// Envelope used when the configuration is unusable: slow, gentle, unarmed.
    pub fn conservative_default() -> Self {
        Self {
            max_speed:               10.0,
            max_turn_accel_flight:   1.0,
            max_turn_accel_ground:   0.5,
            max_brake_x:             1.0,
            max_brake_y:             1.0,
            max_brake_z:             1.0,
            drag_z:                  0.0,
            max_angular_accel:       0.5,
            ramp_up_secs:            0.5,
            min_projectile_speed:    0.0,
            min_projectile_lifetime: 0.0,
        }
    }

    // ── Context-aware accessors ───────────────────────────────────────────

    /// Turn acceleration for the given context (ground vs. flight).
    #[inline]
    pub fn turn_accel(&self, grounded: bool) -> f32 {
        if grounded {
            self.max_turn_accel_ground
        } else {
            self.max_turn_accel_flight
        }
    }

    /// Direction-weighted braking deceleration for travel along `local_dir`.
    #[inline]
    pub fn braking_deceleration(&self, local_dir: Vec3) -> f32 {
        math::directional_deceleration(local_dir, self.max_brake_x, self.max_brake_y, self.max_brake_z)
    }

    /// Quadratic drag felt along `local_dir` — drag acts only on the forward
    /// axis, so it scales with the squared Z component of the direction.
    #[inline]
    pub fn drag_along(&self, local_dir: Vec3) -> f32 {
        let d = local_dir.normalize_or_zero();
        self.drag_z * d.z * d.z
    }

    // ── Formula wrappers (per-behavior hot path) ──────────────────────────

    /// See [`math::max_speed_from_braking_distance`]; direction-weighted.
    pub fn max_speed_from_braking_distance(
        &self,
        target_speed: f32,
        distance:     f32,
        local_dir:    Vec3,
    ) -> f32 {
        math::max_speed_from_braking_distance(
            target_speed,
            distance,
            self.braking_deceleration(local_dir),
            self.drag_along(local_dir),
        )
    }

    /// See [`math::braking_distance`]; direction-weighted.
    pub fn braking_distance(&self, from_speed: f32, to_speed: f32, local_dir: Vec3) -> f32 {
        math::braking_distance(
            from_speed,
            to_speed,
            self.braking_deceleration(local_dir),
            self.drag_along(local_dir),
        )
    }
}

impl Default for ShipPerformance {
    fn default() -> Self {
        Self::estimate(&ShipConfig::default())
    }
}
