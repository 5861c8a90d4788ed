//! Applying control inputs to kinematics.
//!
//! Real deployments hand [`ControlInputs`] to their physics engine; the
//! bundled [`PointMassIntegrator`] exists so demos and tests can close the
//! loop without one.  It is a deliberately crude point-mass model — no
//! collision response, no gyroscopic effects — and is not a physics engine.

use fc_core::{Quat, ShipConfig, ShipKinematics, ShipPerformance, Vec3};
use fc_control::ControlInputs;

/// Turns one agent's control inputs into motion for one tick.
pub trait Integrator: Send + Sync {
    fn step(
        &self,
        kin:      &mut ShipKinematics,
        controls: &ControlInputs,
        config:   &ShipConfig,
        perf:     &ShipPerformance,
        dt:       f32,
    );
}

/// Simple semi-implicit Euler point-mass model.
///
/// Angular velocity is lightly damped so attitude loops settle instead of
/// ringing forever against the PD controller.
pub struct PointMassIntegrator;

/// Per-second angular velocity damping factor.
const ANGULAR_DAMPING: f32 = 2.0;

impl Integrator for PointMassIntegrator {
    fn step(
        &self,
        kin:      &mut ShipKinematics,
        controls: &ControlInputs,
        config:   &ShipConfig,
        perf:     &ShipPerformance,
        dt:       f32,
    ) {
        if dt <= 0.0 {
            return;
        }
        let inv_mass = 1.0 / config.mass_kg.max(1.0);
        let t = &config.thrusters;

        // ── Linear ────────────────────────────────────────────────────────
        let long_n = if controls.longitudinal >= 0.0 { t.forward_n } else { t.reverse_n };
        let accel_local = Vec3::new(
            controls.horizontal * t.lateral_n * inv_mass,
            controls.vertical * t.vertical_n * inv_mass,
            controls.longitudinal * long_n * inv_mass,
        );
        kin.velocity += kin.local_to_world(accel_local) * dt;

        // Quadratic drag along the local forward axis only.
        if perf.drag_z > 0.0 {
            let mut v_local = kin.world_to_local(kin.velocity);
            v_local.z -= perf.drag_z * v_local.z * v_local.z.abs() * dt;
            kin.velocity = kin.local_to_world(v_local);
        }

        kin.position += kin.velocity * dt;

        // ── Angular ───────────────────────────────────────────────────────
        let mut ang_local = kin.world_to_local(kin.angular_velocity);
        ang_local += Vec3::new(controls.pitch, controls.yaw, controls.roll)
            * perf.max_angular_accel
            * dt;
        ang_local *= (1.0 - ANGULAR_DAMPING * dt).max(0.0);

        kin.rotation = (kin.rotation * Quat::from_scaled_axis(ang_local * dt)).normalize();
        kin.angular_velocity = kin.local_to_world(ang_local);
    }
}
