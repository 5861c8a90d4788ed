//! The six-axis flight controller.

use fc_core::{MovementMode, ShipConfig, ShipKinematics, ShipPerformance, Vec3};

use crate::attitude::attitude_errors;
use crate::pid::Pid;

/// Normalized control-surface inputs, the sole product of the AI core.
///
/// The host's actuator layer applies these to the vehicle; the AI never
/// integrates physics itself.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlInputs {
    /// Rotation inputs, each in `[-1, 1]`.
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    /// Translation inputs, each in `[-1, 1]` (local X/Y/Z thrust).
    pub horizontal: f32,
    pub vertical: f32,
    pub longitudinal: f32,
    pub primary_fire: bool,
    pub secondary_fire: bool,
}

impl ControlInputs {
    /// All-zero inputs: hands off the stick.
    pub const NEUTRAL: ControlInputs = ControlInputs {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
        horizontal: 0.0,
        vertical: 0.0,
        longitudinal: 0.0,
        primary_fire: false,
        secondary_fire: false,
    };
}

/// Six independent PID loops: three attitude axes, three translation axes.
///
/// Gains are derived once from the ship's performance envelope (see
/// [`Pid::tuned`]); rebuild the controller if the envelope changes.
pub struct FlightController {
    mode: MovementMode,
    pitch: Pid,
    yaw: Pid,
    roll: Pid,
    horizontal: Pid,
    vertical: Pid,
    longitudinal: Pid,
}

impl FlightController {
    /// Build a controller tuned to `config`/`perf`.
    pub fn new(config: &ShipConfig, perf: &ShipPerformance) -> Self {
        let ramp = perf.ramp_up_secs;
        let ang = perf.max_angular_accel;

        let inv_mass = 1.0 / config.mass_kg.max(1.0);
        let accel_x = config.thrusters.lateral_n * inv_mass;
        let accel_y = config.thrusters.vertical_n * inv_mass;
        let accel_z = config.thrusters.forward_n * inv_mass;

        Self {
            mode: config.movement_mode,
            pitch: Pid::tuned(ang, ramp),
            yaw: Pid::tuned(ang, ramp),
            roll: Pid::tuned(ang, ramp),
            horizontal: Pid::velocity_tuned(accel_x, ramp),
            vertical: Pid::velocity_tuned(accel_y, ramp),
            longitudinal: Pid::velocity_tuned(accel_z, ramp),
        }
    }

    /// One actuation step: decompose the desired heading/up into attitude
    /// errors, drive all six PIDs, return clamped inputs.
    ///
    /// Fire flags are left `false`; the weapon decision sits above this
    /// layer.
    pub fn steer(
        &mut self,
        kin:              &ShipKinematics,
        desired_heading:  Vec3,
        desired_up:       Option<Vec3>,
        desired_velocity: Vec3,
        dt:               f32,
    ) -> ControlInputs {
        let errors = attitude_errors(kin, desired_heading, desired_up, self.mode);

        let vel_error = kin.world_to_local(desired_velocity) - kin.local_velocity();

        ControlInputs {
            pitch: self.pitch.update(errors.pitch_rad, dt),
            yaw: self.yaw.update(errors.yaw_rad, dt),
            roll: self.roll.update(errors.roll_rad, dt),
            horizontal: self.horizontal.update(vel_error.x, dt),
            vertical: self.vertical.update(vel_error.y, dt),
            longitudinal: self.longitudinal.update(vel_error.z, dt),
            primary_fire: false,
            secondary_fire: false,
        }
    }

    /// Clear every controller's accumulated history.
    ///
    /// Must be called whenever position or velocity is externally forced
    /// (teleport, respawn, velocity reset) — stale derivative/integral
    /// history would otherwise spike the surfaces.
    pub fn reset(&mut self) {
        self.pitch.reset();
        self.yaw.reset();
        self.roll.reset();
        self.horizontal.reset();
        self.vertical.reset();
        self.longitudinal.reset();
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }
}
