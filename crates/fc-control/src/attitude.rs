//! Decomposing a desired heading/up into local-frame axis errors.
//!
//! Axis conventions (right-handed, local `+Z` forward / `+Y` up / `+X`
//! right):
//!
//! - positive **pitch** rotates about `+X`: nose toward `+Y` (up)
//! - positive **yaw** rotates about `+Y`: nose toward `+X` (right)
//! - positive **roll** rotates about `+Z`: `+X` toward `+Y` (left bank)
//!
//! The errors returned here are the rotations (radians) that would null the
//! attitude error on each axis; the PID layer turns them into `[-1, 1]`
//! control inputs.

use fc_core::math::EPSILON;
use fc_core::{MovementMode, ShipKinematics, Vec3};

/// Above this off-axis angle, `Full3d` stops yawing at the target and rolls
/// it above the nose instead (then pitches onto it).
const PITCH_GATE_RAD: f32 = 0.785; // 45°

/// Yaw assist retained while in the roll-and-pitch regime.
const YAW_BIAS: f32 = 0.25;
/// Scale on the roll command in the roll-and-pitch regime.
const ROLL_BIAS: f32 = 1.0;

/// `PlanarBanked`: bank angle commanded per radian of yaw error, and its cap.
const BANK_GAIN: f32 = 0.8;
const MAX_BANK_RAD: f32 = 1.047; // 60°

/// Local-frame attitude errors, radians.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AttitudeErrors {
    pub pitch_rad: f32,
    pub yaw_rad: f32,
    pub roll_rad: f32,
}

/// Decompose `desired_heading`/`desired_up` into per-axis errors under the
/// configured movement mode.
///
/// A zero `desired_heading` means "hold attitude": all errors zero except
/// planar modes still leveling the keel.
pub fn attitude_errors(
    kin:             &ShipKinematics,
    desired_heading: Vec3,
    desired_up:      Option<Vec3>,
    mode:            MovementMode,
) -> AttitudeErrors {
    let h = kin.world_to_local(desired_heading).normalize_or_zero();
    let up_world = desired_up.unwrap_or(Vec3::Y);
    let u = kin.world_to_local(up_world).normalize_or_zero();

    match mode {
        MovementMode::Full3d => full_3d(h, u),
        MovementMode::Planar => planar(h, u, 0.0),
        MovementMode::PlanarBanked => {
            let yaw = if h.length_squared() > EPSILON { yaw_to(h) } else { 0.0 };
            let bank = (yaw * BANK_GAIN).clamp(-MAX_BANK_RAD, MAX_BANK_RAD);
            planar(h, u, -bank) // bank right (negative roll) into a right turn
        }
    }
}

// ── Regimes ───────────────────────────────────────────────────────────────────

fn full_3d(h: Vec3, u: Vec3) -> AttitudeErrors {
    if h.length_squared() < EPSILON {
        // Hold heading; still honor an explicit up request.
        return AttitudeErrors {
            pitch_rad: 0.0,
            yaw_rad: 0.0,
            roll_rad: roll_to_up(u),
        };
    }

    let off_axis = h.angle_between(Vec3::Z);
    if off_axis < PITCH_GATE_RAD {
        // Direct regime: pitch and yaw straight onto the bearing.
        AttitudeErrors {
            pitch_rad: pitch_to(h),
            yaw_rad: yaw_to(h),
            roll_rad: roll_to_up(u),
        }
    } else {
        // Roll-and-pitch regime: roll the target above the nose, pitch onto
        // it, with a damped yaw assist.
        AttitudeErrors {
            pitch_rad: off_axis,
            yaw_rad: yaw_to(h) * YAW_BIAS,
            roll_rad: (-h.x).atan2(h.y) * ROLL_BIAS,
        }
    }
}

/// Planar flight: yaw onto the horizontal bearing, keep the keel level
/// (plus `extra_roll` for banking variants).
fn planar(h: Vec3, u: Vec3, extra_roll: f32) -> AttitudeErrors {
    // Steer only by the horizontal component of the request.
    let h_flat = Vec3::new(h.x, 0.0, h.z).normalize_or_zero();
    let yaw = if h_flat.length_squared() > EPSILON { yaw_to(h_flat) } else { 0.0 };

    AttitudeErrors {
        // Level the nose regardless of where the heading points.
        pitch_rad: level_pitch(u),
        yaw_rad: yaw,
        roll_rad: roll_to_up(u) + extra_roll,
    }
}

// ── Axis extractors ───────────────────────────────────────────────────────────

/// Elevation of a local direction: positive when above the nose.
#[inline]
fn pitch_to(h: Vec3) -> f32 {
    h.y.atan2((h.x * h.x + h.z * h.z).sqrt())
}

/// Azimuth of a local direction: positive when right of the nose.
#[inline]
fn yaw_to(h: Vec3) -> f32 {
    h.x.atan2(h.z)
}

/// Roll needed to bring local `+Y` onto the desired up.
#[inline]
fn roll_to_up(u: Vec3) -> f32 {
    if u.length_squared() < EPSILON {
        0.0
    } else {
        (-u.x).atan2(u.y)
    }
}

/// Pitch needed to level the nose against the desired up (planar modes).
#[inline]
fn level_pitch(u: Vec3) -> f32 {
    if u.length_squared() < EPSILON {
        0.0
    } else {
        u.z.atan2(u.y)
    }
}
