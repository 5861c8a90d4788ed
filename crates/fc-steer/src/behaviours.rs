//! The stateless built-in steering primitives.
//!
//! Every function here is a pure transform from a [`SteeringRequest`] plus
//! the agent's current kinematics/performance to a [`BehaviourOutput`].
//! Scratch state is per-call locals only, so any number of agents can run
//! these concurrently.
//!
//! Two request variants are *not* handled here because they are stateful:
//! `ObstacleAvoidance` (sweep results, in `fc-avoid`) and `FollowPath`
//! (path cursor, in `fc-path`).  The agent dispatches those separately;
//! passing them to [`compute_primitive`] yields the no-opinion output.

use fc_core::math::{
    self, EPSILON, EPSILON_SPEED, max_speed_on_constant_radius_curve, normalize_or_zero,
    orthonormal_basis, turn_radius_from_chord,
};
use fc_core::{Quat, ShipKinematics, ShipPerformance, Vec3};

use crate::input::SteeringRequest;
use crate::output::BehaviourOutput;

/// Exit angle relative to a violated unblock boundary.
const UNBLOCK_EXIT_ANGLE_RAD: f32 = 30.0 * std::f32::consts::PI / 180.0;

/// Per-call view of the agent the behavior is steering.
#[derive(Copy, Clone)]
pub struct SteeringContext<'a> {
    pub kin: &'a ShipKinematics,
    pub perf: &'a ShipPerformance,
    /// Selects ground vs. flight turn acceleration.
    pub grounded: bool,
}

impl<'a> SteeringContext<'a> {
    pub fn new(kin: &'a ShipKinematics, perf: &'a ShipPerformance, grounded: bool) -> Self {
        Self { kin, perf, grounded }
    }
}

/// Compute the built-in output for a stateless request.
///
/// `Custom*` variants are computed as their built-in fallback — override
/// resolution happens in the agent before this is called.
pub fn compute_primitive(request: &SteeringRequest, ctx: &SteeringContext<'_>) -> BehaviourOutput {
    let fallback;
    let request = if request.is_custom() {
        fallback = request.builtin_fallback();
        &fallback
    } else {
        request
    };

    match *request {
        SteeringRequest::Idle => idle(ctx),
        SteeringRequest::Seek { target_pos } => seek(ctx, target_pos),
        SteeringRequest::Flee { threat_pos } => flee(ctx, threat_pos),
        SteeringRequest::Pursuit { target_pos, target_vel } => {
            seek(ctx, predict(ctx, target_pos, target_vel))
        }
        SteeringRequest::Evasion { threat_pos, threat_vel } => {
            flee(ctx, predict(ctx, threat_pos, threat_vel))
        }
        SteeringRequest::SeekArrival { target_pos, target_radius } => {
            arrival(ctx, target_pos, Vec3::ZERO, target_radius)
        }
        SteeringRequest::SeekMovingArrival { target_pos, target_vel, target_radius } => {
            arrival(ctx, target_pos, target_vel, target_radius)
        }
        SteeringRequest::PursuitArrival { target_pos, target_vel, target_radius } => {
            arrival(ctx, predict(ctx, target_pos, target_vel), target_vel, target_radius)
        }
        SteeringRequest::UnblockCylinder { base_pos, axis, radius, length } => {
            unblock_cylinder(ctx, base_pos, axis, radius, length)
        }
        SteeringRequest::UnblockCone { apex_pos, axis, half_angle_rad, range } => {
            unblock_cone(ctx, apex_pos, axis, half_angle_rad, range)
        }
        SteeringRequest::Dock { target_pos, target_vel, target_forward, target_up, radius } => {
            dock(ctx, target_pos, target_vel, target_forward, target_up, radius)
        }

        // Stateful variants — dispatched by the agent, not here.
        SteeringRequest::ObstacleAvoidance | SteeringRequest::FollowPath { .. } => {
            BehaviourOutput::NONE
        }

        // is_custom() rewrote these above.
        SteeringRequest::CustomIdle
        | SteeringRequest::CustomSeek { .. }
        | SteeringRequest::CustomFlee { .. }
        | SteeringRequest::CustomPursuit { .. }
        | SteeringRequest::CustomEvasion { .. }
        | SteeringRequest::CustomUnblock { .. }
        | SteeringRequest::CustomDock { .. } => BehaviourOutput::NONE,
    }
}

// ── Primitives ────────────────────────────────────────────────────────────────

/// Hold the current facing at zero velocity.
fn idle(ctx: &SteeringContext<'_>) -> BehaviourOutput {
    BehaviourOutput::move_along(ctx.kin.forward(), Vec3::ZERO)
}

/// Full speed straight at `target_pos`.
fn seek(ctx: &SteeringContext<'_>, target_pos: Vec3) -> BehaviourOutput {
    let heading = normalize_or_zero(target_pos - ctx.kin.position);
    BehaviourOutput::move_along(heading, heading * ctx.perf.max_speed).with_target(target_pos)
}

/// Full speed straight away from `threat_pos`.
fn flee(ctx: &SteeringContext<'_>, threat_pos: Vec3) -> BehaviourOutput {
    let heading = normalize_or_zero(ctx.kin.position - threat_pos);
    BehaviourOutput::move_along(heading, heading * ctx.perf.max_speed)
}

/// Target's predicted position after the approximate interception time
/// `distance / max(own_speed, 0.1)`.
fn predict(ctx: &SteeringContext<'_>, target_pos: Vec3, target_vel: Vec3) -> Vec3 {
    let distance = (target_pos - ctx.kin.position).length();
    let intercept_secs = distance / ctx.kin.speed().max(EPSILON_SPEED);
    target_pos + target_vel * intercept_secs
}

/// Seek with a braking-distance speed profile: decelerate so the agent
/// arrives at `target_pos` matching `target_vel`, clamped by the max speed
/// and by the turn-curvature cap between the current and required headings.
fn arrival(
    ctx:           &SteeringContext<'_>,
    target_pos:    Vec3,
    target_vel:    Vec3,
    target_radius: f32,
) -> BehaviourOutput {
    let to_target = target_pos - ctx.kin.position;
    let distance = (to_target.length() - target_radius).max(0.0);
    let heading = normalize_or_zero(to_target);
    if !heading.has_length() {
        // On top of the target: match its velocity and keep the current facing.
        return BehaviourOutput::move_along(ctx.kin.forward(), target_vel).with_target(target_pos);
    }

    // Braking cap along the (local) approach direction.
    let local_dir = ctx.kin.world_to_local(heading);
    let approach_speed = target_vel.dot(heading).max(0.0);
    let brake_cap = ctx.perf.max_speed_from_braking_distance(approach_speed, distance, local_dir);

    // Turn cap: the arc from the current travel direction onto the target
    // bearing must stay within the lateral acceleration budget.
    let travel_dir = if ctx.kin.speed() > EPSILON_SPEED {
        ctx.kin.velocity / ctx.kin.speed()
    } else {
        ctx.kin.forward()
    };
    let turn_angle = travel_dir.angle_between(heading);
    let turn_cap = if turn_angle > EPSILON {
        let radius = turn_radius_from_chord(distance.max(EPSILON), turn_angle);
        max_speed_on_constant_radius_curve(ctx.perf.turn_accel(ctx.grounded), radius)
    } else {
        f32::INFINITY
    };

    let speed = ctx.perf.max_speed.min(brake_cap).min(turn_cap);
    BehaviourOutput::move_along(heading, heading * speed).with_target(target_pos)
}

/// Steer out of a cylinder projected `length` metres along `axis` from
/// `base_pos`.  All-zero output (no opinion, not "stop") outside the volume.
fn unblock_cylinder(
    ctx:      &SteeringContext<'_>,
    base_pos: Vec3,
    axis:     Vec3,
    radius:   f32,
    length:   f32,
) -> BehaviourOutput {
    let axis = normalize_or_zero(axis);
    if !axis.has_length() {
        return BehaviourOutput::NONE;
    }
    let rel = ctx.kin.position - base_pos;
    let axial = rel.dot(axis);
    if axial < 0.0 || axial > length {
        return BehaviourOutput::NONE;
    }
    let radial = rel - axis * axial;
    if radial.length() >= radius {
        return BehaviourOutput::NONE;
    }

    let radial_out = radial_escape_dir(radial, axis);
    // Escape along the wall (whichever axial sense we are already moving in)
    // angled 30° outward through the boundary.
    let axial_escape = if ctx.kin.velocity.dot(axis) < 0.0 { -axis } else { axis };
    let heading = (axial_escape * UNBLOCK_EXIT_ANGLE_RAD.cos()
        + radial_out * UNBLOCK_EXIT_ANGLE_RAD.sin())
    .normalize();
    BehaviourOutput::move_along(heading, heading * ctx.perf.max_speed)
}

/// Steer out of a cone of `half_angle_rad` about `axis` from `apex_pos`,
/// reaching `range` metres.  All-zero output outside the volume.
fn unblock_cone(
    ctx:            &SteeringContext<'_>,
    apex_pos:       Vec3,
    axis:           Vec3,
    half_angle_rad: f32,
    range:          f32,
) -> BehaviourOutput {
    let axis = normalize_or_zero(axis);
    if !axis.has_length() {
        return BehaviourOutput::NONE;
    }
    let rel = ctx.kin.position - apex_pos;
    let dist = rel.length();
    if dist < EPSILON || dist > range {
        return BehaviourOutput::NONE;
    }
    let off_axis_angle = (rel / dist).angle_between(axis);
    if off_axis_angle >= half_angle_rad {
        return BehaviourOutput::NONE;
    }

    // Exit through the cone surface, 30° steeper than the surface itself.
    let radial = rel - axis * rel.dot(axis);
    let radial_out = radial_escape_dir(radial, axis);
    let exit_angle = (half_angle_rad + UNBLOCK_EXIT_ANGLE_RAD).min(std::f32::consts::FRAC_PI_2);
    let heading = (axis * exit_angle.cos() + radial_out * exit_angle.sin()).normalize();
    BehaviourOutput::move_along(heading, heading * ctx.perf.max_speed)
}

/// Outward radial direction, with a deterministic fallback when the agent
/// sits exactly on the axis.
fn radial_escape_dir(radial: Vec3, axis: Vec3) -> Vec3 {
    let out = normalize_or_zero(radial);
    if out.has_length() {
        out
    } else {
        orthonormal_basis(axis).0
    }
}

/// Two-phase docking: braked approach outside `radius`, fine alignment
/// inside it.
fn dock(
    ctx:            &SteeringContext<'_>,
    target_pos:     Vec3,
    target_vel:     Vec3,
    target_forward: Vec3,
    target_up:      Vec3,
    radius:         f32,
) -> BehaviourOutput {
    let to_target = target_pos - ctx.kin.position;
    let dist = to_target.length();
    let radius = radius.max(EPSILON);
    let dir = normalize_or_zero(to_target);

    if dist > radius {
        // ── Approach: brake toward the pose, offset by the target's drift ──
        let local_dir = ctx.kin.world_to_local(dir);
        let approach_speed = target_vel.dot(dir).max(0.0);
        let speed = ctx
            .perf
            .max_speed_from_braking_distance(approach_speed, dist - radius, local_dir)
            .min(ctx.perf.max_speed);
        // Carry the target's lateral velocity so the approach line holds.
        let lateral = target_vel - dir * target_vel.dot(dir);
        return BehaviourOutput::move_along(dir, dir * speed + lateral).with_target(target_pos);
    }

    // ── Fine docking inside the radius ────────────────────────────────────
    let ratio = (dist / radius).clamp(0.0, 1.0);

    // Speed scales quadratically with remaining distance.
    let speed = (ctx.perf.max_speed * ratio * ratio)
        .min(ctx.perf.max_speed_from_braking_distance(0.0, dist, ctx.kin.world_to_local(dir)));

    // Direction correction: cancel the off-course component of our relative
    // velocity so the closing line straightens out.
    let rel_vel = ctx.kin.velocity - target_vel;
    let off_course = rel_vel - dir * rel_vel.dot(dir);
    let travel = if dir.has_length() {
        normalize_or_zero(dir * speed.max(EPSILON_SPEED) - off_course)
    } else {
        Vec3::ZERO
    };

    // Heading/up slerp from "face where you're going" (at the rim) to the
    // docking pose (at contact).
    let pose_rot = math::look_rotation(target_forward, target_up);
    let travel_rot = if dir.has_length() {
        math::look_rotation(dir, ctx.kin.up())
    } else {
        ctx.kin.rotation
    };
    let blended: Quat = pose_rot.slerp(travel_rot, ratio);
    let heading = blended * Vec3::Z;
    let up = blended * Vec3::Y;

    BehaviourOutput::move_along(normalize_or_zero(heading), travel * speed + target_vel)
        .with_up(normalize_or_zero(up))
        .with_target(target_pos)
}

// ── Small extension trait ─────────────────────────────────────────────────────

/// Convenience: `v.has_length()` ⇔ `v` is not the zero sentinel.
trait HasLength {
    fn has_length(&self) -> bool;
}

impl HasLength for Vec3 {
    #[inline]
    fn has_length(&self) -> bool {
        self.length_squared() > EPSILON * EPSILON
    }
}
