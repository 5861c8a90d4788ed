//! Steering requests — what an FSM state asks of the steering layer.

use std::sync::Arc;

use fc_core::Vec3;
use fc_path::PathData;

/// The behavior menu.  Each variant carries its behavior-specific
/// parameters; shared agent state (kinematics, performance envelope, path
/// progress) is supplied at compute time, not stored here.
///
/// The `Custom*` variants consult the agent's
/// [`BehaviourOverrides`][crate::BehaviourOverrides] first and fall back to
/// the corresponding built-in when no override is registered.
#[derive(Clone, Debug)]
pub enum SteeringRequest {
    /// Hold the current heading at zero velocity.
    Idle,
    /// Head straight for a point at full speed.
    Seek { target_pos: Vec3 },
    /// Head straight away from a point at full speed.
    Flee { threat_pos: Vec3 },
    /// Seek the target's predicted future position.
    Pursuit { target_pos: Vec3, target_vel: Vec3 },
    /// Flee the threat's predicted future position.
    Evasion { threat_pos: Vec3, threat_vel: Vec3 },
    /// Seek with braking so the agent stops at the target.
    SeekArrival { target_pos: Vec3, target_radius: f32 },
    /// Seek with braking to match a moving target's velocity on arrival.
    SeekMovingArrival { target_pos: Vec3, target_vel: Vec3, target_radius: f32 },
    /// Pursuit with braking to match the target's velocity at the intercept.
    PursuitArrival { target_pos: Vec3, target_vel: Vec3, target_radius: f32 },
    /// Exit a forward-projected cylinder volume; no opinion outside it.
    UnblockCylinder { base_pos: Vec3, axis: Vec3, radius: f32, length: f32 },
    /// Exit a forward-projected cone volume; no opinion outside it.
    UnblockCone { apex_pos: Vec3, axis: Vec3, half_angle_rad: f32, range: f32 },
    /// Sweep-test look-ahead; computed by `fc-avoid`, dispatched by the agent.
    ObstacleAvoidance,
    /// Follow a shared path; progress lives in the agent, dispatched to
    /// `fc-path`.
    FollowPath { path: Arc<PathData> },
    /// Approach and align with a docking pose.
    Dock {
        target_pos: Vec3,
        target_vel: Vec3,
        target_forward: Vec3,
        target_up: Vec3,
        radius: f32,
    },

    // ── Override slots ────────────────────────────────────────────────────
    CustomIdle,
    CustomSeek { target_pos: Vec3 },
    CustomFlee { threat_pos: Vec3 },
    CustomPursuit { target_pos: Vec3, target_vel: Vec3 },
    CustomEvasion { threat_pos: Vec3, threat_vel: Vec3 },
    CustomUnblock { apex_pos: Vec3, axis: Vec3, half_angle_rad: f32, range: f32 },
    CustomDock {
        target_pos: Vec3,
        target_vel: Vec3,
        target_forward: Vec3,
        target_up: Vec3,
        radius: f32,
    },
}

impl SteeringRequest {
    /// The built-in request a `Custom*` variant falls back to; non-custom
    /// variants return a clone of themselves.
    pub fn builtin_fallback(&self) -> SteeringRequest {
        match self.clone() {
            SteeringRequest::CustomIdle => SteeringRequest::Idle,
            SteeringRequest::CustomSeek { target_pos } => SteeringRequest::Seek { target_pos },
            SteeringRequest::CustomFlee { threat_pos } => SteeringRequest::Flee { threat_pos },
            SteeringRequest::CustomPursuit { target_pos, target_vel } => {
                SteeringRequest::Pursuit { target_pos, target_vel }
            }
            SteeringRequest::CustomEvasion { threat_pos, threat_vel } => {
                SteeringRequest::Evasion { threat_pos, threat_vel }
            }
            SteeringRequest::CustomUnblock { apex_pos, axis, half_angle_rad, range } => {
                SteeringRequest::UnblockCone { apex_pos, axis, half_angle_rad, range }
            }
            SteeringRequest::CustomDock { target_pos, target_vel, target_forward, target_up, radius } => {
                SteeringRequest::Dock { target_pos, target_vel, target_forward, target_up, radius }
            }
            other => other,
        }
    }

    /// `true` for the `Custom*` override slots.
    pub fn is_custom(&self) -> bool {
        matches!(
            self,
            SteeringRequest::CustomIdle
                | SteeringRequest::CustomSeek { .. }
                | SteeringRequest::CustomFlee { .. }
                | SteeringRequest::CustomPursuit { .. }
                | SteeringRequest::CustomEvasion { .. }
                | SteeringRequest::CustomUnblock { .. }
                | SteeringRequest::CustomDock { .. }
        )
    }
}

/// One weighted steering request, as emitted by an FSM state.
///
/// Inputs are rebuilt every tick; the `Vec<BehaviourInput>` a state returns
/// is an explicit priority order (index 0 = highest).
#[derive(Clone, Debug)]
pub struct BehaviourInput {
    /// Relative weight.  Must be ≥ 0; a zero weight skips the behavior.
    /// Under `PrioritisedDithering` this is the per-tick selection
    /// probability; under `WeightedAverage` the blend weight.
    pub weighting: f32,
    /// Request that the combined heading be degraded by the agent's
    /// targeting accuracy before actuation.
    pub use_targeting_accuracy: bool,
    pub request: SteeringRequest,
}

impl BehaviourInput {
    pub fn new(weighting: f32, request: SteeringRequest) -> Self {
        Self {
            weighting: weighting.max(0.0),
            use_targeting_accuracy: false,
            request,
        }
    }

    pub fn with_targeting_accuracy(mut self) -> Self {
        self.use_targeting_accuracy = true;
        self
    }
}
