//! Merging weighted behavior outputs into one steering decision.
//!
//! Exactly one policy is active per tick, chosen by the agent's current FSM
//! state.  Inputs and outputs arrive as parallel slices in priority order
//! (index 0 = highest priority).

use fc_core::math::{is_unit_or_zero, normalize_or_zero, EPSILON};
use fc_core::{AgentRng, ShipKinematics, Vec3};

use crate::input::BehaviourInput;
use crate::output::BehaviourOutput;

/// How multiple weighted behavior outputs merge into one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombinerPolicy {
    /// First behavior with nonzero weight and a heading opinion wins.
    #[default]
    PriorityOnly,
    /// Iterate in priority order; each behavior is selected with probability
    /// equal to its weighting (one draw per behavior per tick).  First
    /// success wins.
    PrioritisedDithering,
    /// Weighted blend of every contributing behavior.  Headings and ups are
    /// averaged as unit vectors; velocity and target are blended as deltas
    /// from the agent's current velocity/position so absolute magnitudes
    /// survive the averaging.
    WeightedAverage,
}

/// The merged steering decision for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CombinedOutput {
    /// Unit heading, or `Vec3::ZERO` when no behavior had an opinion.
    pub heading: Vec3,
    pub up: Option<Vec3>,
    pub velocity: Vec3,
    pub target: Option<Vec3>,
    /// Set when any contributing behavior asked for accuracy degradation.
    pub use_targeting_accuracy: bool,
}

impl CombinedOutput {
    /// No behavior contributed: the agent should hold attitude and coast.
    pub const NONE: CombinedOutput = CombinedOutput {
        heading: Vec3::ZERO,
        up: None,
        velocity: Vec3::ZERO,
        target: None,
        use_targeting_accuracy: false,
    };

    #[inline]
    pub fn has_opinion(&self) -> bool {
        self.heading != Vec3::ZERO
    }
}

/// Merge `outputs` (parallel to `inputs`, priority order) under `policy`.
///
/// Behaviors with zero weighting or a zero heading never contribute, under
/// any policy — an all-zero output means "no opinion", not "stop".
pub fn combine(
    inputs:  &[BehaviourInput],
    outputs: &[BehaviourOutput],
    policy:  CombinerPolicy,
    kin:     &ShipKinematics,
    rng:     &mut AgentRng,
) -> CombinedOutput {
    debug_assert_eq!(inputs.len(), outputs.len());

    match policy {
        CombinerPolicy::PriorityOnly => priority_only(inputs, outputs),
        CombinerPolicy::PrioritisedDithering => dithered(inputs, outputs, rng),
        CombinerPolicy::WeightedAverage => weighted_average(inputs, outputs, kin),
    }
}

/// First eligible behavior wins outright.
fn priority_only(inputs: &[BehaviourInput], outputs: &[BehaviourOutput]) -> CombinedOutput {
    for (input, output) in inputs.iter().zip(outputs) {
        if input.weighting > 0.0 && output.has_opinion() {
            return select(input, output);
        }
    }
    CombinedOutput::NONE
}

/// Each eligible behavior is selected with probability = weighting; first
/// success wins.  A weighting ≥ 1 always succeeds, so the policy degrades to
/// `PriorityOnly` when all weights saturate.
fn dithered(
    inputs:  &[BehaviourInput],
    outputs: &[BehaviourOutput],
    rng:     &mut AgentRng,
) -> CombinedOutput {
    for (input, output) in inputs.iter().zip(outputs) {
        if input.weighting <= 0.0 || !output.has_opinion() {
            continue;
        }
        if rng.gen_bool(input.weighting.min(1.0) as f64) {
            return select(input, output);
        }
    }
    CombinedOutput::NONE
}

fn select(input: &BehaviourInput, output: &BehaviourOutput) -> CombinedOutput {
    CombinedOutput {
        heading: output.heading,
        up: output.up,
        velocity: output.velocity,
        target: output.target,
        use_targeting_accuracy: input.use_targeting_accuracy || output.use_targeting_accuracy,
    }
}

/// Weight-blend all contributing behaviors.
fn weighted_average(
    inputs:  &[BehaviourInput],
    outputs: &[BehaviourOutput],
    kin:     &ShipKinematics,
) -> CombinedOutput {
    let mut total_w = 0.0f32;
    let mut heading_acc = Vec3::ZERO;
    let mut vel_delta_acc = Vec3::ZERO;

    let mut up_w = 0.0f32;
    let mut up_acc = Vec3::ZERO;

    let mut target_w = 0.0f32;
    let mut target_delta_acc = Vec3::ZERO;

    let mut use_accuracy = false;

    for (input, output) in inputs.iter().zip(outputs) {
        let w = input.weighting;
        if w <= 0.0 || !output.has_opinion() {
            continue;
        }
        // Headings must arrive unit-length for the average to be meaningful.
        debug_assert!(is_unit_or_zero(output.heading));

        total_w += w;
        heading_acc += output.heading * w;
        vel_delta_acc += (output.velocity - kin.velocity) * w;

        if let Some(up) = output.up {
            debug_assert!(is_unit_or_zero(up));
            up_w += w;
            up_acc += up * w;
        }
        if let Some(target) = output.target {
            target_w += w;
            target_delta_acc += (target - kin.position) * w;
        }
        use_accuracy |= input.use_targeting_accuracy || output.use_targeting_accuracy;
    }

    if total_w <= EPSILON {
        return CombinedOutput::NONE;
    }

    // Opposed headings can cancel to (near) zero; renormalization keeps the
    // magnitude in {0, 1} and never overshoots.
    let heading = normalize_or_zero(heading_acc / total_w);
    let up = if up_w > EPSILON {
        let u = normalize_or_zero(up_acc / up_w);
        (u != Vec3::ZERO).then_some(u)
    } else {
        None
    };
    let target = (target_w > EPSILON).then(|| kin.position + target_delta_acc / target_w);

    CombinedOutput {
        heading,
        up,
        velocity: kin.velocity + vel_delta_acc / total_w,
        target,
        use_targeting_accuracy: use_accuracy,
    }
}
