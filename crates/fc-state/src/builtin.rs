//! The five built-in states.
//!
//! Each action returns its behavior list in explicit priority order —
//! obstacle avoidance first wherever it applies, so under `PriorityOnly` a
//! blocked ship always resolves the obstruction before chasing its goal.
//! Avoidance outputs the all-zero "no opinion" when nothing is in the way,
//! which is what lets the lower-priority entries through.

use fc_core::math::EPSILON_SPEED;
use fc_steer::{BehaviourInput, SteeringRequest};

use crate::params::StateParams;
use crate::state::{StateAction, StateView};

/// Dogfight: flee when the target closes head-on within this window, seconds.
const FLEE_WINDOW_SECS: f32 = 3.0;

/// Dogfight: interception times inside this window favor `PursuitArrival`
/// (lead the target); outside it, `SeekMovingArrival` (chase the hull).
const PURSUIT_WINDOW_SECS: (f32, f32) = (3.0, 10.0);

/// MoveTo: at most this many evade cones per tick.
const MAX_EVADE_SHIPS: usize = 5;

// ── Idle ──────────────────────────────────────────────────────────────────────

/// Hold attitude, zero velocity.  Routed through the `CustomIdle` override
/// slot so hosts can replace the "parked" pose without a custom state.
pub fn idle_action() -> StateAction {
    Box::new(|_params, _view| vec![BehaviourInput::new(1.0, SteeringRequest::CustomIdle)])
}

// ── MoveTo ────────────────────────────────────────────────────────────────────

/// Travel to a path, location, or position; completes within ship radius
/// (path targets complete via the path's own terminal signal).
pub fn move_to_action() -> StateAction {
    Box::new(|params: &mut StateParams, view: &StateView<'_>| {
        let mut inputs = Vec::with_capacity(3 + MAX_EVADE_SHIPS);

        inputs.push(BehaviourInput::new(1.0, SteeringRequest::ObstacleAvoidance));
        push_evade_cones(&mut inputs, params);

        if let Some(path) = &params.target_path {
            inputs.push(BehaviourInput::new(
                1.0,
                SteeringRequest::FollowPath { path: path.clone() },
            ));
        } else if let Some(location) = &params.target_location {
            let radius = location.radius_m.max(view.ship_radius);
            // Arrival completion: inside the location's radius.
            if (location.position - view.kin.position).length() <= radius {
                params.completed = true;
            }
            inputs.push(BehaviourInput::new(
                1.0,
                SteeringRequest::SeekArrival { target_pos: location.position, target_radius: radius },
            ));
        } else if let Some(target_pos) = params.target_position {
            if (target_pos - view.kin.position).length() <= view.ship_radius {
                params.completed = true;
            }
            inputs.push(BehaviourInput::new(
                1.0,
                SteeringRequest::SeekArrival { target_pos, target_radius: 0.0 },
            ));
        } else {
            // Nothing to move to — park.
            inputs.push(BehaviourInput::new(1.0, SteeringRequest::CustomIdle));
        }

        inputs
    })
}

/// Up to five `UnblockCone` evasions, splitting one unit of weight.
fn push_evade_cones(inputs: &mut Vec<BehaviourInput>, params: &StateParams) {
    let count = params.ships_to_evade.len().min(MAX_EVADE_SHIPS);
    if count == 0 {
        return;
    }
    let weight = 1.0 / count as f32;
    for ship in params.ships_to_evade.iter().take(count) {
        inputs.push(BehaviourInput::new(
            weight,
            SteeringRequest::UnblockCone {
                apex_pos: ship.position(),
                axis: ship.forward(),
                half_angle_rad: ship.fire_cone_half_angle_rad,
                range: ship.fire_cone_range_m,
            },
        ));
    }
}

// ── Dogfight ──────────────────────────────────────────────────────────────────

/// Fight the target ship; completes when it is destroyed (or gone).
pub fn dogfight_action() -> StateAction {
    Box::new(|params: &mut StateParams, view: &StateView<'_>| {
        let mut inputs = Vec::with_capacity(4);
        inputs.push(BehaviourInput::new(1.0, SteeringRequest::ObstacleAvoidance));

        let Some(ship) = params.target_ship else {
            // Target despawned: nothing left to fight.
            params.completed = true;
            inputs.push(BehaviourInput::new(1.0, SteeringRequest::CustomIdle));
            return inputs;
        };
        if ship.destroyed {
            params.completed = true;
            inputs.push(BehaviourInput::new(1.0, SteeringRequest::CustomIdle));
            return inputs;
        }

        // Stay out of the target's firing cone.
        inputs.push(BehaviourInput::new(
            1.0,
            SteeringRequest::UnblockCone {
                apex_pos: ship.position(),
                axis: ship.forward(),
                half_angle_rad: ship.fire_cone_half_angle_rad,
                range: ship.fire_cone_range_m,
            },
        ));

        // Break away from a head-on attacker about to reach us.
        let to_us = view.kin.position - ship.position();
        let distance = to_us.length();
        let closing_speed = (ship.velocity() - view.kin.velocity).dot(to_us.normalize_or_zero());
        if distance > 0.0
            && ship.forward().dot(to_us.normalize_or_zero()) > 0.0
            && closing_speed > EPSILON_SPEED
            && distance / closing_speed < FLEE_WINDOW_SECS
        {
            inputs.push(BehaviourInput::new(
                1.0,
                SteeringRequest::Flee { threat_pos: ship.position() },
            ));
        }

        // Attack leg: lead the target when the intercept window suits it.
        let intercept_secs = distance / view.kin.speed().max(EPSILON_SPEED);
        let (lo, hi) = PURSUIT_WINDOW_SECS;
        let attack = if intercept_secs > lo && intercept_secs < hi {
            SteeringRequest::PursuitArrival {
                target_pos: ship.position(),
                target_vel: ship.velocity(),
                target_radius: ship.radius_m,
            }
        } else {
            SteeringRequest::SeekMovingArrival {
                target_pos: ship.position(),
                target_vel: ship.velocity(),
                target_radius: ship.radius_m,
            }
        };
        inputs.push(BehaviourInput::new(1.0, attack).with_targeting_accuracy());

        inputs
    })
}

// ── Docking ───────────────────────────────────────────────────────────────────

/// Approach and align with a docking pose; completes within the configured
/// distance *and* angular tolerance.  Unset tolerances are floored at half
/// the ship radius and ~5° so a default-constructed agent can still finish.
pub fn docking_action() -> StateAction {
    Box::new(|params: &mut StateParams, view: &StateView<'_>| {
        let (Some(target_pos), Some(target_rot)) = (params.target_position, params.target_rotation)
        else {
            // No pose assigned: hold position rather than guess.
            return vec![BehaviourInput::new(1.0, SteeringRequest::CustomIdle)];
        };
        let target_vel = params.target_velocity.unwrap_or_default();
        let radius = params.target_radius.max(view.ship_radius);

        let distance = (target_pos - view.kin.position).length();
        let angular = view.kin.rotation.angle_between(target_rot);
        if distance <= params.target_distance.max(view.ship_radius * 0.5)
            && angular <= params.target_angular_distance_rad.max(0.087)
        {
            params.completed = true;
        }

        let mut inputs = Vec::with_capacity(2);
        // Sweeps near the dock are all structure; avoidance only helps on
        // the approach leg outside the docking radius.
        if distance > radius {
            inputs.push(BehaviourInput::new(1.0, SteeringRequest::ObstacleAvoidance));
        }
        inputs.push(BehaviourInput::new(
            1.0,
            SteeringRequest::Dock {
                target_pos,
                target_vel,
                target_forward: target_rot * fc_core::Vec3::Z,
                target_up: target_rot * fc_core::Vec3::Y,
                radius,
            },
        ));
        inputs
    })
}

// ── StrafingRun ───────────────────────────────────────────────────────────────

/// Two-stage attack pass: run in until inside the target radius (stage 0→1),
/// then break away; completes once back outside the radius.
pub fn strafing_run_action() -> StateAction {
    Box::new(|params: &mut StateParams, view: &StateView<'_>| {
        let mut inputs = Vec::with_capacity(3);
        inputs.push(BehaviourInput::new(1.0, SteeringRequest::ObstacleAvoidance));

        let Some(target_pos) = params.focus_position() else {
            inputs.push(BehaviourInput::new(1.0, SteeringRequest::CustomIdle));
            return inputs;
        };
        let radius = params.target_radius.max(view.ship_radius);
        let distance = (target_pos - view.kin.position).length();

        if params.stage == 0 {
            if distance < radius {
                params.stage = 1; // run-in finished, break away from here on
            } else {
                inputs.push(
                    BehaviourInput::new(1.0, SteeringRequest::Seek { target_pos })
                        .with_targeting_accuracy(),
                );
                return inputs;
            }
        }

        // Stage 1: egress.
        if distance > radius {
            params.completed = true;
        }
        inputs.push(BehaviourInput::new(1.0, SteeringRequest::Flee { threat_pos: target_pos }));
        inputs
    })
}
