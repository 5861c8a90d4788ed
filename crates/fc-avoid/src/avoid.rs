//! The per-tick obstacle-avoidance search.
//!
//! Decision ladder, cheapest test first:
//!
//! 1. `SweepQuality::Off` — behavior disabled, no opinion.
//! 2. A straight sweep to the last known steering target is clear — no
//!    opinion (whatever behavior produced that target can proceed).
//! 3. Probe "forward" and "where we're actually drifting".  A hit blocks
//!    when it is static, or when the moving body fails the closest-approach
//!    predicate.
//! 4. Blocked: search outward at 10°, 30°, 50°, 70°, 90° across up to four
//!    lateral directions (two when grounded), each angle tier ordered by
//!    proximity to the last target direction.  First clear probe wins; its
//!    speed comes from the blocking distance and the turn-acceleration
//!    budget.
//! 5. Nothing clear at any angle: reverse out.

use fc_core::math::{
    max_speed_on_constant_radius_curve, normalize_or_zero, turn_radius_from_chord, EPSILON,
    EPSILON_SPEED,
};
use fc_core::{ShipKinematics, ShipPerformance, Vec3};
use fc_steer::BehaviourOutput;

use crate::predict::on_collision_course;
use crate::sweep::{cast, SweepHit, SweepQuality, SweepSource};

/// Deflection angles searched, in order.
const SEARCH_ANGLES_DEG: [f32; 5] = [10.0, 30.0, 50.0, 70.0, 90.0];

/// Tuning for [`avoid`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvoidanceConfig {
    pub quality: SweepQuality,
    /// Seconds of travel the probes look ahead.
    pub lookahead_secs: f32,
    /// Probe length floor so slow ships still look somewhere, metres.
    pub min_probe_m: f32,
    /// Fraction of max speed commanded when reversing out of a dead end.
    pub reverse_speed_frac: f32,
}

impl Default for AvoidanceConfig {
    fn default() -> Self {
        Self {
            quality:            SweepQuality::SphereCast,
            lookahead_secs:     3.0,
            min_probe_m:        50.0,
            reverse_speed_frac: 0.25,
        }
    }
}

/// Compute the avoidance output for this tick.
///
/// `last_target` is the steering target the rest of the behavior stack most
/// recently produced (used for the clear-line shortcut and to order the
/// search); pass `None` when no target is known.
pub fn avoid(
    kin:         &ShipKinematics,
    perf:        &ShipPerformance,
    grounded:    bool,
    ship_radius: f32,
    last_target: Option<Vec3>,
    source:      &dyn SweepSource,
    cfg:         &AvoidanceConfig,
) -> BehaviourOutput {
    if cfg.quality == SweepQuality::Off {
        return BehaviourOutput::NONE;
    }

    let probe_dist = (kin.speed() * cfg.lookahead_secs).max(cfg.min_probe_m);

    // ── 2. Clear line to the current steering target? ─────────────────────
    if let Some(target) = last_target {
        let to_target = target - kin.position;
        let dist = to_target.length();
        if dist > EPSILON {
            let dir = to_target / dist;
            if !is_blocking(kin, ship_radius, cfg, cast(source, cfg.quality, kin, ship_radius, dir, dist)) {
                return BehaviourOutput::NONE;
            }
        }
    }

    // ── 3. Is the ship's own motion blocked? ──────────────────────────────
    let forward = kin.forward();
    let drift = normalize_or_zero(kin.velocity);

    let mut nearest_block: Option<SweepHit> = None;
    for dir in [forward, drift] {
        if dir.length_squared() < EPSILON {
            continue;
        }
        if let Some(hit) = cast(source, cfg.quality, kin, ship_radius, dir, probe_dist) {
            if is_blocking(kin, ship_radius, cfg, Some(hit))
                && nearest_block.is_none_or(|b| hit.distance < b.distance)
            {
                nearest_block = Some(hit);
            }
        }
    }

    let Some(block) = nearest_block else {
        // Target line was obstructed but our own motion is clear — let the
        // steering stack carry on; it will curve away on its own.
        return BehaviourOutput::NONE;
    };

    // ── 4. Angle search ───────────────────────────────────────────────────
    let obstacle_dist = block.distance.max(ship_radius);
    let candidates = candidate_directions(kin, last_target, grounded);

    for angle_deg in SEARCH_ANGLES_DEG {
        let angle = angle_deg.to_radians();
        for &lateral in &candidates {
            let dir = (forward * angle.cos() + lateral * angle.sin()).normalize();
            if cast(source, cfg.quality, kin, ship_radius, dir, probe_dist)
                .filter(|hit| is_blocking(kin, ship_radius, cfg, Some(*hit)))
                .is_none()
            {
                let speed = turn_speed(perf, grounded, obstacle_dist, angle);
                return BehaviourOutput::move_along(dir, dir * speed);
            }
        }
    }

    // ── 5. Dead end: back out ─────────────────────────────────────────────
    let heading = -forward;
    BehaviourOutput::move_along(heading, heading * perf.max_speed * cfg.reverse_speed_frac)
}

/// Static hits always block; moving hits block only on a collision course
/// within the lookahead window.
fn is_blocking(
    kin:         &ShipKinematics,
    ship_radius: f32,
    cfg:         &AvoidanceConfig,
    hit:         Option<SweepHit>,
) -> bool {
    match hit {
        None => false,
        Some(h) if h.is_static => true,
        Some(h) => on_collision_course(
            h.point - kin.position,
            h.body_velocity - kin.velocity,
            ship_radius * 2.0,
            cfg.lookahead_secs,
        ),
    }
}

/// Lateral search bases: ship right/left/up/down, ordered so the first
/// candidates deflect toward the last known target; grounded ships only
/// search the horizontal pair.
fn candidate_directions(
    kin:         &ShipKinematics,
    last_target: Option<Vec3>,
    grounded:    bool,
) -> Vec<Vec3> {
    let right = kin.right();
    let up = kin.up();

    let mut candidates = if grounded {
        vec![right, -right]
    } else {
        vec![right, -right, up, -up]
    };

    if let Some(target) = last_target {
        let toward = normalize_or_zero(target - kin.position);
        if toward.length_squared() > EPSILON {
            candidates.sort_by(|a, b| {
                toward
                    .dot(*b)
                    .partial_cmp(&toward.dot(*a))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
    candidates
}

/// Safe speed while deflecting by `angle` before an obstacle `obstacle_dist`
/// away: the deflection arc has to fit inside the gap.
fn turn_speed(perf: &ShipPerformance, grounded: bool, obstacle_dist: f32, angle: f32) -> f32 {
    let radius = turn_radius_from_chord(obstacle_dist.max(EPSILON_SPEED), angle);
    max_speed_on_constant_radius_curve(perf.turn_accel(grounded), radius).min(perf.max_speed)
}
