//! Path following: closest-point tracking, lookahead selection, and the
//! curvature-based speed profile.
//!
//! The algorithm per tick:
//!
//! 1. Refine the closest point on the path near the agent, searching only
//!    the segments around the cached hint in [`PathProgress`].
//! 2. Advance the tracked waypoint once the agent crosses its tangent plane.
//!    On an open path, crossing the final waypoint's plane reports
//!    completion — exactly once; the cursor latches afterwards.
//! 3. Pick a lookahead steering target: ahead of the closest point by a
//!    distance that grows with speed and shrinks with local curvature.
//! 4. Compute the desired speed as the minimum of the local curvature cap,
//!    a forward scan of upcoming curvature within braking distance
//!    (iteration count set by [`FollowQuality`]), and a corrective cap when
//!    the agent has drifted outside the path-radius tolerance.

use fc_core::math::{self, EPSILON, EPSILON_SPEED};
use fc_core::{ShipKinematics, ShipPerformance, Vec3};

use crate::path::PathData;
use crate::progress::PathProgress;

/// Coarse samples per segment in the closest-point search.
const CLOSEST_SAMPLES: u32 = 12;

/// Lookahead shrink factor per unit of (curvature × speed).
const CURVE_TIGHTEN_FACTOR: f32 = 4.0;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Iteration budget for the forward curvature scan.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowQuality {
    /// 2 scan steps — cheapest, late braking on sharp curves.
    Low,
    /// 4 scan steps.
    #[default]
    Medium,
    /// 8 scan steps — smoothest speed profile.
    High,
}

impl FollowQuality {
    #[inline]
    pub fn scan_steps(self) -> u32 {
        match self {
            FollowQuality::Low => 2,
            FollowQuality::Medium => 4,
            FollowQuality::High => 8,
        }
    }
}

/// Tuning for [`follow_path`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowConfig {
    /// Seconds of travel the lookahead target sits ahead of the agent.
    pub lookahead_secs: f32,
    /// Lower/upper bounds on the lookahead distance, metres.
    pub min_lookahead_m: f32,
    pub max_lookahead_m: f32,
    /// Lateral drift tolerance before corrective speed reduction, metres.
    pub path_radius_m: f32,
    pub quality: FollowQuality,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            lookahead_secs:  1.5,
            min_lookahead_m: 10.0,
            max_lookahead_m: 250.0,
            path_radius_m:   25.0,
            quality:         FollowQuality::Medium,
        }
    }
}

/// Result of one following step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FollowOutput {
    /// World-space steering target ahead on the path.
    pub target_point: Vec3,
    /// Curvature- and drift-limited desired speed, m/s.
    pub desired_speed: f32,
    /// `true` exactly on the tick the final tangent plane of an open path is
    /// crossed; never `true` for closed circuits.
    pub completed: bool,
}

// ── Following ─────────────────────────────────────────────────────────────────

/// Advance `progress` along `path` and produce a steering target.
///
/// Returns `None` when the path is not followable (< 2 waypoints; logged at
/// debug level) — callers treat that as "no opinion" and fall through to
/// other behaviors.
pub fn follow_path(
    path:     &PathData,
    progress: &mut PathProgress,
    kin:      &ShipKinematics,
    perf:     &ShipPerformance,
    grounded: bool,
    cfg:      &FollowConfig,
) -> Option<FollowOutput> {
    if !path.is_followable() {
        log::debug!("path '{}' has fewer than 2 waypoints; skipping follow", path.name);
        return None;
    }

    // ── 1. Closest point near the cached hint ─────────────────────────────
    let (seg, t) = closest_point_near(path, kin.position, progress.segment);
    progress.segment = seg;
    progress.t = t;

    // ── 2. Waypoint advancement by tangent-plane crossing ─────────────────
    let completed = advance_waypoint(path, progress, kin.position);

    // ── 3. Lookahead target ───────────────────────────────────────────────
    let speed = kin.speed();
    let curvature_here = path.curvature_at(seg, t);
    let raw = (speed * cfg.lookahead_secs).clamp(cfg.min_lookahead_m, cfg.max_lookahead_m);
    let lookahead = raw / (1.0 + CURVE_TIGHTEN_FACTOR * curvature_here * speed.max(EPSILON_SPEED));

    let s_here = path.distance_of(seg, t);
    let (la_seg, la_t) = path.at_distance(s_here + lookahead);
    let target_point = path.point_at(la_seg, la_t);

    // ── 4. Speed profile ──────────────────────────────────────────────────
    let turn_accel = perf.turn_accel(grounded);

    // (a) local curvature cap.
    let mut desired = curvature_cap(turn_accel, curvature_here).min(perf.max_speed);

    // (b) forward scan: the most limiting upcoming curvature within braking
    // distance, each candidate relaxed by the distance available to brake.
    let scan_dist = perf.braking_distance(speed.max(EPSILON_SPEED), 0.0, Vec3::Z);
    if scan_dist.is_finite() && scan_dist > EPSILON {
        let steps = cfg.quality.scan_steps();
        for i in 1..=steps {
            let ds = scan_dist * i as f32 / steps as f32;
            let (s_seg, s_t) = path.at_distance(s_here + ds);
            if !path.closed_circuit && s_seg == path.segment_count() - 1 && s_t >= 1.0 {
                break; // scanned past the end of an open path
            }
            let cap = curvature_cap(turn_accel, path.curvature_at(s_seg, s_t));
            if cap.is_finite() {
                let admissible = perf.max_speed_from_braking_distance(cap, ds, Vec3::Z);
                desired = desired.min(admissible);
            }
        }
    }

    // (c) corrective reduction when outside the path-radius tolerance —
    // treated as two chained circular arcs rejoining the path at the
    // lookahead point.
    let offset = (kin.position - path.point_at(seg, t)).length();
    if offset > cfg.path_radius_m {
        let gap = lookahead.max(cfg.min_lookahead_m);
        let arc_radius = (gap * gap + offset * offset) / (4.0 * offset);
        desired = desired.min(math::max_speed_on_constant_radius_curve(turn_accel, arc_radius));
    }

    Some(FollowOutput {
        target_point,
        desired_speed: desired.min(perf.max_speed),
        completed,
    })
}

/// Speed cap for curvature `κ`: straight sections are uncapped.
#[inline]
fn curvature_cap(turn_accel: f32, curvature: f32) -> f32 {
    if curvature < EPSILON {
        f32::INFINITY
    } else {
        math::max_speed_on_constant_radius_curve(turn_accel, 1.0 / curvature)
    }
}

/// Advance the tracked waypoint while the agent keeps crossing tangent
/// planes.  Returns `true` on the tick an open path completes.
fn advance_waypoint(path: &PathData, progress: &mut PathProgress, position: Vec3) -> bool {
    if progress.finished {
        return false;
    }
    let n = path.waypoints.len();
    let segs = path.segment_count();

    // Bounded by the waypoint count: at most one full lap per tick.
    for _ in 0..n {
        let wp = progress.target_waypoint;
        let wp_pos = path.waypoints[wp % n].position;
        let tangent = path.tangent_at_waypoint(wp);
        if tangent.length_squared() < EPSILON {
            break;
        }
        if (position - wp_pos).dot(tangent) <= 0.0 {
            break; // still before the plane
        }

        if !path.closed_circuit && wp >= n - 1 {
            progress.finished = true;
            return true;
        }
        progress.target_waypoint = (wp + 1) % n;
        progress.segment = (progress.segment + 1) % segs;
        progress.t = 0.0;
    }
    false
}

/// Locate the closest point on the path near `position`, searching the
/// segments surrounding `hint` (coarse sampling plus one refinement pass).
///
/// Returns `(segment, t)`.
pub fn closest_point_near(path: &PathData, position: Vec3, hint: usize) -> (usize, f32) {
    let segs = path.segment_count();
    if segs == 0 {
        return (0, 0.0);
    }
    let hint = hint.min(segs - 1);

    let mut best = (hint, 0.0, f32::INFINITY);

    // Candidate segments: hint − 1 ..= hint + 1, wrapped for circuits and
    // clamped for open paths.
    for offset in -1i64..=1 {
        let seg = if path.closed_circuit {
            ((hint as i64 + offset).rem_euclid(segs as i64)) as usize
        } else {
            let s = hint as i64 + offset;
            if s < 0 || s >= segs as i64 {
                continue;
            }
            s as usize
        };

        for i in 0..=CLOSEST_SAMPLES {
            let t = i as f32 / CLOSEST_SAMPLES as f32;
            let d = (path.point_at(seg, t) - position).length_squared();
            if d < best.2 {
                best = (seg, t, d);
            }
        }
    }

    // Refinement: golden-section-free local sampling around the coarse best.
    let (seg, coarse_t, _) = best;
    let step = 1.0 / CLOSEST_SAMPLES as f32;
    let mut fine = (coarse_t, f32::INFINITY);
    for i in 0..=8 {
        let t = (coarse_t - step + i as f32 * step / 4.0).clamp(0.0, 1.0);
        let d = (path.point_at(seg, t) - position).length_squared();
        if d < fine.1 {
            fine = (t, d);
        }
    }
    (seg, fine.0)
}
