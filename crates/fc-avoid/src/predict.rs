//! Closest-approach collision prediction.

use fc_core::math::EPSILON;
use fc_core::Vec3;

/// `true` if two bodies with the given relative state pass within
/// `combined_radius` of each other during the next `lookahead_secs`.
///
/// `rel_pos` is (them − us), `rel_vel` is (their velocity − ours).  The
/// approach time is the unconstrained minimizer of `|rel_pos + rel_vel·t|`,
/// clamped to `[0, lookahead_secs]` — bodies already separating never
/// trigger, and an approach further out than the window is ignored.
///
/// This predicate is the behavioral contract for both obstacle filtering
/// and the fixed-weapon firing solution; keep the clamped-window form even
/// though unclamped variants exist.
pub fn on_collision_course(
    rel_pos:         Vec3,
    rel_vel:         Vec3,
    combined_radius: f32,
    lookahead_secs:  f32,
) -> bool {
    // Already overlapping.
    if rel_pos.length_squared() <= combined_radius * combined_radius {
        return true;
    }

    let speed_sq = rel_vel.length_squared();
    if speed_sq < EPSILON {
        return false; // no relative motion, no future approach
    }

    let t_closest = (-rel_pos.dot(rel_vel) / speed_sq).clamp(0.0, lookahead_secs.max(0.0));
    if t_closest <= 0.0 {
        return false; // separating
    }

    let miss = rel_pos + rel_vel * t_closest;
    miss.length_squared() <= combined_radius * combined_radius
}
