//! Steering math: curvature and braking-distance formulas.
//!
//! All functions here are pure — the per-ship constants they take (turn
//! acceleration, braking deceleration, drag coefficient) come from a
//! [`ShipPerformance`][crate::ShipPerformance] estimate and are passed in
//! explicitly, so the formulas are trivially testable and shareable across
//! agents.
//!
//! # The drag-aware braking model
//!
//! Braking along the forward axis is modelled as
//!
//!   dv/dt = -(a + k·v²)
//!
//! where `a` is the constant thruster deceleration and `k` the quadratic
//! drag coefficient.  Substituting `v·dv/dx` and integrating over distance
//! gives the closed forms used below:
//!
//!   d(v₀ → v₁)  =  ln((a + k·v₀²) / (a + k·v₁²)) / (2k)
//!   v₀(v₁, d)   =  sqrt(((a + k·v₁²)·e^{2kd} − a) / k)
//!
//! With `k = 0` both collapse to the familiar `v² = u² + 2ad`.  The retained
//! formulas are the behavioral contract for this crate; they were tuned
//! empirically in flight tests and are not guaranteed to be physically exact
//! for every thruster layout.

use glam::{Mat3, Quat, Vec3};

/// Minimum speed used as a divisor floor; prevents interception-time and
/// braking formulas from exploding near standstill.
pub const EPSILON_SPEED: f32 = 0.1;

/// General-purpose epsilon for length/angle degeneracy checks.
pub const EPSILON: f32 = 1e-5;

// ── Vector helpers ────────────────────────────────────────────────────────────

/// Normalize `v`, returning `Vec3::ZERO` when its length is degenerate.
///
/// The zero vector is the framework-wide "no opinion" sentinel for headings.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// `true` if `v` is the zero sentinel or unit length within tolerance.
///
/// Every [`BehaviourOutput`] heading must satisfy this — it is checked in
/// debug assertions throughout the steering crates.
#[inline]
pub fn is_unit_or_zero(v: Vec3) -> bool {
    let len = v.length();
    len < EPSILON || (len - 1.0).abs() < 1e-3
}

/// An orthonormal basis `(right, up)` perpendicular to a unit `forward`.
///
/// Deterministic: picks the world axis least aligned with `forward` as the
/// up-hint so nearby headings produce nearby bases.
pub fn orthonormal_basis(forward: Vec3) -> (Vec3, Vec3) {
    let hint = if forward.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    let right = hint.cross(forward).normalize_or_zero();
    if right.length_squared() < EPSILON {
        // forward was degenerate; fall back to the world frame.
        return (Vec3::X, Vec3::Y);
    }
    let up = forward.cross(right).normalize_or_zero();
    (right, up)
}

/// Rotation that orients local `+Z` along `forward` with local `+Y` as near
/// `up` as orthogonality allows.
///
/// Degenerate inputs (zero forward, up parallel to forward) fall back to the
/// [`orthonormal_basis`] hint so the result is always a valid rotation.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f.length_squared() < EPSILON {
        return Quat::IDENTITY;
    }
    let mut right = up.cross(f);
    if right.length_squared() < EPSILON {
        let (r, _) = orthonormal_basis(f);
        right = r;
    }
    let right = right.normalize();
    let true_up = f.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, f))
}

/// Radius of the circular arc joining two points `chord` apart whose
/// tangents differ by `angle_rad`.
///
/// Degenerate angles (straight line) return `f32::INFINITY`.
#[inline]
pub fn turn_radius_from_chord(chord: f32, angle_rad: f32) -> f32 {
    let s = (angle_rad * 0.5).sin().abs();
    if s < EPSILON {
        f32::INFINITY
    } else {
        chord / (2.0 * s)
    }
}

// ── Curvature speed caps ──────────────────────────────────────────────────────

/// Maximum speed sustainable along a constant-radius curve given a lateral
/// turn acceleration budget:  `v = sqrt(a·r)`.
///
/// Returns `f32::INFINITY` for an effectively straight path.
#[inline]
pub fn max_speed_on_constant_radius_curve(turn_accel: f32, radius: f32) -> f32 {
    if !radius.is_finite() {
        return f32::INFINITY;
    }
    (turn_accel.max(0.0) * radius.max(0.0)).sqrt()
}

/// Maximum speed along an arc whose radius changes from `radius_start` to
/// `radius_end` over `arc_len` metres, limited by the angular acceleration
/// budget `ang_accel` (rad/s²).
///
/// The required angular velocity changes from `v/r₀` to `v/r₁` while the arc
/// is traversed in `arc_len / v` seconds, so the needed angular acceleration
/// is `v²·|1/r₁ − 1/r₀| / s`; solving for `v` at the budget gives the cap.
/// The result is additionally clamped by the constant-radius cap at the
/// tighter of the two radii.
pub fn max_speed_on_changing_radius_curve(
    turn_accel:   f32,
    ang_accel:    f32,
    radius_start: f32,
    radius_end:   f32,
    arc_len:      f32,
) -> f32 {
    let tighter = radius_start.min(radius_end);
    let constant_cap = max_speed_on_constant_radius_curve(turn_accel, tighter);

    let inv_delta = (1.0 / radius_end.max(EPSILON) - 1.0 / radius_start.max(EPSILON)).abs();
    if inv_delta < EPSILON || arc_len <= EPSILON {
        return constant_cap;
    }
    let changing_cap = (ang_accel.max(0.0) * arc_len / inv_delta).sqrt();
    constant_cap.min(changing_cap)
}

// ── Braking formulas ──────────────────────────────────────────────────────────

/// The highest speed from which the ship can slow to `target_speed` within
/// `distance` metres, given constant deceleration `decel` (m/s²) and a
/// quadratic drag coefficient `drag` (1/m) acting along the travel axis.
///
/// Edge cases: `distance <= 0` returns `target_speed` (no room to brake);
/// zero `decel` **and** zero `drag` also return `target_speed` (no braking
/// capacity at all).
pub fn max_speed_from_braking_distance(
    target_speed: f32,
    distance:     f32,
    decel:        f32,
    drag:         f32,
) -> f32 {
    let u = target_speed.max(0.0);
    if distance <= 0.0 {
        return u;
    }

    if drag > EPSILON {
        // v₀ = sqrt(((a + k·u²)·e^{2kd} − a) / k)
        let a = decel.max(0.0);
        let e = (2.0 * drag * distance).exp();
        let v_sq = ((a + drag * u * u) * e - a) / drag;
        v_sq.max(0.0).sqrt()
    } else if decel > EPSILON {
        // v² = u² + 2ad
        (u * u + 2.0 * decel * distance).sqrt()
    } else {
        u
    }
}

/// Distance required to slow from `from_speed` to `to_speed` under constant
/// deceleration `decel` and quadratic drag `drag` — the inverse of
/// [`max_speed_from_braking_distance`].
///
/// Returns 0 when no slowing is needed and `f32::INFINITY` when there is no
/// braking capacity at all.
pub fn braking_distance(from_speed: f32, to_speed: f32, decel: f32, drag: f32) -> f32 {
    let v0 = from_speed.max(0.0);
    let v1 = to_speed.max(0.0);
    if v0 <= v1 {
        return 0.0;
    }

    if drag > EPSILON {
        // d = ln((a + k·v₀²)/(a + k·v₁²)) / (2k)
        let a = decel.max(0.0);
        let num = a + drag * v0 * v0;
        let den = (a + drag * v1 * v1).max(EPSILON * EPSILON);
        (num / den).ln() / (2.0 * drag)
    } else if decel > EPSILON {
        (v0 * v0 - v1 * v1) / (2.0 * decel)
    } else {
        f32::INFINITY
    }
}

/// Direction-weighted braking deceleration: blends the per-axis capacities
/// by the travel direction expressed in the ship's local frame.
///
/// `local_dir` need not be normalized; a zero direction yields the forward
/// capacity (the common case of braking along the velocity vector).
pub fn directional_deceleration(
    local_dir: Vec3,
    decel_x:   f32,
    decel_y:   f32,
    decel_z:   f32,
) -> f32 {
    let d = local_dir.normalize_or_zero();
    if d.length_squared() < EPSILON {
        return decel_z;
    }
    d.x.abs() * decel_x + d.y.abs() * decel_y + d.z.abs() * decel_z
}
