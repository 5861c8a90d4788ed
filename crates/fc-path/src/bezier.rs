//! Cubic Bezier segment evaluation.
//!
//! Each path segment is a cubic Bezier defined by the start waypoint's
//! position `p0` and out-control `c0`, and the end waypoint's in-control
//! `c1` and position `p1`.  Control points are stored in absolute world
//! coordinates.

use fc_core::Vec3;
use fc_core::math::EPSILON;

/// Point on the curve at parameter `t ∈ [0, 1]`.
#[inline]
pub fn point(p0: Vec3, c0: Vec3, c1: Vec3, p1: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * c0 + 3.0 * u * t * t * c1 + t * t * t * p1
}

/// First derivative with respect to `t` (not normalized).
#[inline]
pub fn derivative(p0: Vec3, c0: Vec3, c1: Vec3, p1: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    3.0 * u * u * (c0 - p0) + 6.0 * u * t * (c1 - c0) + 3.0 * t * t * (p1 - c1)
}

/// Second derivative with respect to `t`.
#[inline]
pub fn second_derivative(p0: Vec3, c0: Vec3, c1: Vec3, p1: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    6.0 * u * (c1 - 2.0 * c0 + p0) + 6.0 * t * (p1 - 2.0 * c1 + c0)
}

/// Unit tangent at `t`; zero for a degenerate segment.
#[inline]
pub fn tangent(p0: Vec3, c0: Vec3, c1: Vec3, p1: Vec3, t: f32) -> Vec3 {
    derivative(p0, c0, c1, p1, t).normalize_or_zero()
}

/// Local curvature `κ = |B′ × B″| / |B′|³` at `t` (1/metres).
///
/// A straight or degenerate segment returns 0.
pub fn curvature(p0: Vec3, c0: Vec3, c1: Vec3, p1: Vec3, t: f32) -> f32 {
    let d1 = derivative(p0, c0, c1, p1, t);
    let d2 = second_derivative(p0, c0, c1, p1, t);
    let speed = d1.length();
    if speed < EPSILON {
        return 0.0;
    }
    d1.cross(d2).length() / (speed * speed * speed)
}

/// Approximate arc length by sampling `samples` chords.
pub fn arc_length(p0: Vec3, c0: Vec3, c1: Vec3, p1: Vec3, samples: u32) -> f32 {
    let n = samples.max(1);
    let mut len = 0.0;
    let mut prev = p0;
    for i in 1..=n {
        let t = i as f32 / n as f32;
        let p = point(p0, c0, c1, p1, t);
        len += (p - prev).length();
        prev = p;
    }
    len
}
