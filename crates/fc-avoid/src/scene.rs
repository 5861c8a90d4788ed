//! `SphereScene` — a static sphere field behind the `SweepSource` trait.
//!
//! This is the reference sweep source used by tests and demos: obstacles are
//! spheres in an R-tree, probes are exact segment/sphere intersections
//! against the envelope-filtered candidates.  Hosts with a physics engine
//! implement [`SweepSource`] against their own colliders instead.

use rstar::{RTree, RTreeObject, AABB};

use fc_core::math::EPSILON;
use fc_core::Vec3;

use crate::sweep::{SweepHit, SweepSource};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// One static sphere obstacle; its envelope already includes the radius.
#[derive(Clone, Debug)]
struct SphereEntry {
    center: Vec3,
    radius: f32,
}

impl RTreeObject for SphereEntry {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        let r = Vec3::splat(self.radius);
        let lo = self.center - r;
        let hi = self.center + r;
        AABB::from_corners([lo.x, lo.y, lo.z], [hi.x, hi.y, hi.z])
    }
}

// ── SphereScene ───────────────────────────────────────────────────────────────

/// An immutable set of static sphere obstacles.
pub struct SphereScene {
    tree: RTree<SphereEntry>,
}

impl SphereScene {
    /// A scene with no obstacles — every sweep misses.
    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load `(center, radius)` spheres.
    pub fn from_spheres(spheres: impl IntoIterator<Item = (Vec3, f32)>) -> Self {
        let entries = spheres
            .into_iter()
            .map(|(center, radius)| SphereEntry { center, radius: radius.max(0.0) })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// First sphere hit by a segment from `origin` along unit `dir`, with
    /// each sphere inflated by `inflate` (0 for a thin ray).
    fn segment_hit(&self, origin: Vec3, dir: Vec3, max_dist: f32, inflate: f32) -> Option<SweepHit> {
        if dir.length_squared() < EPSILON || max_dist <= 0.0 {
            return None;
        }
        let end = origin + dir * max_dist;
        let pad = Vec3::splat(inflate);
        let lo = origin.min(end) - pad;
        let hi = origin.max(end) + pad;
        let query = AABB::from_corners([lo.x, lo.y, lo.z], [hi.x, hi.y, hi.z]);

        let mut best: Option<SweepHit> = None;
        for entry in self.tree.locate_in_envelope_intersecting(&query) {
            let r = entry.radius + inflate;
            let Some(t) = ray_sphere(origin, dir, entry.center, r) else {
                continue;
            };
            if t > max_dist {
                continue;
            }
            if best.as_ref().is_none_or(|b| t < b.distance) {
                let point = origin + dir * t;
                best = Some(SweepHit {
                    distance: t,
                    point,
                    normal: (point - entry.center).normalize_or_zero(),
                    body_velocity: Vec3::ZERO,
                    is_static: true,
                });
            }
        }
        best
    }
}

impl SweepSource for SphereScene {
    fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<SweepHit> {
        self.segment_hit(origin, dir, max_dist, 0.0)
    }

    fn sphere_cast(&self, origin: Vec3, radius: f32, dir: Vec3, max_dist: f32) -> Option<SweepHit> {
        self.segment_hit(origin, dir, max_dist, radius.max(0.0))
    }
}

/// Smallest non-negative `t` with `|origin + dir·t − center| = radius`, or
/// `None` when the ray misses.  An origin already inside returns `t = 0`.
fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = center - origin;
    if oc.length_squared() <= radius * radius {
        return Some(0.0);
    }
    let tca = oc.dot(dir);
    if tca < 0.0 {
        return None; // sphere behind the origin
    }
    let d_sq = oc.length_squared() - tca * tca;
    if d_sq > radius * radius {
        return None;
    }
    let thc = (radius * radius - d_sq).sqrt();
    Some((tca - thc).max(0.0))
}
