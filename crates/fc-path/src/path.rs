//! Path representation and builder.
//!
//! # Data layout
//!
//! A path is an ordered list of waypoints, each carrying Bezier-style
//! in/out control points in absolute coordinates.  Segment `i` runs from
//! waypoint `i` to waypoint `i + 1` (wrapping for closed circuits), so an
//! open path of `n` waypoints has `n − 1` segments and a closed circuit has
//! `n`.  Segment arc lengths and cumulative distances are precomputed at
//! build time; lookups on the hot path are array reads plus one binary
//! search.
//!
//! Paths are immutable after `PathBuilder::build`; agents keep their own
//! cursor in [`PathProgress`][crate::PathProgress].

use fc_core::Vec3;
use fc_core::math::EPSILON;

use crate::bezier;

/// Chord samples used to estimate each segment's arc length.
const LENGTH_SAMPLES: u32 = 16;

/// Fraction of the distance to each neighbour used for auto-generated
/// control points (Catmull-Rom-style tangents).
const AUTO_TANGENT_FRACTION: f32 = 1.0 / 3.0;

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// One path waypoint with absolute-position Bezier control points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub position: Vec3,
    /// Control point shaping the approach into this waypoint.
    pub in_control: Vec3,
    /// Control point shaping the departure from this waypoint.
    pub out_control: Vec3,
}

// ── PathData ──────────────────────────────────────────────────────────────────

/// An immutable, shareable flight path.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`PathBuilder`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathData {
    pub name: String,
    pub waypoints: Vec<Waypoint>,
    /// `true` when the last waypoint connects back to the first.
    pub closed_circuit: bool,
    /// Arc length of each segment, metres.  Length = `segment_count()`.
    pub segment_lengths: Vec<f32>,
    /// Cumulative arc length at the start of each segment, metres.
    /// Length = `segment_count() + 1`; the final entry is the total length.
    pub cumulative_lengths: Vec<f32>,
}

impl PathData {
    /// Number of Bezier segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        match (self.waypoints.len(), self.closed_circuit) {
            (0 | 1, _) => 0,
            (n, true) => n,
            (n, false) => n - 1,
        }
    }

    /// Total arc length, metres.
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.cumulative_lengths.last().copied().unwrap_or(0.0)
    }

    /// `true` if the path has enough waypoints to be followed.
    #[inline]
    pub fn is_followable(&self) -> bool {
        self.waypoints.len() >= 2
    }

    /// The four Bezier control vectors of segment `seg`.
    ///
    /// `seg` must be `< segment_count()`.
    #[inline]
    pub fn segment(&self, seg: usize) -> (Vec3, Vec3, Vec3, Vec3) {
        let a = &self.waypoints[seg];
        let b = &self.waypoints[(seg + 1) % self.waypoints.len()];
        (a.position, a.out_control, b.in_control, b.position)
    }

    /// Point on segment `seg` at parameter `t`.
    #[inline]
    pub fn point_at(&self, seg: usize, t: f32) -> Vec3 {
        let (p0, c0, c1, p1) = self.segment(seg);
        bezier::point(p0, c0, c1, p1, t)
    }

    /// Unit tangent on segment `seg` at parameter `t`.
    #[inline]
    pub fn tangent_at(&self, seg: usize, t: f32) -> Vec3 {
        let (p0, c0, c1, p1) = self.segment(seg);
        bezier::tangent(p0, c0, c1, p1, t)
    }

    /// Curvature (1/m) on segment `seg` at parameter `t`.
    #[inline]
    pub fn curvature_at(&self, seg: usize, t: f32) -> f32 {
        let (p0, c0, c1, p1) = self.segment(seg);
        bezier::curvature(p0, c0, c1, p1, t)
    }

    /// Unit tangent at waypoint `wp` (start of its outgoing segment, or end
    /// of the final segment for the last waypoint of an open path).
    pub fn tangent_at_waypoint(&self, wp: usize) -> Vec3 {
        let segs = self.segment_count();
        if segs == 0 {
            return Vec3::ZERO;
        }
        if !self.closed_circuit && wp >= segs {
            // Last waypoint of an open path: tangent of the final segment end.
            return self.tangent_at(segs - 1, 1.0);
        }
        self.tangent_at(wp % segs, 0.0)
    }

    /// Arc-length position from the path start to `(seg, t)`, metres.
    ///
    /// Uses a linear parameter→length approximation within the segment,
    /// which is accurate to well under a percent for flight-scale segments.
    #[inline]
    pub fn distance_of(&self, seg: usize, t: f32) -> f32 {
        self.cumulative_lengths[seg] + self.segment_lengths[seg] * t.clamp(0.0, 1.0)
    }

    /// Map an arc-length position back to `(segment, t)`.
    ///
    /// Open paths clamp to the final point; closed circuits wrap.
    pub fn at_distance(&self, mut s: f32) -> (usize, f32) {
        let total = self.total_length();
        let segs = self.segment_count();
        if segs == 0 || total <= EPSILON {
            return (0, 0.0);
        }
        if self.closed_circuit {
            s = s.rem_euclid(total);
        } else if s >= total {
            return (segs - 1, 1.0);
        }
        let s = s.max(0.0);

        // cumulative_lengths is sorted; find the containing segment.
        let seg = match self
            .cumulative_lengths
            .binary_search_by(|probe| probe.partial_cmp(&s).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(i) => i.min(segs - 1),
            Err(i) => i.saturating_sub(1).min(segs - 1),
        };
        let seg_len = self.segment_lengths[seg].max(EPSILON);
        let t = ((s - self.cumulative_lengths[seg]) / seg_len).clamp(0.0, 1.0);
        (seg, t)
    }
}

// ── PathBuilder ───────────────────────────────────────────────────────────────

/// Fluent builder for [`PathData`].
///
/// Control points may be given explicitly per waypoint or left to the
/// builder, which generates Catmull-Rom-style tangents from the neighbouring
/// waypoints at `build` time.
pub struct PathBuilder {
    name: String,
    positions: Vec<Vec3>,
    controls: Vec<Option<(Vec3, Vec3)>>,
    closed: bool,
}

impl PathBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
            controls: Vec::new(),
            closed: false,
        }
    }

    /// Append a waypoint with auto-generated control points.
    pub fn waypoint(mut self, position: Vec3) -> Self {
        self.positions.push(position);
        self.controls.push(None);
        self
    }

    /// Append a waypoint with explicit absolute in/out control points.
    pub fn waypoint_with_controls(mut self, position: Vec3, in_control: Vec3, out_control: Vec3) -> Self {
        self.positions.push(position);
        self.controls.push(Some((in_control, out_control)));
        self
    }

    /// Mark the path as a closed circuit (last waypoint joins the first).
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Finalize: generate missing tangents and precompute segment lengths.
    ///
    /// A path with fewer than 2 waypoints builds successfully but reports
    /// `is_followable() == false`; the follow layer treats it as a no-op.
    pub fn build(self) -> PathData {
        let n = self.positions.len();
        let mut waypoints = Vec::with_capacity(n);

        for i in 0..n {
            let pos = self.positions[i];
            let (in_c, out_c) = match self.controls[i] {
                Some(c) => c,
                None => auto_controls(&self.positions, i, self.closed),
            };
            waypoints.push(Waypoint { position: pos, in_control: in_c, out_control: out_c });
        }

        let mut path = PathData {
            name: self.name,
            waypoints,
            closed_circuit: self.closed,
            segment_lengths: Vec::new(),
            cumulative_lengths: Vec::new(),
        };

        let segs = path.segment_count();
        let mut cumulative = vec![0.0; segs + 1];
        let mut lengths = vec![0.0; segs];
        for seg in 0..segs {
            let (p0, c0, c1, p1) = path.segment(seg);
            let len = bezier::arc_length(p0, c0, c1, p1, LENGTH_SAMPLES);
            lengths[seg] = len;
            cumulative[seg + 1] = cumulative[seg] + len;
        }
        path.segment_lengths = lengths;
        path.cumulative_lengths = cumulative;
        path
    }
}

/// Catmull-Rom-style control points for waypoint `i`: offset along the
/// direction between its neighbours, one third of the local spacing.
fn auto_controls(positions: &[Vec3], i: usize, closed: bool) -> (Vec3, Vec3) {
    let n = positions.len();
    if n < 2 {
        return (positions[i], positions[i]);
    }
    let pos = positions[i];
    let prev = if i > 0 {
        positions[i - 1]
    } else if closed {
        positions[n - 1]
    } else {
        // Mirror the forward neighbour so the end tangent points along the path.
        pos - (positions[i + 1] - pos)
    };
    let next = if i + 1 < n {
        positions[i + 1]
    } else if closed {
        positions[0]
    } else {
        pos + (pos - positions[i - 1])
    };

    let tangent = (next - prev).normalize_or_zero();
    let in_len = (pos - prev).length() * AUTO_TANGENT_FRACTION;
    let out_len = (next - pos).length() * AUTO_TANGENT_FRACTION;
    (pos - tangent * in_len, pos + tangent * out_len)
}
