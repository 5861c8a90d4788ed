//! Unit tests for fc-path.

use fc_core::{ShipConfig, ShipKinematics, ShipPerformance, Vec3};

use crate::follow::{FollowConfig, follow_path};
use crate::path::{PathBuilder, PathData};
use crate::progress::PathProgress;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Straight open path along +Z: (0,0,0) → (0,0,1000).
fn straight_path() -> PathData {
    PathBuilder::new("straight")
        .waypoint(Vec3::ZERO)
        .waypoint(Vec3::new(0.0, 0.0, 1000.0))
        .build()
}

/// Square closed circuit, 1 km sides, in the XZ plane.
fn square_circuit() -> PathData {
    PathBuilder::new("square")
        .waypoint(Vec3::new(0.0, 0.0, 0.0))
        .waypoint(Vec3::new(1000.0, 0.0, 0.0))
        .waypoint(Vec3::new(1000.0, 0.0, 1000.0))
        .waypoint(Vec3::new(0.0, 0.0, 1000.0))
        .closed(true)
        .build()
}

fn perf() -> ShipPerformance {
    ShipPerformance::estimate(&ShipConfig::default())
}

// ── Bezier ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bezier_tests {
    use super::*;
    use crate::bezier;

    #[test]
    fn straight_segment_interpolates() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(0.0, 0.0, 90.0);
        let c0 = Vec3::new(0.0, 0.0, 30.0);
        let c1 = Vec3::new(0.0, 0.0, 60.0);
        let mid = bezier::point(p0, c0, c1, p1, 0.5);
        assert!((mid - Vec3::new(0.0, 0.0, 45.0)).length() < 1e-3);
        let tangent = bezier::tangent(p0, c0, c1, p1, 0.5);
        assert!((tangent - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn straight_segment_has_zero_curvature() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(0.0, 0.0, 90.0);
        let c0 = Vec3::new(0.0, 0.0, 30.0);
        let c1 = Vec3::new(0.0, 0.0, 60.0);
        assert!(bezier::curvature(p0, c0, c1, p1, 0.5) < 1e-6);
    }

    #[test]
    fn bent_segment_has_positive_curvature() {
        let p0 = Vec3::ZERO;
        let c0 = Vec3::new(0.0, 0.0, 50.0);
        let c1 = Vec3::new(50.0, 0.0, 100.0);
        let p1 = Vec3::new(100.0, 0.0, 100.0);
        assert!(bezier::curvature(p0, c0, c1, p1, 0.5) > 1e-4);
    }

    #[test]
    fn arc_length_of_straight_equals_distance() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(0.0, 0.0, 120.0);
        let c0 = Vec3::new(0.0, 0.0, 40.0);
        let c1 = Vec3::new(0.0, 0.0, 80.0);
        let len = bezier::arc_length(p0, c0, c1, p1, 16);
        assert!((len - 120.0).abs() < 0.5);
    }
}

// ── PathData / PathBuilder ────────────────────────────────────────────────────

#[cfg(test)]
mod path_tests {
    use super::*;

    #[test]
    fn open_path_segment_count() {
        let p = straight_path();
        assert_eq!(p.segment_count(), 1);
        assert!(p.is_followable());
    }

    #[test]
    fn closed_circuit_segment_count() {
        let p = square_circuit();
        assert_eq!(p.segment_count(), 4);
    }

    #[test]
    fn single_waypoint_not_followable() {
        let p = PathBuilder::new("dot").waypoint(Vec3::ZERO).build();
        assert_eq!(p.segment_count(), 0);
        assert!(!p.is_followable());
    }

    #[test]
    fn cumulative_lengths_monotonic() {
        let p = square_circuit();
        for w in p.cumulative_lengths.windows(2) {
            assert!(w[1] > w[0]);
        }
        assert!((p.total_length() - 4000.0).abs() < 4000.0 * 0.05);
    }

    #[test]
    fn distance_roundtrip() {
        let p = square_circuit();
        let s = p.total_length() * 0.37;
        let (seg, t) = p.at_distance(s);
        let back = p.distance_of(seg, t);
        assert!((back - s).abs() < p.total_length() * 0.01);
    }

    #[test]
    fn at_distance_wraps_on_circuit() {
        let p = square_circuit();
        let total = p.total_length();
        let (seg_a, t_a) = p.at_distance(total * 0.25);
        let (seg_b, t_b) = p.at_distance(total * 1.25);
        assert_eq!(seg_a, seg_b);
        assert!((t_a - t_b).abs() < 1e-3);
    }

    #[test]
    fn at_distance_clamps_on_open_path() {
        let p = straight_path();
        let (seg, t) = p.at_distance(1e9);
        assert_eq!(seg, p.segment_count() - 1);
        assert_eq!(t, 1.0);
    }

    #[test]
    fn straight_tangent_at_waypoints() {
        let p = straight_path();
        assert!((p.tangent_at_waypoint(0) - Vec3::Z).length() < 1e-3);
        assert!((p.tangent_at_waypoint(1) - Vec3::Z).length() < 1e-3);
    }
}

// ── Closest point ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod closest_point_tests {
    use super::*;
    use crate::follow::closest_point_near;

    #[test]
    fn finds_midpoint_on_straight_path() {
        let p = straight_path();
        let (seg, t) = closest_point_near(&p, Vec3::new(30.0, 0.0, 500.0), 0);
        assert_eq!(seg, 0);
        assert!((t - 0.5).abs() < 0.05, "t = {t}");
    }

    #[test]
    fn uses_hint_neighbourhood_on_circuit() {
        let p = square_circuit();
        // Near the midpoint of segment 2, hinted from segment 2.
        let probe = Vec3::new(500.0, 0.0, 1010.0);
        let (seg, _) = closest_point_near(&p, probe, 2);
        assert_eq!(seg, 2);
    }
}

// ── Following ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod follow_tests {
    use super::*;

    #[test]
    fn unfollowable_path_returns_none() {
        let p = PathBuilder::new("dot").waypoint(Vec3::ZERO).build();
        let mut progress = PathProgress::new();
        let kin = ShipKinematics::at_rest(Vec3::ZERO);
        let out = follow_path(&p, &mut progress, &kin, &perf(), false, &FollowConfig::default());
        assert!(out.is_none());
    }

    #[test]
    fn lookahead_target_is_ahead_on_straight_path() {
        let p = straight_path();
        let mut progress = PathProgress::new();
        let kin = ShipKinematics {
            velocity: Vec3::Z * 50.0,
            ..ShipKinematics::at_rest(Vec3::new(0.0, 0.0, 100.0))
        };
        let out = follow_path(&p, &mut progress, &kin, &perf(), false, &FollowConfig::default())
            .expect("followable");
        assert!(out.target_point.z > 100.0, "target should be ahead");
        assert!(out.desired_speed <= perf().max_speed + 1e-3);
        assert!(!out.completed);
    }

    #[test]
    fn open_path_completes_exactly_once() {
        // Agent placed past the last waypoint, moving away from it.
        let p = straight_path();
        let mut progress = PathProgress::new();
        let kin = ShipKinematics {
            velocity: Vec3::Z * 20.0,
            ..ShipKinematics::at_rest(Vec3::new(0.0, 0.0, 1100.0))
        };

        let first = follow_path(&p, &mut progress, &kin, &perf(), false, &FollowConfig::default())
            .expect("followable");
        assert!(first.completed, "first tick past the plane must complete");

        for _ in 0..5 {
            let again =
                follow_path(&p, &mut progress, &kin, &perf(), false, &FollowConfig::default())
                    .expect("followable");
            assert!(!again.completed, "completion must not repeat");
        }
    }

    #[test]
    fn closed_circuit_never_completes() {
        let p = square_circuit();
        let mut progress = PathProgress::new();
        let mut kin = ShipKinematics {
            velocity: Vec3::X * 80.0,
            ..ShipKinematics::at_rest(Vec3::ZERO)
        };
        // Sweep the agent most of the way around the square.
        for step in 0..200 {
            let s = step as f32 * 18.0;
            kin.position = if s < 1000.0 {
                Vec3::new(s, 0.0, 0.0)
            } else if s < 2000.0 {
                Vec3::new(1000.0, 0.0, s - 1000.0)
            } else {
                Vec3::new(1000.0 - (s - 2000.0).min(1000.0), 0.0, 1000.0)
            };
            let out = follow_path(&p, &mut progress, &kin, &perf(), false, &FollowConfig::default())
                .expect("followable");
            assert!(!out.completed);
        }
        assert!(!progress.finished);
    }

    #[test]
    fn drift_outside_path_radius_reduces_speed() {
        let p = straight_path();
        let cfg = FollowConfig::default();
        let fast = Vec3::Z * 150.0;

        let mut on_path = PathProgress::new();
        let kin_on = ShipKinematics {
            velocity: fast,
            ..ShipKinematics::at_rest(Vec3::new(0.0, 0.0, 400.0))
        };
        let v_on = follow_path(&p, &mut on_path, &kin_on, &perf(), false, &cfg)
            .unwrap()
            .desired_speed;

        let mut off_path = PathProgress::new();
        let kin_off = ShipKinematics {
            velocity: fast,
            ..ShipKinematics::at_rest(Vec3::new(400.0, 0.0, 400.0))
        };
        let v_off = follow_path(&p, &mut off_path, &kin_off, &perf(), false, &cfg)
            .unwrap()
            .desired_speed;

        assert!(v_off < v_on, "off-path {v_off} should be slower than on-path {v_on}");
    }

    #[test]
    fn grounded_context_is_no_faster() {
        let p = square_circuit();
        let kin = ShipKinematics {
            velocity: Vec3::X * 100.0,
            ..ShipKinematics::at_rest(Vec3::new(990.0, 0.0, 10.0)) // entering a corner
        };
        let mut prog_air = PathProgress { segment: 0, t: 0.95, target_waypoint: 1, finished: false };
        let mut prog_gnd = prog_air;
        let cfg = FollowConfig::default();
        let v_air = follow_path(&p, &mut prog_air, &kin, &perf(), false, &cfg).unwrap().desired_speed;
        let v_gnd = follow_path(&p, &mut prog_gnd, &kin, &perf(), true, &cfg).unwrap().desired_speed;
        assert!(v_gnd <= v_air + 1e-3);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use super::*;
    use crate::loader::load_path_reader;
    use crate::PathError;

    const PATROL_CSV: &str = "\
name,x,y,z,in_x,in_y,in_z,out_x,out_y,out_z,closed\n\
patrol,0,0,0,,,,,,,1\n\
patrol,1000,0,0,,,,,,,1\n\
patrol,1000,0,1000,,,,,,,1\n\
patrol,0,0,1000,,,,,,,1\n\
transit,0,0,0,,,,,,,0\n\
transit,0,0,5000,,,,,,,0\n\
";

    #[test]
    fn loads_paths_grouped_by_name() {
        let paths = load_path_reader(Cursor::new(PATROL_CSV)).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].name, "patrol");
        assert!(paths[0].closed_circuit);
        assert_eq!(paths[0].waypoints.len(), 4);
        assert_eq!(paths[1].name, "transit");
        assert!(!paths[1].closed_circuit);
    }

    #[test]
    fn explicit_controls_are_respected() {
        let csv = "\
name,x,y,z,in_x,in_y,in_z,out_x,out_y,out_z,closed\n\
p,0,0,0,0,0,-10,0,0,10,0\n\
p,0,0,100,0,0,90,0,0,110,0\n\
";
        let paths = load_path_reader(Cursor::new(csv)).unwrap();
        let wp = &paths[0].waypoints[0];
        assert_eq!(wp.out_control, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn partial_controls_are_rejected() {
        let csv = "\
name,x,y,z,in_x,in_y,in_z,out_x,out_y,out_z,closed\n\
p,0,0,0,1,,,,,,0\n\
p,0,0,100,,,,,,,0\n\
";
        let err = load_path_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, PathError::Parse(_)));
    }

    #[test]
    fn single_waypoint_path_is_rejected() {
        let csv = "\
name,x,y,z,in_x,in_y,in_z,out_x,out_y,out_z,closed\n\
stub,0,0,0,,,,,,,0\n\
";
        let err = load_path_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, PathError::TooFewWaypoints { count: 1, .. }));
    }
}
