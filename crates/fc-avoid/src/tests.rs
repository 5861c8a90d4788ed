//! Unit tests for fc-avoid.

use fc_core::math::is_unit_or_zero;
use fc_core::{ShipConfig, ShipKinematics, ShipPerformance, Vec3};
use fc_steer::BehaviourOutput;

use crate::avoid::{avoid, AvoidanceConfig};
use crate::scene::SphereScene;
use crate::sweep::{SweepHit, SweepQuality, SweepSource};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SHIP_RADIUS: f32 = 8.0;

fn perf() -> ShipPerformance {
    ShipPerformance::estimate(&ShipConfig::default())
}

fn cruising() -> ShipKinematics {
    ShipKinematics {
        velocity: Vec3::Z * 50.0,
        ..ShipKinematics::at_rest(Vec3::ZERO)
    }
}

fn run(kin: &ShipKinematics, target: Option<Vec3>, scene: &SphereScene, cfg: &AvoidanceConfig) -> BehaviourOutput {
    avoid(kin, &perf(), false, SHIP_RADIUS, target, scene, cfg)
}

// ── Collision-course predicate ────────────────────────────────────────────────

#[cfg(test)]
mod predict_tests {
    use crate::predict::on_collision_course;
    use fc_core::Vec3;

    #[test]
    fn overlap_is_always_a_collision() {
        assert!(on_collision_course(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 5.0, 3.0));
    }

    #[test]
    fn head_on_approach_collides() {
        // Body 100 m ahead closing at 50 m/s: impact in 2 s, inside a 3 s window.
        assert!(on_collision_course(Vec3::Z * 100.0, -Vec3::Z * 50.0, 5.0, 3.0));
    }

    #[test]
    fn separating_bodies_never_collide() {
        assert!(!on_collision_course(Vec3::Z * 100.0, Vec3::Z * 50.0, 5.0, 3.0));
    }

    #[test]
    fn approach_outside_window_is_ignored() {
        // Impact would be at t = 10 s, window is 3 s.
        assert!(!on_collision_course(Vec3::Z * 1000.0, -Vec3::Z * 100.0, 5.0, 3.0));
    }

    #[test]
    fn wide_miss_is_not_a_collision() {
        // Passing 50 m abeam with a 5 m combined radius.
        assert!(!on_collision_course(
            Vec3::new(50.0, 0.0, 100.0),
            -Vec3::Z * 50.0,
            5.0,
            10.0
        ));
    }

    #[test]
    fn stationary_relative_state_is_safe_outside_radius() {
        assert!(!on_collision_course(Vec3::Z * 100.0, Vec3::ZERO, 5.0, 3.0));
    }
}

// ── SphereScene ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn empty_scene_never_hits() {
        let scene = SphereScene::empty();
        assert!(scene.is_empty());
        assert!(scene.raycast(Vec3::ZERO, Vec3::Z, 1e6).is_none());
    }

    #[test]
    fn ray_hits_sphere_ahead() {
        let scene = SphereScene::from_spheres([(Vec3::Z * 100.0, 20.0)]);
        let hit = scene.raycast(Vec3::ZERO, Vec3::Z, 500.0).expect("hit");
        assert!((hit.distance - 80.0).abs() < 1e-3);
        assert!(hit.is_static);
        assert!((hit.normal + Vec3::Z).length() < 1e-3); // facing back at us
    }

    #[test]
    fn sphere_behind_is_missed() {
        let scene = SphereScene::from_spheres([(-Vec3::Z * 100.0, 20.0)]);
        assert!(scene.raycast(Vec3::ZERO, Vec3::Z, 500.0).is_none());
    }

    #[test]
    fn ray_length_limits_the_hit() {
        let scene = SphereScene::from_spheres([(Vec3::Z * 100.0, 20.0)]);
        assert!(scene.raycast(Vec3::ZERO, Vec3::Z, 50.0).is_none());
    }

    #[test]
    fn sphere_cast_inflation_catches_near_misses() {
        // Ray passes 25 m from a 20 m sphere: thin ray misses, a 10 m-radius
        // swept sphere clips it.
        let scene = SphereScene::from_spheres([(Vec3::new(25.0, 0.0, 100.0), 20.0)]);
        assert!(scene.raycast(Vec3::ZERO, Vec3::Z, 500.0).is_none());
        assert!(scene.sphere_cast(Vec3::ZERO, 10.0, Vec3::Z, 500.0).is_some());
    }

    #[test]
    fn nearest_of_several_wins() {
        let scene = SphereScene::from_spheres([
            (Vec3::Z * 400.0, 20.0),
            (Vec3::Z * 150.0, 20.0),
            (Vec3::Z * 300.0, 20.0),
        ]);
        let hit = scene.raycast(Vec3::ZERO, Vec3::Z, 1000.0).unwrap();
        assert!((hit.distance - 130.0).abs() < 1e-3);
    }

    #[test]
    fn origin_inside_sphere_hits_immediately() {
        let scene = SphereScene::from_spheres([(Vec3::ZERO, 50.0)]);
        let hit = scene.raycast(Vec3::ZERO, Vec3::Z, 100.0).unwrap();
        assert_eq!(hit.distance, 0.0);
    }
}

// ── Avoidance search ──────────────────────────────────────────────────────────

#[cfg(test)]
mod avoid_tests {
    use super::*;

    #[test]
    fn quality_off_is_silent() {
        let scene = SphereScene::from_spheres([(Vec3::Z * 30.0, 20.0)]);
        let cfg = AvoidanceConfig { quality: SweepQuality::Off, ..AvoidanceConfig::default() };
        let out = run(&cruising(), Some(Vec3::Z * 500.0), &scene, &cfg);
        assert_eq!(out, BehaviourOutput::NONE);
    }

    #[test]
    fn clear_line_to_target_is_silent() {
        // Straight line to the last target unobstructed ⇒ zero output,
        // deferring to other behaviors.
        let out = run(
            &cruising(),
            Some(Vec3::Z * 500.0),
            &SphereScene::empty(),
            &AvoidanceConfig::default(),
        );
        assert_eq!(out, BehaviourOutput::NONE);
    }

    #[test]
    fn no_target_and_clear_ahead_is_silent() {
        let out = run(&cruising(), None, &SphereScene::empty(), &AvoidanceConfig::default());
        assert_eq!(out, BehaviourOutput::NONE);
    }

    #[test]
    fn blocked_ahead_deflects_at_the_smallest_clear_angle() {
        // 20 m sphere dead ahead at 100 m.  The 10° ring still clips the
        // inflated sphere; 30° is the first clear tier.
        let scene = SphereScene::from_spheres([(Vec3::Z * 100.0, 20.0)]);
        let out = run(&cruising(), Some(Vec3::Z * 500.0), &scene, &AvoidanceConfig::default());

        assert!(out.has_opinion());
        assert!(is_unit_or_zero(out.heading));
        let deflection = out.heading.angle_between(Vec3::Z);
        assert!(
            (deflection - 30f32.to_radians()).abs() < 2f32.to_radians(),
            "expected ~30° deflection, got {}°",
            deflection.to_degrees()
        );
        assert!(out.velocity.length() <= perf().max_speed);
    }

    #[test]
    fn search_prefers_the_side_nearest_the_target() {
        let scene = SphereScene::from_spheres([(Vec3::Z * 100.0, 20.0)]);
        // Target off to the right: the chosen deflection should go right too.
        let out = run(
            &cruising(),
            Some(Vec3::new(300.0, 0.0, 500.0)),
            &scene,
            &AvoidanceConfig::default(),
        );
        assert!(out.has_opinion());
        assert!(out.heading.x > 0.0, "deflection {} should favor +X", out.heading);
    }

    #[test]
    fn grounded_search_stays_in_the_horizontal_plane() {
        let scene = SphereScene::from_spheres([(Vec3::Z * 100.0, 20.0)]);
        let out = avoid(
            &cruising(),
            &perf(),
            true,
            SHIP_RADIUS,
            Some(Vec3::Z * 500.0),
            &scene,
            &AvoidanceConfig::default(),
        );
        assert!(out.has_opinion());
        assert!(out.heading.y.abs() < 1e-4, "grounded deflection must not pitch: {}", out.heading);
    }

    #[test]
    fn fully_enclosed_ship_reverses() {
        // The ship sits inside a giant sphere: every probe hits at t = 0.
        let scene = SphereScene::from_spheres([(Vec3::ZERO, 200.0)]);
        let out = run(&cruising(), Some(Vec3::Z * 500.0), &scene, &AvoidanceConfig::default());
        assert!((out.heading + Vec3::Z).length() < 1e-4, "expected reverse, got {}", out.heading);
        let cfg = AvoidanceConfig::default();
        assert!(
            (out.velocity.length() - perf().max_speed * cfg.reverse_speed_frac).abs() < 1e-3
        );
    }

    #[test]
    fn moving_body_off_collision_course_does_not_block() {
        /// A stub source reporting a body that matches our velocity exactly —
        /// zero relative motion, never on a collision course.
        struct PacingBody;

        impl SweepSource for PacingBody {
            fn raycast(&self, origin: Vec3, dir: Vec3, _max: f32) -> Option<SweepHit> {
                Some(SweepHit {
                    distance: 40.0,
                    point: origin + dir * 40.0,
                    normal: -dir,
                    body_velocity: Vec3::Z * 50.0, // same as the cruising ship
                    is_static: false,
                })
            }

            fn sphere_cast(&self, origin: Vec3, _radius: f32, dir: Vec3, max: f32) -> Option<SweepHit> {
                self.raycast(origin, dir, max)
            }
        }

        let out = avoid(
            &cruising(),
            &perf(),
            false,
            SHIP_RADIUS,
            None,
            &PacingBody,
            &AvoidanceConfig::default(),
        );
        assert_eq!(out, BehaviourOutput::NONE);
    }
}
