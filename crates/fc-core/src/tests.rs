//! Unit tests for fc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, StateId, WaypointId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(StateId(100) > StateId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(StateId::INVALID.0, u16::MAX);
        assert_eq!(WaypointId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.elapsed_secs(), 0.0);
        clock.advance();
        clock.advance();
        assert!((clock.elapsed_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_for_duration_rounds_up() {
        let clock = SimClock::new(1.0 / 60.0);
        assert_eq!(clock.ticks_for_secs(1.0), 60);
        assert_eq!(clock.ticks_for_secs(0.001), 1);
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig {
            total_ticks: 18_000,
            ..SimConfig::default()
        };
        assert_eq!(cfg.end_tick(), Tick(18_000));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f32..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod math {
    use glam::Vec3;

    use crate::math::*;

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(normalize_or_zero(Vec3::ZERO), Vec3::ZERO);
        assert!(is_unit_or_zero(Vec3::ZERO));
        assert!(is_unit_or_zero(Vec3::new(3.0, 4.0, 0.0).normalize()));
        assert!(!is_unit_or_zero(Vec3::new(3.0, 4.0, 0.0)));
    }

    #[test]
    fn basis_is_orthonormal() {
        for fwd in [Vec3::Z, Vec3::X, Vec3::Y, Vec3::new(0.6, 0.48, 0.64)] {
            let f = fwd.normalize();
            let (right, up) = orthonormal_basis(f);
            assert!((right.length() - 1.0).abs() < 1e-4);
            assert!((up.length() - 1.0).abs() < 1e-4);
            assert!(right.dot(f).abs() < 1e-4);
            assert!(up.dot(f).abs() < 1e-4);
            assert!(right.dot(up).abs() < 1e-4);
        }
    }

    #[test]
    fn look_rotation_orients_the_frame() {
        let q = look_rotation(Vec3::X, Vec3::Y);
        assert!((q * Vec3::Z - Vec3::X).length() < 1e-4, "forward maps onto +X");
        assert!((q * Vec3::Y - Vec3::Y).length() < 1e-4, "up stays +Y");
        // Degenerate up (parallel to forward) still yields a valid rotation.
        let q = look_rotation(Vec3::Y, Vec3::Y);
        assert!(((q * Vec3::Z) - Vec3::Y).length() < 1e-4);
        assert!((q.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn constant_radius_cap() {
        // v = sqrt(a·r): a = 4, r = 100 → 20 m/s.
        let v = max_speed_on_constant_radius_curve(4.0, 100.0);
        assert!((v - 20.0).abs() < 1e-4);
        assert_eq!(max_speed_on_constant_radius_curve(4.0, f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn changing_radius_never_exceeds_constant_cap() {
        let constant = max_speed_on_constant_radius_curve(4.0, 50.0);
        let changing = max_speed_on_changing_radius_curve(4.0, 0.5, 100.0, 50.0, 30.0);
        assert!(changing <= constant + 1e-4);
    }

    #[test]
    fn braking_zero_target_zero_distance_is_zero() {
        // With nonzero deceleration capacity, a standstill target at zero
        // distance admits zero speed.
        for dir in [Vec3::Z, Vec3::X, Vec3::new(1.0, 1.0, 1.0)] {
            let decel = directional_deceleration(dir, 5.0, 5.0, 10.0);
            assert_eq!(max_speed_from_braking_distance(0.0, 0.0, decel, 0.0), 0.0);
            assert_eq!(max_speed_from_braking_distance(0.0, 0.0, decel, 0.02), 0.0);
        }
    }

    #[test]
    fn braking_formulas_are_mutual_inverses_no_drag() {
        for d in [0.0f32, 1.0, 10.0, 250.0, 4000.0] {
            let v = max_speed_from_braking_distance(5.0, d, 8.0, 0.0);
            let back = braking_distance(v, 5.0, 8.0, 0.0);
            assert!((back - d).abs() < d.max(1.0) * 1e-3, "d={d} v={v} back={back}");
        }
    }

    #[test]
    fn braking_formulas_are_mutual_inverses_with_drag() {
        for d in [0.0f32, 1.0, 10.0, 250.0] {
            let v = max_speed_from_braking_distance(5.0, d, 8.0, 0.01);
            let back = braking_distance(v, 5.0, 8.0, 0.01);
            assert!((back - d).abs() < d.max(1.0) * 1e-3, "d={d} v={v} back={back}");
        }
    }

    #[test]
    fn no_capacity_means_infinite_braking_distance() {
        assert_eq!(braking_distance(10.0, 0.0, 0.0, 0.0), f32::INFINITY);
        // And the admissible speed collapses to the target speed.
        assert_eq!(max_speed_from_braking_distance(3.0, 100.0, 0.0, 0.0), 3.0);
    }

    #[test]
    fn directional_deceleration_blends_axes() {
        // Pure forward travel uses only the Z capacity.
        assert!((directional_deceleration(Vec3::Z, 2.0, 3.0, 7.0) - 7.0).abs() < 1e-5);
        // Zero direction falls back to Z.
        assert!((directional_deceleration(Vec3::ZERO, 2.0, 3.0, 7.0) - 7.0).abs() < 1e-5);
        // A diagonal mixes capacities.
        let d = directional_deceleration(Vec3::new(1.0, 0.0, 1.0), 2.0, 3.0, 7.0);
        assert!(d > 2.0 && d < 7.0);
    }

    #[test]
    fn turn_radius_degenerate_angle_is_infinite() {
        assert_eq!(turn_radius_from_chord(100.0, 0.0), f32::INFINITY);
        let r = turn_radius_from_chord(100.0, std::f32::consts::PI);
        assert!((r - 50.0).abs() < 1e-3); // half-circle: chord = diameter
    }
}

#[cfg(test)]
mod kinematics {
    use glam::{Quat, Vec3};

    use crate::ShipKinematics;

    #[test]
    fn identity_frame_axes() {
        let k = ShipKinematics::at_rest(Vec3::ZERO);
        assert!((k.forward() - Vec3::Z).length() < 1e-6);
        assert!((k.up() - Vec3::Y).length() < 1e-6);
        assert!((k.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn frame_is_right_handed() {
        let k = ShipKinematics {
            rotation: Quat::from_rotation_y(0.7),
            ..ShipKinematics::default()
        };
        let cross = k.up().cross(k.forward());
        assert!((cross - k.right()).length() < 1e-5);
    }

    #[test]
    fn world_local_roundtrip() {
        let k = ShipKinematics {
            rotation: Quat::from_euler(glam::EulerRot::YXZ, 0.5, -0.3, 0.2),
            ..ShipKinematics::default()
        };
        let v = Vec3::new(1.0, -2.0, 3.0);
        let round = k.local_to_world(k.world_to_local(v));
        assert!((round - v).length() < 1e-5);
    }

    #[test]
    fn local_velocity_of_forward_motion() {
        let k = ShipKinematics {
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            velocity: Vec3::X * 10.0, // moving along world +X
            ..ShipKinematics::default()
        };
        // After a +90° yaw the ship's forward is +X, so local velocity is +Z.
        let local = k.local_velocity();
        assert!((local - Vec3::Z * 10.0).length() < 1e-4);
    }
}

#[cfg(test)]
mod performance {
    use glam::Vec3;

    use crate::{ShipConfig, ShipPerformance, ThrusterConfig, WeaponKind, WeaponMount};

    fn armed_config() -> ShipConfig {
        ShipConfig {
            weapons: vec![
                WeaponMount {
                    kind: WeaponKind::Fixed,
                    projectile_speed: 800.0,
                    projectile_lifetime_secs: 3.0,
                    primary: true,
                },
                WeaponMount {
                    kind: WeaponKind::Turret,
                    projectile_speed: 400.0,
                    projectile_lifetime_secs: 5.0,
                    primary: false,
                },
            ],
            ..ShipConfig::default()
        }
    }

    #[test]
    fn estimate_uses_slowest_projectile() {
        let perf = ShipPerformance::estimate(&armed_config());
        assert_eq!(perf.min_projectile_speed, 400.0);
        assert_eq!(perf.min_projectile_lifetime, 3.0);
    }

    #[test]
    fn unarmed_ship_has_zero_projectile_stats() {
        let perf = ShipPerformance::estimate(&ShipConfig::default());
        assert_eq!(perf.min_projectile_speed, 0.0);
        assert_eq!(perf.min_projectile_lifetime, 0.0);
    }

    #[test]
    fn degenerate_mass_degrades_to_default() {
        let cfg = ShipConfig { mass_kg: 0.0, ..ShipConfig::default() };
        let perf = ShipPerformance::estimate(&cfg);
        assert_eq!(perf.max_speed, ShipPerformance::conservative_default().max_speed);
    }

    #[test]
    fn zero_thrust_degrades_to_default() {
        let cfg = ShipConfig {
            thrusters: ThrusterConfig {
                forward_n: 0.0,
                reverse_n: 0.0,
                lateral_n: 0.0,
                vertical_n: 0.0,
                ..ThrusterConfig::default()
            },
            ..ShipConfig::default()
        };
        let perf = ShipPerformance::estimate(&cfg);
        assert_eq!(perf.max_turn_accel_flight, 1.0);
    }

    #[test]
    fn ground_turn_accel_is_reduced() {
        let perf = ShipPerformance::estimate(&ShipConfig::default());
        assert!(perf.turn_accel(true) < perf.turn_accel(false));
    }

    #[test]
    fn braking_wrappers_are_direction_weighted() {
        let perf = ShipPerformance::estimate(&ShipConfig::default());
        // Forward braking uses reverse thrust; lateral braking uses lateral.
        let fwd = perf.braking_deceleration(Vec3::Z);
        let lat = perf.braking_deceleration(Vec3::X);
        assert!(fwd > lat);
        // Inverse property holds through the wrappers too.
        let v = perf.max_speed_from_braking_distance(0.0, 500.0, Vec3::Z);
        let d = perf.braking_distance(v, 0.0, Vec3::Z);
        assert!((d - 500.0).abs() < 1.0);
    }
}
