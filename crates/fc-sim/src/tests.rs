//! Unit and integration tests for fc-sim.

use std::sync::Arc;

use fc_avoid::SphereScene;
use fc_core::{AgentId, ShipConfig, ShipKinematics, SimConfig, Tick, Vec3};
use fc_state::StateRegistry;

use crate::builder::SimBuilder;
use crate::integrate::{Integrator, PointMassIntegrator};
use crate::observer::{NoopObserver, SimObserver};
use crate::proximity::ProximityIndex;
use crate::Sim;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sim_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        tick_duration_secs: 1.0 / 60.0,
        total_ticks,
        seed: 42,
        num_threads: None,
        output_interval_ticks: 10,
    }
}

fn registry() -> Arc<StateRegistry> {
    Arc::new(StateRegistry::with_builtins())
}

fn one_ship_sim(total_ticks: u64) -> Sim<SphereScene, PointMassIntegrator> {
    SimBuilder::new(sim_config(total_ticks), registry(), SphereScene::empty(), PointMassIntegrator)
        .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
        .build()
        .expect("valid sim")
}

// ── ProximityIndex ────────────────────────────────────────────────────────────

#[cfg(test)]
mod proximity_tests {
    use super::*;

    #[test]
    fn finds_neighbours_within_radius() {
        let kins = vec![
            ShipKinematics::at_rest(Vec3::ZERO),
            ShipKinematics::at_rest(Vec3::new(100.0, 0.0, 0.0)),
            ShipKinematics::at_rest(Vec3::new(0.0, 0.0, 5_000.0)),
        ];
        let index = ProximityIndex::build(&kins, 600.0);
        let near = index.within(Vec3::ZERO, 600.0, &kins, AgentId(0));
        assert_eq!(near, vec![AgentId(1)]);
    }

    #[test]
    fn excludes_the_probing_agent() {
        let kins = vec![ShipKinematics::at_rest(Vec3::ZERO)];
        let index = ProximityIndex::build(&kins, 600.0);
        assert!(index.within(Vec3::ZERO, 600.0, &kins, AgentId(0)).is_empty());
    }

    #[test]
    fn results_are_sorted_by_id() {
        let kins: Vec<_> = (0..6)
            .map(|i| ShipKinematics::at_rest(Vec3::new(i as f32 * 10.0, 0.0, 0.0)))
            .collect();
        let index = ProximityIndex::build(&kins, 600.0);
        let near = index.within(Vec3::ZERO, 600.0, &kins, AgentId(3));
        assert_eq!(
            near,
            vec![AgentId(0), AgentId(1), AgentId(2), AgentId(4), AgentId(5)]
        );
    }

    #[test]
    fn straddling_cell_boundaries_still_matches() {
        // Two agents 10 m apart on either side of a 600 m cell boundary.
        let kins = vec![
            ShipKinematics::at_rest(Vec3::new(595.0, 0.0, 0.0)),
            ShipKinematics::at_rest(Vec3::new(605.0, 0.0, 0.0)),
        ];
        let index = ProximityIndex::build(&kins, 600.0);
        let near = index.within(kins[0].position, 50.0, &kins, AgentId(0));
        assert_eq!(near, vec![AgentId(1)]);
    }
}

// ── PointMassIntegrator ───────────────────────────────────────────────────────

#[cfg(test)]
mod integrator_tests {
    use super::*;
    use fc_control::ControlInputs;
    use fc_core::ShipPerformance;

    fn step_n(controls: ControlInputs, n: u32) -> ShipKinematics {
        let config = ShipConfig::default();
        let perf = ShipPerformance::estimate(&config);
        let mut kin = ShipKinematics::at_rest(Vec3::ZERO);
        for _ in 0..n {
            PointMassIntegrator.step(&mut kin, &controls, &config, &perf, 1.0 / 60.0);
        }
        kin
    }

    #[test]
    fn throttle_accelerates_along_the_nose() {
        let kin = step_n(ControlInputs { longitudinal: 1.0, ..ControlInputs::NEUTRAL }, 60);
        assert!(kin.velocity.z > 5.0, "velocity {}", kin.velocity);
        assert!(kin.position.z > 0.0);
        assert!(kin.velocity.x.abs() < 1e-4 && kin.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn yaw_input_turns_the_ship() {
        let kin = step_n(ControlInputs { yaw: 1.0, ..ControlInputs::NEUTRAL }, 120);
        let heading = kin.forward();
        assert!(heading.x > 0.1, "expected a right turn, forward = {heading}");
    }

    #[test]
    fn drag_caps_forward_speed() {
        let config = ShipConfig { drag_coefficient_z: 0.01, ..ShipConfig::default() };
        let perf = ShipPerformance::estimate(&config);
        let controls = ControlInputs { longitudinal: 1.0, ..ControlInputs::NEUTRAL };
        let mut kin = ShipKinematics::at_rest(Vec3::ZERO);
        for _ in 0..6000 {
            PointMassIntegrator.step(&mut kin, &controls, &config, &perf, 1.0 / 60.0);
        }
        // Terminal velocity for a = 10 m/s², k = 0.01 /m: sqrt(a/k) ≈ 31.6.
        assert!(kin.velocity.length() < 40.0, "drag should cap speed, got {}", kin.velocity.length());
    }

    #[test]
    fn non_positive_dt_is_a_no_op() {
        let config = ShipConfig::default();
        let perf = fc_core::ShipPerformance::estimate(&config);
        let mut kin = ShipKinematics::at_rest(Vec3::ZERO);
        let before = kin;
        PointMassIntegrator.step(
            &mut kin,
            &ControlInputs { longitudinal: 1.0, ..ControlInputs::NEUTRAL },
            &config,
            &perf,
            0.0,
        );
        assert_eq!(kin, before);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn empty_fleet_is_rejected() {
        let result =
            SimBuilder::new(sim_config(10), registry(), SphereScene::empty(), PointMassIntegrator)
                .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn ships_become_enabled_agents_in_order() {
        let sim = SimBuilder::new(sim_config(10), registry(), SphereScene::empty(), PointMassIntegrator)
            .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
            .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::X * 100.0))
            .build()
            .unwrap();
        assert_eq!(sim.agent_count(), 2);
        assert_eq!(sim.agent(AgentId(0)).id(), AgentId(0));
        assert_eq!(sim.agent(AgentId(1)).id(), AgentId(1));
        assert!(sim.agent(AgentId(0)).is_enabled());
        assert_eq!(sim.kinematics_of(AgentId(1)).position, Vec3::X * 100.0);
    }
}

// ── Sim loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use super::*;

    struct CountingObserver {
        ticks: u64,
        snapshots: u64,
        ended: bool,
        last_active: usize,
    }

    impl CountingObserver {
        fn new() -> Self {
            Self { ticks: 0, snapshots: 0, ended: false, last_active: 0 }
        }
    }

    impl SimObserver for CountingObserver {
        fn on_tick_end(&mut self, _tick: Tick, active: usize) {
            self.ticks += 1;
            self.last_active = active;
        }

        fn on_snapshot(
            &mut self,
            _tick: Tick,
            _kinematics: &[ShipKinematics],
            _agents: &[fc_agent::ShipAiAgent],
        ) {
            self.snapshots += 1;
        }

        fn on_sim_end(&mut self, _final_tick: Tick) {
            self.ended = true;
        }
    }

    #[test]
    fn observer_sees_every_tick_and_interval_snapshots() {
        let mut sim = one_ship_sim(100);
        let mut obs = CountingObserver::new();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.ticks, 100);
        assert_eq!(obs.snapshots, 10, "every 10th tick, ticks 0..100");
        assert!(obs.ended);
        assert_eq!(obs.last_active, 1);
        assert_eq!(sim.clock.current_tick, Tick(100));
    }

    #[test]
    fn move_to_closes_on_the_target() {
        let mut sim = one_ship_sim(600); // 10 simulated seconds
        sim.agent_mut(AgentId(0)).set_state(StateRegistry::MOVE_TO);
        sim.agent_mut(AgentId(0)).assign_target_position(Vec3::new(0.0, 0.0, 3_000.0));
        sim.run(&mut NoopObserver).unwrap();

        let kin = sim.kinematics_of(AgentId(0));
        assert!(kin.position.z > 200.0, "ship should make headway, got {}", kin.position.z);
        assert!(kin.position.x.abs() < 50.0, "no lateral wander expected");
        let max = sim.agent(AgentId(0)).performance().max_speed;
        assert!(kin.speed() <= max * 1.05, "speed {} exceeds envelope {max}", kin.speed());
    }

    #[test]
    fn dogfight_completes_when_the_sim_marks_the_target_destroyed() {
        let mut sim = SimBuilder::new(
            sim_config(10),
            registry(),
            SphereScene::empty(),
            PointMassIntegrator,
        )
        .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
        .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::new(0.0, 0.0, 800.0)))
        .build()
        .unwrap();

        sim.agent_mut(AgentId(0)).set_state(StateRegistry::DOGFIGHT);
        sim.set_target(AgentId(0), Some(AgentId(1)));

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(!sim.agent(AgentId(0)).has_completed_state_action());

        sim.set_destroyed(AgentId(1), true);
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.agent(AgentId(0)).has_completed_state_action());
    }

    #[test]
    fn destroyed_ships_stop_moving() {
        let mut sim = one_ship_sim(60);
        sim.agent_mut(AgentId(0)).set_state(StateRegistry::MOVE_TO);
        sim.agent_mut(AgentId(0)).assign_target_position(Vec3::new(0.0, 0.0, 3_000.0));
        sim.set_destroyed(AgentId(0), true);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.kinematics_of(AgentId(0)).position, Vec3::ZERO);
    }

    #[test]
    fn runs_are_deterministic_for_a_fixed_seed() {
        let run = || {
            let mut sim = SimBuilder::new(
                sim_config(240),
                registry(),
                SphereScene::from_spheres([(Vec3::new(0.0, 0.0, 600.0), 60.0)]),
                PointMassIntegrator,
            )
            .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
            .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::new(300.0, 0.0, 0.0)))
            .build()
            .unwrap();

            for id in [AgentId(0), AgentId(1)] {
                sim.agent_mut(id).set_state(StateRegistry::MOVE_TO);
                sim.agent_mut(id).assign_target_position(Vec3::new(0.0, 0.0, 2_000.0));
                sim.agent_mut(id).set_accuracy(0.5);
            }
            sim.run(&mut NoopObserver).unwrap();
            (
                *sim.kinematics_of(AgentId(0)),
                *sim.kinematics_of(AgentId(1)),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn evade_lists_reach_nearby_agents() {
        let mut sim = SimBuilder::new(
            sim_config(1),
            registry(),
            SphereScene::empty(),
            PointMassIntegrator,
        )
        .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
        .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::new(200.0, 0.0, 0.0)))
        .build()
        .unwrap();

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.agent(AgentId(0)).state_params().ships_to_evade.len(), 1);
    }
}
