//! dogfight — two AI ships fight until one is called dead.
//!
//! Both ships enter the Dogfight state targeting each other with degraded
//! targeting accuracy.  Halfway through, the red ship is marked destroyed
//! (combat damage is the host's job, so this demo plays referee) and the
//! blue ship's state machine is expected to report completion.

use std::sync::Arc;

use anyhow::Result;

use fc_avoid::SphereScene;
use fc_core::{
    AgentId, ShipConfig, ShipKinematics, SimConfig, Vec3, WeaponKind, WeaponMount,
};
use fc_sim::{NoopObserver, PointMassIntegrator, SimBuilder};
use fc_state::StateRegistry;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:               u64 = 7;
const TICK_DURATION_SECS: f32 = 1.0 / 60.0;
const ROUND_SECONDS:      u64 = 30;
const PILOT_ACCURACY:     f32 = 0.6;

const BLUE: AgentId = AgentId(0);
const RED:  AgentId = AgentId(1);

fn fighter() -> ShipConfig {
    ShipConfig {
        weapons: vec![WeaponMount {
            kind: WeaponKind::Fixed,
            projectile_speed: 900.0,
            projectile_lifetime_secs: 2.5,
            primary: true,
        }],
        ..ShipConfig::default()
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== dogfight — rust_fc flight-control AI ===");
    println!("Round: 2 × {ROUND_SECONDS}s halves  |  Accuracy: {PILOT_ACCURACY}  |  Seed: {SEED}");
    println!();

    let config = SimConfig {
        tick_duration_secs:    TICK_DURATION_SECS,
        total_ticks:           ROUND_SECONDS * 2 * 60,
        seed:                  SEED,
        num_threads:           None,
        output_interval_ticks: 0,
    };

    // Head-to-head merge: 2 km apart, nose to nose.
    let registry = Arc::new(StateRegistry::with_builtins());
    let mut sim = SimBuilder::new(config, registry, SphereScene::empty(), PointMassIntegrator)
        .ship(fighter(), ShipKinematics::at_rest(Vec3::new(0.0, 0.0, -1000.0)))
        .ship(fighter(), ShipKinematics::at_rest(Vec3::new(50.0, 0.0, 1000.0)))
        .build()?;

    for (me, them) in [(BLUE, RED), (RED, BLUE)] {
        sim.agent_mut(me).set_state(StateRegistry::DOGFIGHT);
        sim.agent_mut(me).set_accuracy(PILOT_ACCURACY);
        sim.set_target(me, Some(them));
    }

    // First half: an honest fight.
    sim.run_ticks(ROUND_SECONDS * 60, &mut NoopObserver)?;
    report(&sim, "half-time");

    // Second half: the referee calls red dead.
    sim.set_destroyed(RED, true);
    sim.run_ticks(ROUND_SECONDS * 60, &mut NoopObserver)?;
    report(&sim, "full-time");

    println!();
    println!(
        "Blue dogfight complete: {}",
        sim.agent(BLUE).has_completed_state_action()
    );
    Ok(())
}

fn report<S: fc_avoid::SweepSource, I: fc_sim::Integrator>(sim: &fc_sim::Sim<S, I>, label: &str) {
    println!("[{label}]");
    for (name, id) in [("blue", BLUE), ("red", RED)] {
        let kin = sim.kinematics_of(id);
        let range = (sim.kinematics_of(BLUE).position - sim.kinematics_of(RED).position).length();
        println!(
            "  {name}: pos ({:7.1}, {:6.1}, {:7.1})  speed {:5.1} m/s  range {:6.1} m",
            kin.position.x,
            kin.position.y,
            kin.position.z,
            kin.speed(),
            range,
        );
    }
}
