//! patrol — smallest end-to-end demo for the rust_fc flight-control AI.
//!
//! Three ships fly a closed 4 km patrol circuit (loaded from an embedded
//! waypoint CSV) through a field of static sphere obstacles, writing CSV
//! telemetry to `output/patrol/`.

mod scene;

use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use fc_core::{AgentId, ShipConfig, ShipKinematics, SimConfig, Vec3};
use fc_output::{CsvWriter, SimOutputObserver};
use fc_path::load_path_reader;
use fc_sim::{PointMassIntegrator, SimBuilder};
use fc_state::StateRegistry;

use scene::build_scene;

// ── Constants ─────────────────────────────────────────────────────────────────

const SHIP_COUNT:            usize = 3;
const SEED:                  u64   = 42;
const TICK_DURATION_SECS:    f32   = 1.0 / 60.0;
const SIM_SECONDS:           u64   = 120;
const OUTPUT_INTERVAL_TICKS: u64   = 60; // one telemetry row per simulated second

// ── Patrol circuit ────────────────────────────────────────────────────────────

// A rounded 1 km × 1 km square at 200 m altitude, closed.
const CIRCUIT_CSV: &str = "\
name,x,y,z,in_x,in_y,in_z,out_x,out_y,out_z,closed\n\
patrol,0,200,0,,,,,,,1\n\
patrol,1000,200,0,,,,,,,1\n\
patrol,1000,200,1000,,,,,,,1\n\
patrol,0,200,1000,,,,,,,1\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== patrol — rust_fc flight-control AI ===");
    println!("Ships: {SHIP_COUNT}  |  Duration: {SIM_SECONDS}s  |  Seed: {SEED}");
    println!();

    // 1. Load the patrol circuit from the embedded CSV.
    let paths = load_path_reader(Cursor::new(CIRCUIT_CSV))?;
    let circuit = Arc::new(paths.into_iter().next().expect("embedded circuit present"));
    println!(
        "Circuit '{}': {} waypoints, {:.0} m",
        circuit.name,
        circuit.waypoints.len(),
        circuit.total_length()
    );

    // 2. Obstacle field.
    let scene = build_scene();
    println!("Obstacles: {} spheres", scene.len());

    // 3. Sim config and fleet.
    let config = SimConfig {
        tick_duration_secs:    TICK_DURATION_SECS,
        total_ticks:           SIM_SECONDS * 60,
        seed:                  SEED,
        num_threads:           None,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
    };

    let registry = Arc::new(StateRegistry::with_builtins());
    let mut builder = SimBuilder::new(config.clone(), registry, scene, PointMassIntegrator);
    for i in 0..SHIP_COUNT {
        // Stagger the ships along the first leg.
        let start = Vec3::new(i as f32 * 150.0, 200.0, -100.0);
        builder = builder.ship(ShipConfig::default(), ShipKinematics::at_rest(start));
    }
    let mut sim = builder.build()?;

    // 4. Everyone flies the same circuit.
    for i in 0..SHIP_COUNT {
        let id = AgentId(i as u32);
        sim.agent_mut(id).set_state(StateRegistry::MOVE_TO);
        sim.agent_mut(id).assign_target_path(Arc::clone(&circuit));
    }

    // 5. Run with CSV telemetry.
    std::fs::create_dir_all("output/patrol")?;
    let writer = CsvWriter::new(std::path::Path::new("output/patrol"))?;
    let mut observer = SimOutputObserver::new(writer, &config);

    let started = Instant::now();
    sim.run(&mut observer)?;
    if let Some(err) = observer.take_error() {
        log::warn!("telemetry incomplete: {err}");
    }

    // 6. Summary.
    println!();
    println!("Done in {:.2?} wall-clock.", started.elapsed());
    for i in 0..SHIP_COUNT {
        let id = AgentId(i as u32);
        let kin = sim.kinematics_of(id);
        println!(
            "  ship {i}: pos ({:7.1}, {:5.1}, {:7.1})  speed {:5.1} m/s  segment {}",
            kin.position.x,
            kin.position.y,
            kin.position.z,
            kin.speed(),
            sim.agent(id).path_progress().segment,
        );
    }
    println!("Telemetry written to output/patrol/");
    Ok(())
}
