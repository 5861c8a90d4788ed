//! Integration tests for fc-output.

use tempfile::TempDir;

use crate::row::{AgentStateRow, TickSummaryRow};
use crate::writer::OutputWriter;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn state_row(agent_id: u32, tick: u64) -> AgentStateRow {
    AgentStateRow {
        agent_id,
        tick,
        x: agent_id as f32 * 10.0,
        y: 0.0,
        z: tick as f32,
        speed: 42.5,
        state_id: 1,
        stage: 0,
        completed: false,
    }
}

fn summary_row(tick: u64) -> TickSummaryRow {
    TickSummaryRow {
        tick,
        sim_time_secs: tick as f64 / 60.0,
        active_agents: 3,
    }
}

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::CsvWriter;

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_states.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_states.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["agent_id", "tick", "x", "y", "z", "speed", "state_id", "stage", "completed"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "sim_time_secs", "active_agents"]);
    }

    #[test]
    fn csv_state_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![state_row(0, 5), state_row(1, 5), state_row(2, 5)];
        w.write_states(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_states.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "0"); // agent_id
        assert_eq!(&read_rows[0][1], "5"); // tick
        assert_eq!(&read_rows[1][0], "1");
        assert_eq!(&read_rows[2][0], "2");
    }

    #[test]
    fn csv_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "7");
        assert_eq!(&rows[0][2], "3");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;
    use std::sync::Arc;

    use fc_avoid::SphereScene;
    use fc_core::{ShipConfig, ShipKinematics, SimConfig, Vec3};
    use fc_sim::{PointMassIntegrator, SimBuilder};
    use fc_state::StateRegistry;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    #[test]
    fn observer_records_a_full_run() {
        let dir = tmp();
        let config = SimConfig {
            tick_duration_secs: 1.0 / 60.0,
            total_ticks: 30,
            seed: 7,
            num_threads: None,
            output_interval_ticks: 10,
        };

        let mut sim = SimBuilder::new(
            config.clone(),
            Arc::new(StateRegistry::with_builtins()),
            SphereScene::empty(),
            PointMassIntegrator,
        )
        .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
        .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::X * 2_000.0))
        .build()
        .unwrap();

        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        // 30 ticks → 30 summaries; snapshots at ticks 0, 10, 20 → 3 × 2 agents.
        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 30);

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_states.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::sqlite::SqliteWriter;

    #[test]
    fn sqlite_round_trip() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_states(&[state_row(0, 1), state_row(1, 1)]).unwrap();
        w.write_tick_summary(&summary_row(1)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("telemetry.db")).unwrap();
        let states: i64 = conn
            .query_row("SELECT COUNT(*) FROM agent_states", [], |r| r.get(0))
            .unwrap();
        let summaries: i64 = conn
            .query_row("SELECT COUNT(*) FROM tick_summaries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(states, 2);
        assert_eq!(summaries, 1);
    }
}

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use super::*;
    use crate::parquet::ParquetWriter;

    #[test]
    fn parquet_files_are_readable_after_finish() {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_states(&[state_row(0, 1), state_row(1, 1), state_row(2, 1)]).unwrap();
        w.write_tick_summary(&summary_row(1)).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("agent_states.parquet")).unwrap();
        let reader = SerializedFileReader::new(file).unwrap();
        assert_eq!(reader.metadata().file_metadata().num_rows(), 3);
    }
}
