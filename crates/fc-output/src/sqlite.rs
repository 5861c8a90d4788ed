//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `telemetry.db` file in the configured output directory
//! with two tables: `agent_states` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentStateRow, OutputResult, TickSummaryRow};

/// Writes telemetry to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `telemetry.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("telemetry.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_states (
                 agent_id  INTEGER NOT NULL,
                 tick      INTEGER NOT NULL,
                 x         REAL    NOT NULL,
                 y         REAL    NOT NULL,
                 z         REAL    NOT NULL,
                 speed     REAL    NOT NULL,
                 state_id  INTEGER NOT NULL,
                 stage     INTEGER NOT NULL,
                 completed INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick          INTEGER PRIMARY KEY,
                 sim_time_secs REAL    NOT NULL,
                 active_agents INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_states(&mut self, rows: &[AgentStateRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_states \
                 (agent_id, tick, x, y, z, speed, state_id, stage, completed) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.tick,
                    row.x as f64,
                    row.y as f64,
                    row.z as f64,
                    row.speed as f64,
                    row.state_id,
                    row.stage,
                    row.completed as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, sim_time_secs, active_agents) \
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.tick, row.sim_time_secs, row.active_agents],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
