//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use fc_agent::ShipAiAgent;
use fc_core::{ShipKinematics, SimConfig, Tick};
use fc_sim::SimObserver;

use crate::row::{AgentStateRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes agent states and tick summaries to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    tick_duration_secs: f32,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for sim-time
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_secs: config.tick_duration_secs,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn sim_time(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.tick_duration_secs as f64
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, active: usize) {
        let row = TickSummaryRow {
            tick:          tick.0,
            sim_time_secs: self.sim_time(tick),
            active_agents: active as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, kinematics: &[ShipKinematics], agents: &[ShipAiAgent]) {
        let rows: Vec<AgentStateRow> = agents
            .iter()
            .zip(kinematics)
            .map(|(agent, kin)| AgentStateRow {
                agent_id:  agent.id().0,
                tick:      tick.0,
                x:         kin.position.x,
                y:         kin.position.y,
                z:         kin.position.z,
                speed:     kin.speed(),
                state_id:  agent.state().0,
                stage:     agent.current_state_stage(),
                completed: agent.has_completed_state_action(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_states(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
