//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `agent_states.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    BooleanBuilder, Float32Builder, Float64Builder, UInt16Builder, UInt32Builder, UInt64Builder,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentStateRow, OutputResult, TickSummaryRow};

fn state_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("agent_id",  DataType::UInt32,  false),
        Field::new("tick",      DataType::UInt64,  false),
        Field::new("x",         DataType::Float32, false),
        Field::new("y",         DataType::Float32, false),
        Field::new("z",         DataType::Float32, false),
        Field::new("speed",     DataType::Float32, false),
        Field::new("state_id",  DataType::UInt16,  false),
        Field::new("stage",     DataType::UInt32,  false),
        Field::new("completed", DataType::Boolean, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",          DataType::UInt64,  false),
        Field::new("sim_time_secs", DataType::Float64, false),
        Field::new("active_agents", DataType::UInt64,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes telemetry to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    states:       Option<ArrowWriter<File>>,
    summaries:    Option<ArrowWriter<File>>,
    state_schema: Arc<Schema>,
    summ_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let state_schema = state_schema();
        let summ_schema = summary_schema();

        let state_file = File::create(dir.join("agent_states.parquet"))?;
        let states = ArrowWriter::try_new(
            state_file,
            Arc::clone(&state_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("tick_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            states: Some(states),
            summaries: Some(summaries),
            state_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_states(&mut self, rows: &[AgentStateRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.states.as_mut() else {
            return Ok(());
        };

        let mut agent_ids = UInt32Builder::new();
        let mut ticks     = UInt64Builder::new();
        let mut xs        = Float32Builder::new();
        let mut ys        = Float32Builder::new();
        let mut zs        = Float32Builder::new();
        let mut speeds    = Float32Builder::new();
        let mut state_ids = UInt16Builder::new();
        let mut stages    = UInt32Builder::new();
        let mut completes = BooleanBuilder::new();

        for row in rows {
            agent_ids.append_value(row.agent_id);
            ticks.append_value(row.tick);
            xs.append_value(row.x);
            ys.append_value(row.y);
            zs.append_value(row.z);
            speeds.append_value(row.speed);
            state_ids.append_value(row.state_id);
            stages.append_value(row.stage);
            completes.append_value(row.completed);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.state_schema),
            vec![
                Arc::new(agent_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(zs.finish()),
                Arc::new(speeds.finish()),
                Arc::new(state_ids.finish()),
                Arc::new(stages.finish()),
                Arc::new(completes.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks  = UInt64Builder::new();
        let mut times  = Float64Builder::new();
        let mut active = UInt64Builder::new();

        ticks.append_value(row.tick);
        times.append_value(row.sim_time_secs);
        active.append_value(row.active_agents);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(active.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.states.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
