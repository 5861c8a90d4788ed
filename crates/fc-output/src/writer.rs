//! The backend-neutral writer trait.

use crate::row::{AgentStateRow, TickSummaryRow};
use crate::OutputResult;

/// A telemetry sink.
///
/// Implementations buffer or stream as they see fit, but must make all data
/// durable in [`finish`][Self::finish] — Parquet in particular cannot be
/// read without its footer.
pub trait OutputWriter {
    /// Append a batch of per-agent state rows (one snapshot interval).
    fn write_states(&mut self, rows: &[AgentStateRow]) -> OutputResult<()>;

    /// Append one per-tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close.  Must be idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
