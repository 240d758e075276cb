use tracing::info;

use crate::logs::frame::LogRecord;

/// Destination for execution log lines.
///
/// Implementations must tolerate concurrent calls from several log streams.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord);
}

/// Forwards every line to `tracing` at INFO level.
///
/// The message reads `[<execution>] <text>`; the short execution id is also
/// attached as the `execution` field for structured outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord) {
        info!(
            target: "jobdock::execution",
            execution = %record.execution,
            "{record}"
        );
    }
}
