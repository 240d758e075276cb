//! Per-execution forwarding of container output into the process logger.
//!
//! A log stream consumes the engine's demultiplexed chunks, frames them into
//! lines (see [`frame_chunk`]) and hands them to a [`LogSink`].
mod frame;
pub use frame::{LogRecord, frame_chunk, short_execution_id, strip_timestamp_prefix};

mod sink;
pub use sink::{LogSink, TracingSink};

mod stream;
pub use stream::{LogStreamHandle, LogStreamStats, spawn_log_stream, stream_container_logs};
