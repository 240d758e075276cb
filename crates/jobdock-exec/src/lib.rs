mod error;
pub use error::ExecError;

pub mod logs;
pub use logs::{LogSink, LogStreamHandle, TracingSink, spawn_log_stream, stream_container_logs};

#[cfg(feature = "docker")]
pub mod docker;
