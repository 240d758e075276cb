//! Container engine side of log streaming, backed by `bollard`.
//!
//! The engine client does the stdout/stderr demultiplexing: every
//! `LogOutput` frame, whichever stream it came from, becomes one chunk.
use std::sync::Arc;

use bollard::{Docker, container::LogsOptions};
use futures_util::{StreamExt, stream::BoxStream};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    ExecError,
    logs::{LogSink, LogStreamHandle, spawn_log_stream},
};

/// Demultiplexed output chunks of one container.
pub type ContainerLogStream = BoxStream<'static, Result<Vec<u8>, ExecError>>;

/// Source of container log streams.
#[derive(Debug, Clone)]
pub struct DockerLogSource {
    docker: Docker,
}

impl DockerLogSource {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Connect using the platform defaults (`DOCKER_HOST` or the local socket).
    pub fn connect_local() -> Result<Self, ExecError> {
        Ok(Self::new(Docker::connect_with_local_defaults()?))
    }

    /// Follow stdout and stderr of a running container until it exits.
    pub fn follow(&self, container_id: &str) -> ContainerLogStream {
        debug!(container = container_id, "following container logs");

        self.docker
            .logs(container_id, Some(follow_options()))
            .map(|frame| {
                frame
                    .map(|output| output.into_bytes().to_vec())
                    .map_err(ExecError::from)
            })
            .boxed()
    }

    /// Follow a container and forward its output for `execution_name` on a new task.
    pub fn spawn_follow(
        &self,
        container_id: &str,
        sink: Arc<dyn LogSink>,
        execution_name: impl Into<String>,
        cancel: CancellationToken,
    ) -> LogStreamHandle {
        spawn_log_stream(self.follow(container_id), sink, execution_name, cancel)
    }
}

/// Options for a live log follow: both streams, full backlog, no engine timestamps.
fn follow_options() -> LogsOptions<String> {
    LogsOptions {
        follow: true,
        stdout: true,
        stderr: true,
        timestamps: false,
        tail: "all".to_string(),
        ..Default::default()
    }
}
