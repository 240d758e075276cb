use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("log source for execution '{execution}' failed: {reason}")]
    LogSource { execution: String, reason: String },

    #[error("log stream task for execution '{execution}' aborted: {reason}")]
    TaskAborted { execution: String, reason: String },

    #[cfg(feature = "docker")]
    #[error("container engine error: {0}")]
    Engine(#[from] bollard::errors::Error),
}
