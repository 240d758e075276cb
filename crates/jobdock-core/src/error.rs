use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config provided, {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid timeoutSeconds for job '{job}': {raw}")]
    InvalidTimeout { job: String, raw: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
