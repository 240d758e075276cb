use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("unknown job: {0}")]
    UnknownJob(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
