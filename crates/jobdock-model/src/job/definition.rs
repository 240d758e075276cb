use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Env, TimeoutSecs};

/// Fully resolved definition of a job, executed as one container per run.
///
/// Produced by the configuration resolver: environment placeholders are
/// already substituted and the timeout is validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDefinition {
    /// Container image (e.g. `"alpine:3"`, `"ghcr.io/acme/report:1.2"`).
    pub image: String,
    /// Override for the container entrypoint.
    ///
    /// `None` keeps the image's own entrypoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Environment for the container, in declaration order.
    #[serde(default, skip_serializing_if = "Env::is_empty")]
    pub env: Env,
    /// Execution budget; `None` means no timeout is enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<TimeoutSecs>,
}

impl JobDefinition {
    /// Create a job running `image` with no overrides.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            command: None,
            env: Env::new(),
            timeout_seconds: None,
        }
    }

    /// Timeout as a [`Duration`], if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(|t| t.as_duration())
    }
}
