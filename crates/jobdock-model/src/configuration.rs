use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_HOST, DEFAULT_PORT, JobDefinition, JobName, ModelError, ModelResult};

/// Process-wide configuration snapshot.
///
/// Built once at startup by the resolver and treated as read-only afterwards;
/// dependents receive it by reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Bind address for the control plane listener.
    pub host: String,
    /// Bind port for the control plane listener.
    pub port: u16,
    /// Jobs keyed by name, exactly as declared in the document.
    pub jobs: BTreeMap<JobName, JobDefinition>,
    /// Path to application default credentials mounted into job containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_default_credentials: Option<String>,
    /// Container network jobs are attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_network: Option<String>,
}

impl Configuration {
    /// Look up a job by name.
    pub fn job(&self, name: &str) -> Option<&JobDefinition> {
        self.jobs.get(name)
    }

    /// Like [`Configuration::job`], but an unknown name is an error.
    pub fn require_job(&self, name: &str) -> ModelResult<&JobDefinition> {
        self.job(name)
            .ok_or_else(|| ModelError::UnknownJob(name.to_string()))
    }

    /// `host:port` string for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jobs: BTreeMap::new(),
            application_default_credentials: None,
            docker_network: None,
        }
    }
}
