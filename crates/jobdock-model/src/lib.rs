mod domain;
pub use domain::{DEFAULT_HOST, DEFAULT_PORT, ENV_DOCKER_NETWORK, ENV_HOST, ENV_PORT};
pub use domain::{Env, EnvVar, JobName, TimeoutSecs};

mod error;
pub use error::{ModelError, ModelResult};

mod job;
pub use job::JobDefinition;

mod document;
pub use document::{RawConfigDocument, RawJobDefinition, RawPort, RawTimeout};

mod configuration;
pub use configuration::Configuration;
