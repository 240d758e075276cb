mod var;
pub use var::EnvVar;

mod env;
pub use env::Env;

mod timeout;
pub use timeout::TimeoutSecs;

mod constants;
pub use constants::{DEFAULT_HOST, DEFAULT_PORT, ENV_DOCKER_NETWORK, ENV_HOST, ENV_PORT};

/// Name of a job as declared in the jobs document.
pub type JobName = String;
