//! Well-known defaults and environment variable names.
//!
//! Kept in one place so the loader, the binary and the tests agree on them.

/// Bind address used when `HOST` is not set.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Bind port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8123;

/// Environment variable overriding [`DEFAULT_HOST`].
pub const ENV_HOST: &str = "HOST";

/// Environment variable overriding [`DEFAULT_PORT`].
pub const ENV_PORT: &str = "PORT";

/// Environment variable naming the container network jobs attach to.
pub const ENV_DOCKER_NETWORK: &str = "DOCKER_NETWORK";
