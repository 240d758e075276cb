pub mod config;
pub mod env;
pub mod error;

pub use config::{ConfigCell, configuration};
pub use env::{EnvLookup, ProcessEnv};
pub use error::{ConfigError, ConfigResult};

pub mod prelude {
    pub use crate::config::{ConfigCell, configuration, load_configuration};
    pub use crate::env::{EnvLookup, ProcessEnv};
    pub use crate::error::ConfigError;
}
