//! Jobs configuration: loading, placeholder substitution and timeout validation.
//!
//! Loading is a two-stage pipeline: the document is parsed into a
//! [`jobdock_model::RawConfigDocument`], then [`resolve_document`] produces the
//! final [`Configuration`] without touching the raw input.
#[cfg(test)]
mod captured;

mod loader;
pub use loader::{defaults, load_configuration, parse_document, read_document};

mod placeholder;
pub use placeholder::Placeholder;

mod resolve;
pub use resolve::{
    resolve_document, resolve_env_value, resolve_job, resolve_jobs, resolve_port,
    resolve_timeout_seconds,
};

use std::{path::Path, sync::OnceLock};

use jobdock_model::Configuration;

use crate::env::{EnvLookup, ProcessEnv};

/// Holder for a configuration that is built at most once.
///
/// The first [`ConfigCell::get_or_load`] runs the full load; concurrent first
/// callers block until it finishes and every caller receives the same instance.
#[derive(Debug, Default)]
pub struct ConfigCell {
    cell: OnceLock<Configuration>,
}

impl ConfigCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the configuration, loading it on first use.
    ///
    /// Arguments are ignored once the configuration exists.
    pub fn get_or_load<E: EnvLookup + ?Sized>(
        &self,
        path: Option<&Path>,
        env: &E,
    ) -> &Configuration {
        self.cell.get_or_init(|| load_configuration(path, env))
    }

    /// The configuration, if it was already loaded.
    pub fn get(&self) -> Option<&Configuration> {
        self.cell.get()
    }
}

static CONFIGURATION: ConfigCell = ConfigCell::new();

/// Process-wide configuration backed by the real environment.
///
/// Call once from `main` with the `--config` path and pass the returned
/// reference to dependents.
pub fn configuration(path: Option<&Path>) -> &'static Configuration {
    CONFIGURATION.get_or_load(path, &ProcessEnv)
}
