mod config;
mod error;
mod log;
mod object;

pub use config::{ENV_LOG_FORMAT, ENV_LOG_LEVEL, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use object::{LoggerFormat, LoggerLevel, LoggerRfc3339, format_stamp};

/// Install the global `tracing` subscriber described by `cfg`.
///
/// Call once, early in `main`; a second call returns
/// [`LoggerError::AlreadyInitialized`].
///
/// ```no_run
/// use jobdock_observe::{LoggerConfig, init_logger};
///
/// let cfg = LoggerConfig::from_env().expect("valid LOG_LEVEL / LOG_FORMAT");
/// init_logger(&cfg).expect("logger installed once");
/// tracing::info!("logger ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => log::install_text(cfg),
        LoggerFormat::Json => log::install_json(cfg),
        LoggerFormat::Journald => log::install_journald(cfg),
    }
}
