use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use jobdock_core::configuration;
use jobdock_exec::{LogStreamHandle, TracingSink, docker::DockerLogSource};
use jobdock_model::Configuration;
use jobdock_observe::{LoggerConfig, init_logger};

/// Job control plane daemon.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the YAML jobs document.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Container whose output is forwarded to the log until shutdown.
    #[arg(long, value_name = "CONTAINER")]
    follow: Option<String>,

    /// Execution name used to tag followed output; defaults to the container.
    #[arg(long, requires = "follow")]
    execution: Option<String>,
}

impl Args {
    fn execution_name(&self) -> Option<&str> {
        let container = self.follow.as_deref()?;
        Some(self.execution.as_deref().unwrap_or(container))
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let logger = LoggerConfig::from_env()?;
    init_logger(&logger)?;

    // 2) configuration, resolved once for the whole process
    let args = Args::parse();
    let cfg = configuration(args.config.as_deref());
    log_summary(cfg);

    // 3) optional container log follow
    let cancel = CancellationToken::new();
    let follower = match (args.follow.as_deref(), args.execution_name()) {
        (Some(container), Some(execution)) => {
            Some(follow_container(container, execution, cancel.clone())?)
        }
        _ => None,
    };

    // 4) run until interrupted
    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    cancel.cancel();

    if let Some(handle) = follower {
        let execution = handle.execution().to_string();
        let stats = handle.join().await?;
        info!(
            execution = %execution,
            chunks = stats.chunks,
            emitted = stats.emitted,
            dropped = stats.dropped,
            "log follow finished"
        );
    }
    Ok(())
}

fn follow_container(
    container: &str,
    execution: &str,
    cancel: CancellationToken,
) -> anyhow::Result<LogStreamHandle> {
    let source = DockerLogSource::connect_local()?;
    info!(container, execution, "following container output");
    Ok(source.spawn_follow(container, Arc::new(TracingSink), execution, cancel))
}

fn log_summary(cfg: &Configuration) {
    info!(
        bind = %cfg.bind_address(),
        network = cfg.docker_network.as_deref().unwrap_or("<default>"),
        jobs = cfg.jobs.len(),
        "configuration ready"
    );

    if cfg.jobs.is_empty() {
        warn!("no jobs configured");
    }
    for (name, job) in &cfg.jobs {
        info!(
            job = %name,
            image = %job.image,
            env_len = job.env.len(),
            timeout = ?job.timeout(),
            "job registered"
        );
    }
}
