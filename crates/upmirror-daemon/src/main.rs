//! Upmirror Daemon - background directory mirroring service
//!
//! This binary runs as a long-lived service and handles:
//! - Periodic one-way mirroring of a local directory into an Upyun bucket
//! - First-run bootstrapping of the configuration file
//! - Graceful shutdown on SIGTERM/SIGINT
//!
//! # Architecture
//!
//! Startup wires the validated configuration into a [`UpyunStore`], a
//! [`SyncCycle`] and a [`Scheduler`], then parks in the scheduler loop. The
//! loop is controlled by a `CancellationToken` that is triggered on receipt
//! of SIGTERM or SIGINT.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use upmirror_core::config::Config;
use upmirror_sync::{Scheduler, SyncCycle};
use upmirror_upyun::{RestClient, UpyunStore};

/// Mirrors a local directory's top-level files into an Upyun bucket
#[derive(Debug, Parser)]
#[command(name = "upmirrord", version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);

    // First run: write a template for the operator to fill in and exit.
    // Logging is not up yet, so talk to the operator via stderr.
    if !config_path.exists() {
        Config::write_default(&config_path)
            .with_context(|| format!("writing default config to {}", config_path.display()))?;
        eprintln!(
            "No configuration found; wrote a template to {}.\n\
             Edit it and start upmirrord again.",
            config_path.display()
        );
        return Ok(());
    }

    let config = Config::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    init_tracing(&config.logging.level);
    info!(config_path = %config_path.display(), "Loaded configuration");

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!(field = %e.field, "{}", e.message);
        }
        anyhow::bail!("configuration invalid ({} error(s)), refusing to start", errors.len());
    }

    info!(
        source = %config.sync.source_directory.display(),
        destination = %config.sync.destination_path,
        operator = %config.upyun.operator,
        password = %"*".repeat(config.upyun.password.len()),
        check_interval_secs = config.sync.check_interval,
        "Mirror configured"
    );

    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal(signal_token).await;
    });

    let client = RestClient::new(
        config.upyun.bucket.clone(),
        config.upyun.operator.clone(),
        config.upyun.password.clone(),
    );
    info!(bucket = client.bucket(), "Upyun client ready");
    let store = UpyunStore::new(client);
    let target = config.sync_target()?;
    let interval = Duration::from_secs(target.check_interval);
    let cycle = SyncCycle::new(store, target);

    let mut scheduler = Scheduler::new(cycle, interval, shutdown_token);
    scheduler.run().await;

    info!("upmirrord shut down gracefully");
    Ok(())
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// whole process.
fn init_tracing(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

/// Waits for SIGINT or SIGTERM and trips the shutdown token
///
/// The scheduler reacts by finishing any in-flight cycle and then exiting
/// its wait, so a mid-upload signal never truncates a file.
async fn shutdown_signal(token: CancellationToken) {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("SIGINT handler installation failed");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation failed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("SIGINT received, stopping the mirror"),
        _ = terminate => info!("SIGTERM received, stopping the mirror"),
    }

    token.cancel();
}
