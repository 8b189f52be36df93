//! Tank Arena - round-based match coordinator
//!
//! Runs the match loop headless against a simulated arena:
//! - Round start / play / end cycle until someone reaches the win threshold
//! - Sudden death escalation mid-round
//! - Pause toggling from stdin (`p`, `t`, `s`, `q`)
//! - Scene reload (fresh match) after each game

mod app;
mod config;
mod game;
mod sim;
mod util;

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{spawn_stdin_commands, Host};
use crate::config::{Config, LogFormat};
use crate::util::time::init_host_time;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level, config.log_format);

    init_host_time();

    info!("Starting Tank Arena");
    info!(
        combatants = config.spawn_points.len(),
        rounds_to_win = config.match_settings.rounds_to_win,
        tick_rate = config.tick_rate,
        "Arena configured"
    );

    let host = Host::new(config);

    let (command_tx, command_rx) = mpsc::channel(32);
    spawn_stdin_commands(command_tx);

    tokio::select! {
        report = host.run(command_rx) => {
            let report = report?;
            info!(
                matches = report.matches.len(),
                quit = report.quit,
                report = %serde_json::to_string(&report)?,
                "Host finished"
            );
        }
        _ = shutdown_signal() => {}
    }

    info!("Shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str, format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
