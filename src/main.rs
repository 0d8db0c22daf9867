// Roster - terminal friend list for a peer-to-peer chat client
//
// Keeps the list of friends, their presence and status, which one is
// selected, and which conversation window belongs to whom.
//
// Architecture:
// - Roster: fixed-capacity slot list, selection, lifecycle hooks
// - Client: wires the roster to the peer directory and the JSON store
// - Demo network: simulated peers feeding events over an mpsc channel
// - TUI (ratatui): friend list, chat windows, log panel
// - Headless: same event handling, list printed to stdout

mod cli;
mod client;
mod config;
mod demo;
mod directory;
mod events;
mod headless;
mod logging;
mod roster;
mod storage;
mod theme;
mod tui;
mod util;

use anyhow::{Context, Result};
use client::Client;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Peer events buffered between the network task and the UI
const EVENT_CHANNEL_SIZE: usize = 256;

/// Console output for the current mode: ring buffer under the TUI, stdout otherwise
fn console_layer<S>(config: &Config, log_buffer: &LogBuffer) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if config.enable_tui {
        TuiLogLayer::new(log_buffer.clone()).boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    }
}

/// Initialize tracing; the returned guard must live until exit so file logs flush
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("roster={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let logging = &config.logging;
    if !logging.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(config, log_buffer))
            .init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(config, log_buffer))
            .init();
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer uses JSON for structured log parsing
    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer(config, log_buffer))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    if cli::handle_cli()? {
        return Ok(());
    }

    // Write a commented config template on first run
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, &log_buffer);

    // An unreadable friend list stops startup; saving over it would lose it
    let mut client = Client::new(&config);
    client.restore().with_context(|| {
        format!(
            "Could not load friend list {}",
            client.store.path().display()
        )
    })?;

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let network_handle = if config.demo.enabled {
        // Reserve ids above everything restored from disk
        let first_peer_id = client.directory.allocate_id();
        for _ in 1..config.demo.peers {
            client.directory.allocate_id();
        }
        tracing::info!("Running with the demo peer network");
        let demo_config = config.demo.clone();
        Some(tokio::spawn(demo::run_demo(
            event_tx,
            shutdown_rx,
            demo_config,
            first_peer_id,
        )))
    } else {
        tracing::info!("No peer network configured; showing saved friends only");
        drop(event_tx);
        None
    };

    let client = if config.enable_tui {
        tracing::info!("Starting TUI");
        let theme = theme::Theme::by_name(&config.theme);
        tui::run_tui(client, event_rx, log_buffer, theme).await?
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        headless::run(client, event_rx, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    };

    tracing::info!("Shutting down with {} friends", client.roster.len());

    // If the send fails, the network task already stopped
    let _ = shutdown_tx.send(());
    if let Some(handle) = network_handle {
        let _ = handle.await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
