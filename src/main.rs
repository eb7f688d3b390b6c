// postboard - browse an employee's posts and their comments
//
// Pick an employee, see their posts with author details, expand a post's
// comments in place.
//
// Architecture:
// - api: DataSource trait (HTTP via reqwest, or in-memory demo data) behind
//   a fail-silent DataAccess layer
// - dom: in-memory element tree with DOM-style click/change listeners
// - render: turns records into detached node fragments
// - controller: comment panel toggling and handler bookkeeping
// - view: selection handling; renders off-tree, swaps in under one lock
// - tui (ratatui) / headless: hosts that draw the tree and feed input back

mod api;
mod cli;
mod config;
mod controller;
mod dom;
mod headless;
mod logging;
mod render;
mod tui;
mod view;

use anyhow::{Context, Result};
use api::{DataAccess, DataSource, FixtureSource, RemoteSource};
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use view::ViewOrchestrator;

/// Initialize tracing with conditional output
///
/// TUI mode captures logs into `log_buffer` (keeps them off the alternate
/// screen); headless mode writes to stderr so stdout stays clean for the
/// outline. File logging adds a JSON layer on a rolling appender. The
/// returned guard must live until exit so buffered lines flush.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(config: &Config, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("postboard={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!config.enable_tui)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = if config.logging.file_enabled {
        let logging = &config.logging;
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let file_appender = RollingFileAppender::new(
                    logging.file_rotation.into(),
                    &logging.file_dir,
                    &logging.file_prefix,
                );
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Demo fixture or the configured HTTP service
fn build_source(config: &Config) -> Result<Arc<dyn DataSource>> {
    if config.demo_mode {
        return Ok(Arc::new(FixtureSource::demo()));
    }
    let remote = RemoteSource::new(config.api_url.clone())
        .with_context(|| format!("Failed to create HTTP client for {}", config.api_url))?;
    Ok(Arc::new(remote))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    if cli::handle_cli()? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, &log_buffer);

    let source = build_source(&config)?;
    tracing::info!(
        source = source.name(),
        api_url = %config.api_url,
        version = config::VERSION,
        "Starting postboard"
    );

    let view = ViewOrchestrator::new(DataAccess::new(source), config.default_employee);

    if config.enable_tui {
        let selections = view.initialize().await;
        let worker = tokio::spawn(view.clone().run(selections));

        let result = tui::run_tui(view, log_buffer).await;
        worker.abort();
        result
    } else {
        let outline = headless::run_headless(&view, config.default_employee).await?;
        print!("{}", outline);
        Ok(())
    }
}
