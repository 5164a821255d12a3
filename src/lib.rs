//! Gazeview - Live gaze overlays and heatmaps, made simple.
//!
//! This is the main library crate for the Gazeview client. It consumes a
//! live gaze-coordinate feed, draws a marker overlay, accumulates a
//! heatmap, and records the session for replay and export.

pub mod commands;
pub mod config;
pub mod display;
pub mod processing;
pub mod session;
pub mod stream;

pub use stream::source::{TrackerError, TrackerResult};

use commands::tracking::{CommandOutcome, SharedController, TrackerHandle};
use config::AppConfig;
use display::controller::GazeDisplayController;
use display::heatmap::GridHeatmap;
use display::overlay::PixelOverlay;
use display::video::VideoFeed;
use parking_lot::Mutex as ParkingMutex;
use std::path::PathBuf;
use std::sync::Arc;
use stream::source::{PointSource, SharedHandler};
use stream::websocket::WebSocketSource;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the application
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gazeview=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gazeview v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    tokio::runtime::Runtime::new()?.block_on(run_app(config, None))
}

/// Run the tracker against the configured feed.
///
/// Embedding hosts may hand in a camera preview; a preview that fails to
/// attach aborts the session before anything connects. The stdin command
/// loop is the bundled control surface; the same operations are available
/// to hosts through [`commands`].
pub async fn run_app(
    config: AppConfig,
    preview: Option<Box<dyn VideoFeed>>,
) -> anyhow::Result<()> {
    if let Some(mut feed) = preview {
        display::video::attach_preview(feed.as_mut())?;
    }

    let controller: SharedController = Arc::new(ParkingMutex::new(GazeDisplayController::new(
        Box::new(PixelOverlay::new(config.overlay.width, config.overlay.height)),
        Box::new(GridHeatmap::new(
            config.overlay.width,
            config.overlay.height,
            config.heatmap.cell_size,
        )),
    )));
    let handler: SharedHandler = controller.clone();

    let settings = Arc::new(ParkingMutex::new(config.settings.clone()));
    let state = TrackerHandle::new(controller, settings, config.export_dir.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut source = WebSocketSource::new(config.stream_url.clone(), handler, shutdown_rx);
    let stream_task = tokio::spawn(async move {
        // A dead stream leaves the status indicator on disconnected or
        // errored; there is no reconnection policy.
        if let Err(e) = source.run().await {
            tracing::error!("Gaze stream ended: {}", e);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => match commands::dispatch_line(&state, &line).await {
                        CommandOutcome::Reply(reply) => {
                            if !reply.is_empty() {
                                println!("{}", reply);
                            }
                        }
                        CommandOutcome::Quit => break,
                    },
                    Ok(None) => {
                        // stdin closed; stay up until interrupted
                        tokio::signal::ctrl_c().await?;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("Command input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let _ = shutdown_tx.send(true);
    let _ = stream_task.await;

    tracing::info!("Cleaning up resources before shutdown");
    Ok(())
}
