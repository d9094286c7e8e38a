//! `teaser-display` -- headless teaser display.
//!
//! Runs the clock, weather, now-playing and carousel loops against the
//! backend and logs every render. Stops on Ctrl-C.
//!
//! # Environment variables
//!
//! See [`DisplaySettings::from_env`]. `RUST_LOG` controls verbosity
//! (default `teaser_display=info`).

use std::sync::Arc;

use teaser_client::TeaserApi;
use teaser_display::locate::{FixedLocator, NoLocator};
use teaser_display::surface::TracingSurface;
use teaser_display::{DisplayController, DisplaySettings, Locator};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teaser_display=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = DisplaySettings::from_env();

    let locator: Arc<dyn Locator> = match settings.position {
        Some(here) => {
            tracing::info!(lat = here.lat, lon = here.lon, "Using configured position");
            Arc::new(FixedLocator(here))
        }
        None => {
            tracing::info!("No position configured, weather will use the fallback");
            Arc::new(NoLocator)
        }
    };

    let api = Arc::new(TeaserApi::new(settings.backend_url.clone()));
    let surface = Arc::new(TracingSurface {
        slides: settings.carousel_slides,
    });

    let cancel = CancellationToken::new();
    let handle = DisplayController::new(api, surface, locator, settings).start(cancel.clone());

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
    cancel.cancel();

    if let Err(e) = handle.await {
        tracing::error!(error = %e, "Display controller task failed");
    }
}
