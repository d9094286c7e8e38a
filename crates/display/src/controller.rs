//! Display refresh loops.
//!
//! [`DisplayController::run`] spawns one task per widget. Each loop owns
//! its own ticker, so a stalled weather or music request never delays the
//! clock or the carousel.

use std::sync::Arc;

use chrono::{Local, Timelike};
use teaser_client::{ApiError, DisplayBackend};
use teaser_core::widgets::{clock_text, Carousel, MusicCard, WeatherCard, WeatherReport};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::{DisplaySettings, CLOCK_INTERVAL};
use crate::locate::{locate_within, LocateError, Locator};
use crate::surface::DisplaySurface;

#[derive(Debug, thiserror::Error)]
enum WeatherError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives the public display. Cheap to clone.
#[derive(Clone)]
pub struct DisplayController {
    backend: Arc<dyn DisplayBackend>,
    surface: Arc<dyn DisplaySurface>,
    locator: Arc<dyn Locator>,
    settings: DisplaySettings,
}

impl DisplayController {
    pub fn new(
        backend: Arc<dyn DisplayBackend>,
        surface: Arc<dyn DisplaySurface>,
        locator: Arc<dyn Locator>,
        settings: DisplaySettings,
    ) -> Self {
        Self {
            backend,
            surface,
            locator,
            settings,
        }
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    // ---- single refreshes ----

    pub fn render_clock(&self, now: &impl Timelike) {
        self.surface.set_clock(&clock_text(now));
    }

    /// Locate, fetch and render the weather. Any failure renders the
    /// fallback report instead. Returns the rendered card.
    pub async fn refresh_weather(&self) -> WeatherCard {
        let card = match self.fetch_weather().await {
            Ok(report) => WeatherCard::render(&report, false),
            Err(err) => {
                tracing::warn!(error = %err, "Weather unavailable, showing fallback");
                WeatherCard::render(&WeatherReport::fallback(), true)
            }
        };
        self.surface.render_weather(&card);
        card
    }

    async fn fetch_weather(&self) -> Result<WeatherReport, WeatherError> {
        let here = locate_within(self.locator.as_ref(), self.settings.geo_timeout).await?;
        tracing::debug!(lat = here.lat, lon = here.lon, "Position obtained");
        Ok(self.backend.weather(here.lat, here.lon).await?)
    }

    /// Fetch and render the current track. On failure the previous
    /// rendering stays. Returns whether the widget was updated.
    pub async fn refresh_music(&self) -> bool {
        match self.backend.now_playing().await {
            Ok(track) => {
                let card = MusicCard::render(&track);
                tracing::debug!(title = %card.title, artist = %card.artist, "Track updated");
                self.surface.render_music(&card);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch now playing");
                false
            }
        }
    }

    // ---- loops ----

    /// Run every widget loop until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            backend = %self.settings.backend_url,
            weather_interval_secs = self.settings.weather_interval.as_secs(),
            music_interval_secs = self.settings.music_interval.as_secs(),
            "Display controller started",
        );

        let tracker = TaskTracker::new();
        tracker.spawn(self.clone().clock_loop(cancel.child_token()));
        tracker.spawn(self.clone().weather_loop(cancel.child_token()));
        tracker.spawn(self.clone().music_loop(cancel.child_token()));
        tracker.spawn(self.carousel_loop(cancel.child_token()));
        tracker.close();
        tracker.wait().await;

        tracing::info!("Display controller stopped");
    }

    /// Spawn [`run`](Self::run) on the runtime.
    pub fn start(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    async fn clock_loop(self, cancel: CancellationToken) {
        let mut ticker = ticker(Instant::now(), CLOCK_INTERVAL);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => self.render_clock(&Local::now()),
            }
        }
    }

    async fn weather_loop(self, cancel: CancellationToken) {
        let mut ticker = ticker(Instant::now(), self.settings.weather_interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = self.refresh_weather() => {}
                    }
                }
            }
        }
    }

    async fn music_loop(self, cancel: CancellationToken) {
        let mut ticker = ticker(Instant::now(), self.settings.music_interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = self.refresh_music() => {}
                    }
                }
            }
        }
    }

    /// Rotate through the surface's slides, looping. Nothing to do with
    /// fewer than two slides.
    async fn carousel_loop(self, cancel: CancellationToken) {
        let mut carousel = Carousel::new(self.surface.slide_count());
        if carousel.slide_count() < 2 {
            tracing::debug!(slides = carousel.slide_count(), "Carousel idle");
            return;
        }

        let delay = self.settings.carousel_delay;
        let mut ticker = ticker(Instant::now() + delay, delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Some(index) = carousel.advance() {
                        self.surface.show_slide(index);
                    }
                }
            }
        }
    }
}

/// Missed ticks are delayed rather than replayed in a burst.
fn ticker(start: Instant, period: std::time::Duration) -> Interval {
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
