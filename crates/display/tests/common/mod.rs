//! Shared fakes for display controller tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use teaser_client::{ApiError, DisplayBackend};
use teaser_core::widgets::{MusicCard, NowPlaying, WeatherCard, WeatherReport};
use teaser_display::locate::NoLocator;
use teaser_display::{DisplayController, DisplaySettings, DisplaySurface, Locator};

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

pub struct FakeDisplayBackend {
    pub weather_queries: Mutex<Vec<(f64, f64)>>,
    pub music_calls: Mutex<usize>,
    pub weather_fails: AtomicBool,
    pub weather_stalls: AtomicBool,
    pub music_fails: AtomicBool,
    pub track: Mutex<NowPlaying>,
}

impl Default for FakeDisplayBackend {
    fn default() -> Self {
        Self {
            weather_queries: Mutex::new(Vec::new()),
            music_calls: Mutex::new(0),
            weather_fails: AtomicBool::new(false),
            weather_stalls: AtomicBool::new(false),
            music_fails: AtomicBool::new(false),
            track: Mutex::new(NowPlaying {
                titre: "Sunset".into(),
                artiste: "Lagoon".into(),
                cover: Some("https://cdn.example.org/cover.jpg".into()),
                preview: Some("https://cdn.example.org/preview.mp3".into()),
            }),
        }
    }
}

impl FakeDisplayBackend {
    pub fn weather_count(&self) -> usize {
        self.weather_queries.lock().unwrap().len()
    }

    pub fn music_count(&self) -> usize {
        *self.music_calls.lock().unwrap()
    }
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 502,
        body: "Bad Gateway".into(),
    }
}

#[async_trait]
impl DisplayBackend for FakeDisplayBackend {
    async fn weather(&self, lat: f64, lon: f64) -> Result<WeatherReport, ApiError> {
        self.weather_queries.lock().unwrap().push((lat, lon));
        if self.weather_stalls.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.weather_fails.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(WeatherReport {
            ville: "Biarritz".into(),
            temperature: "19".into(),
            description: "ciel dégagé".into(),
            icone: "fa-sun".into(),
        })
    }

    async fn now_playing(&self) -> Result<NowPlaying, ApiError> {
        *self.music_calls.lock().unwrap() += 1;
        if self.music_fails.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.track.lock().unwrap().clone())
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingSurface {
    pub slides: usize,
    pub clock: Mutex<Vec<String>>,
    pub weather: Mutex<Vec<WeatherCard>>,
    pub music: Mutex<Vec<MusicCard>>,
    pub shown_slides: Mutex<Vec<usize>>,
}

impl RecordingSurface {
    pub fn with_slides(slides: usize) -> Self {
        Self {
            slides,
            ..Self::default()
        }
    }

    pub fn clock_count(&self) -> usize {
        self.clock.lock().unwrap().len()
    }

    pub fn weather(&self) -> Vec<WeatherCard> {
        self.weather.lock().unwrap().clone()
    }

    pub fn music(&self) -> Vec<MusicCard> {
        self.music.lock().unwrap().clone()
    }

    pub fn shown_slides(&self) -> Vec<usize> {
        self.shown_slides.lock().unwrap().clone()
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_clock(&self, text: &str) {
        self.clock.lock().unwrap().push(text.to_string());
    }

    fn render_weather(&self, card: &WeatherCard) {
        self.weather.lock().unwrap().push(card.clone());
    }

    fn render_music(&self, card: &MusicCard) {
        self.music.lock().unwrap().push(card.clone());
    }

    fn slide_count(&self) -> usize {
        self.slides
    }

    fn show_slide(&self, index: usize) {
        self.shown_slides.lock().unwrap().push(index);
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub controller: DisplayController,
    pub backend: Arc<FakeDisplayBackend>,
    pub surface: Arc<RecordingSurface>,
}

pub fn harness_with(locator: Arc<dyn Locator>, slides: usize) -> Harness {
    let backend = Arc::new(FakeDisplayBackend::default());
    let surface = Arc::new(RecordingSurface::with_slides(slides));
    let controller = DisplayController::new(
        backend.clone(),
        surface.clone(),
        locator,
        DisplaySettings::default(),
    );
    Harness {
        controller,
        backend,
        surface,
    }
}

pub fn harness() -> Harness {
    harness_with(Arc::new(NoLocator), 0)
}
