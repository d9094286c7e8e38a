//! View models for the public display widgets.
//!
//! The backend payloads use French field names; the card types hold the
//! exact strings the display renders.

use chrono::Timelike;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// 24-hour `HH:MM`.
pub fn clock_text(time: &impl Timelike) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Body of `GET /api/meteo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub ville: String,
    /// The backend sends a number; the fallback is a string.
    #[serde(deserialize_with = "temperature_text")]
    pub temperature: String,
    pub description: String,
    pub icone: String,
}

fn temperature_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::String(s) => Ok(s),
        other => Err(serde::de::Error::custom(format!(
            "temperature must be a number or a string, got {other}"
        ))),
    }
}

impl WeatherReport {
    /// Shown whenever geolocation or the weather request fails.
    pub fn fallback() -> Self {
        Self {
            ville: "Paris".to_string(),
            temperature: "23".to_string(),
            description: "Données indisponibles".to_string(),
            icone: "fa-cloud".to_string(),
        }
    }
}

/// Rendered weather widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub icon_class: String,
    pub is_fallback: bool,
}

impl WeatherCard {
    pub fn render(report: &WeatherReport, is_fallback: bool) -> Self {
        Self {
            location: report.ville.clone(),
            temperature: format!("{}°C", report.temperature),
            description: report.description.clone(),
            icon_class: format!("fas {} text-2xl mr-4 text-blue-300", report.icone),
            is_fallback,
        }
    }
}

// ---------------------------------------------------------------------------
// Music
// ---------------------------------------------------------------------------

/// Cover used when the track has none.
pub const DEFAULT_COVER: &str = "musique.jpg";

/// Prefix for covers served by the backend itself.
pub const LOCAL_MEDIA_PREFIX: &str = "/static/media/";

/// Body of `GET /api/musique/now-playing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    #[serde(default)]
    pub titre: String,
    #[serde(default)]
    pub artiste: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
}

/// Rendered music widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicCard {
    pub title: String,
    pub artist: String,
    pub cover_src: String,
    /// `None` hides the audio preview element.
    pub preview_src: Option<String>,
}

impl MusicCard {
    pub fn render(track: &NowPlaying) -> Self {
        let cover_src = match track.cover.as_deref() {
            Some(cover) if cover.starts_with("http") => cover.to_string(),
            Some(cover) if !cover.is_empty() => format!("{LOCAL_MEDIA_PREFIX}{cover}"),
            _ => format!("{LOCAL_MEDIA_PREFIX}{DEFAULT_COVER}"),
        };
        let preview_src = track.preview.clone().filter(|p| !p.is_empty());

        Self {
            title: track.titre.clone(),
            artist: track.artiste.clone(),
            cover_src,
            preview_src,
        }
    }
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// Looping slide index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    slide_count: usize,
    current: usize,
}

impl Carousel {
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Step to the next slide, wrapping to the first. Returns the new index,
    /// or `None` when there is nothing to rotate.
    pub fn advance(&mut self) -> Option<usize> {
        if self.slide_count < 2 {
            return None;
        }
        self.current = (self.current + 1) % self.slide_count;
        Some(self.current)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
