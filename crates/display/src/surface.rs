//! What the display controller renders into.

use teaser_core::widgets::{MusicCard, WeatherCard};

/// The fixed display regions. Calls must not block.
pub trait DisplaySurface: Send + Sync {
    fn set_clock(&self, text: &str);

    fn render_weather(&self, card: &WeatherCard);

    fn render_music(&self, card: &MusicCard);

    /// Number of carousel slides present on the page.
    fn slide_count(&self) -> usize;

    /// Fade to slide `index`.
    fn show_slide(&self, index: usize);
}

/// Logs every render. Used by the `teaser-display` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSurface {
    pub slides: usize,
}

impl DisplaySurface for TracingSurface {
    fn set_clock(&self, text: &str) {
        tracing::trace!(time = text, "Clock");
    }

    fn render_weather(&self, card: &WeatherCard) {
        tracing::info!(
            location = %card.location,
            temperature = %card.temperature,
            description = %card.description,
            icon = %card.icon_class,
            fallback = card.is_fallback,
            "Weather",
        );
    }

    fn render_music(&self, card: &MusicCard) {
        tracing::info!(
            title = %card.title,
            artist = %card.artist,
            cover = %card.cover_src,
            preview = card.preview_src.as_deref().unwrap_or("-"),
            "Now playing",
        );
    }

    fn slide_count(&self) -> usize {
        self.slides
    }

    fn show_slide(&self, index: usize) {
        tracing::debug!(index, "Carousel slide");
    }
}
