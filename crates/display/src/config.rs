use std::str::FromStr;
use std::time::Duration;

use crate::locate::Coordinates;

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

pub const DEFAULT_WEATHER_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_MUSIC_INTERVAL_SECS: u64 = 180;
pub const DEFAULT_CAROUSEL_DELAY_MS: u64 = 4000;
pub const DEFAULT_GEO_TIMEOUT_MS: u64 = 1000;

/// The clock period is fixed.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Display configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Backend base URL (default: `http://localhost:8000`).
    pub backend_url: String,
    /// Weather refresh period (default: 1h).
    pub weather_interval: Duration,
    /// Now-playing refresh period (default: 3min).
    pub music_interval: Duration,
    /// Delay between carousel slides (default: 4s).
    pub carousel_delay: Duration,
    /// Slide count for surfaces that cannot report one (default: 0).
    pub carousel_slides: usize,
    /// Upper bound on a geolocation attempt (default: 1s).
    pub geo_timeout: Duration,
    /// Fixed position of the kiosk, if configured.
    pub position: Option<Coordinates>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            weather_interval: Duration::from_secs(DEFAULT_WEATHER_INTERVAL_SECS),
            music_interval: Duration::from_secs(DEFAULT_MUSIC_INTERVAL_SECS),
            carousel_delay: Duration::from_millis(DEFAULT_CAROUSEL_DELAY_MS),
            carousel_slides: 0,
            geo_timeout: Duration::from_millis(DEFAULT_GEO_TIMEOUT_MS),
            position: None,
        }
    }
}

impl DisplaySettings {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `TEASER_BACKEND_URL`           | `http://localhost:8000` |
    /// | `TEASER_WEATHER_INTERVAL_SECS` | `3600`                  |
    /// | `TEASER_MUSIC_INTERVAL_SECS`   | `180`                   |
    /// | `TEASER_CAROUSEL_DELAY_MS`     | `4000`                  |
    /// | `TEASER_CAROUSEL_SLIDES`       | `0`                     |
    /// | `TEASER_GEO_TIMEOUT_MS`        | `1000`                  |
    /// | `TEASER_LAT` / `TEASER_LON`    | unset                   |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("TEASER_BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.into());

        let weather_secs =
            positive(&lookup, "TEASER_WEATHER_INTERVAL_SECS", DEFAULT_WEATHER_INTERVAL_SECS);
        let music_secs = positive(&lookup, "TEASER_MUSIC_INTERVAL_SECS", DEFAULT_MUSIC_INTERVAL_SECS);
        let carousel_ms = positive(&lookup, "TEASER_CAROUSEL_DELAY_MS", DEFAULT_CAROUSEL_DELAY_MS);
        let geo_ms = positive(&lookup, "TEASER_GEO_TIMEOUT_MS", DEFAULT_GEO_TIMEOUT_MS);
        let carousel_slides = parsed(&lookup, "TEASER_CAROUSEL_SLIDES").unwrap_or(0);

        let position = match (
            parsed::<f64>(&lookup, "TEASER_LAT"),
            parsed::<f64>(&lookup, "TEASER_LON"),
        ) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Coordinates { lat, lon })
            }
            _ => None,
        };

        Self {
            backend_url,
            weather_interval: Duration::from_secs(weather_secs),
            music_interval: Duration::from_secs(music_secs),
            carousel_delay: Duration::from_millis(carousel_ms),
            carousel_slides,
            geo_timeout: Duration::from_millis(geo_ms),
            position,
        }
    }
}

/// Parse `name`, warning and returning `None` when set but unparsable.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Invalid value, using default");
            None
        }
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> u64 {
    match parsed::<u64>(lookup, name) {
        Some(0) => {
            tracing::warn!(var = name, default, "Zero interval, using default");
            default
        }
        Some(value) => value,
        None => default,
    }
}
