//! Process-wide teaser configuration edited through the admin forms.
//!
//! `GET /api/admin/config` returns a flat mapping of keys to scalars.
//! Form edits arrive as `(field name, raw string)` pairs and are parsed per
//! field; an unparsable value is rejected and leaves the config unchanged.
//! Saving nests the same values into weather / tide / system / modules
//! sections.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::zone::{ZoneId, ZoneSaveRequest};

// ---------------------------------------------------------------------------
// GlobalConfig
// ---------------------------------------------------------------------------

/// Flat configuration mapping. Missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub weather_api_key: String,
    pub weather_location: String,
    /// Seconds on the wire; the form shows minutes.
    pub weather_refresh: u32,

    pub tide_api_key: String,
    pub tide_lat: f64,
    pub tide_lon: f64,

    pub carousel_speed: u32,
    pub auto_play_videos: bool,
    /// 0.0 ..= 1.0
    pub video_volume: f64,
    pub auto_cleanup: bool,
    pub cleanup_days: u32,
    #[serde(alias = "debug")]
    pub debug_mode: bool,

    pub selfie_path: String,
    pub selfie_count: u32,
    pub dj_url: String,
    pub music_refresh: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            weather_api_key: String::new(),
            weather_location: "Biarritz,FR".to_string(),
            weather_refresh: 300,
            tide_api_key: String::new(),
            tide_lat: 43.4832,
            tide_lon: -1.5586,
            carousel_speed: 5,
            auto_play_videos: true,
            video_volume: 0.3,
            auto_cleanup: false,
            cleanup_days: 30,
            debug_mode: false,
            selfie_path: "/static/selfies/".to_string(),
            selfie_count: 3,
            dj_url: "http://localhost:8001".to_string(),
            music_refresh: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

/// Every form input bound to a [`GlobalConfig`] key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    WeatherApiKey,
    WeatherLocation,
    WeatherRefresh,
    TideApiKey,
    TideLat,
    TideLon,
    CarouselSpeed,
    AutoPlayVideos,
    VideoVolume,
    AutoCleanup,
    CleanupDays,
    DebugMode,
    SelfiePath,
    SelfieCount,
    DjUrl,
    MusicRefresh,
}

impl ConfigField {
    pub const ALL: [ConfigField; 16] = [
        Self::WeatherApiKey,
        Self::WeatherLocation,
        Self::WeatherRefresh,
        Self::TideApiKey,
        Self::TideLat,
        Self::TideLon,
        Self::CarouselSpeed,
        Self::AutoPlayVideos,
        Self::VideoVolume,
        Self::AutoCleanup,
        Self::CleanupDays,
        Self::DebugMode,
        Self::SelfiePath,
        Self::SelfieCount,
        Self::DjUrl,
        Self::MusicRefresh,
    ];

    /// The `name` attribute of the form input.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WeatherApiKey => "weather_api_key",
            Self::WeatherLocation => "weather_location",
            Self::WeatherRefresh => "weather_refresh",
            Self::TideApiKey => "tide_api_key",
            Self::TideLat => "tide_lat",
            Self::TideLon => "tide_lon",
            Self::CarouselSpeed => "carousel_speed",
            Self::AutoPlayVideos => "auto_play_videos",
            Self::VideoVolume => "video_volume",
            Self::AutoCleanup => "auto_cleanup",
            Self::CleanupDays => "cleanup_days",
            Self::DebugMode => "debug_mode",
            Self::SelfiePath => "selfie_path",
            Self::SelfieCount => "selfie_count",
            Self::DjUrl => "dj_url",
            Self::MusicRefresh => "music_refresh",
        }
    }

    /// Range inputs display their value as a percentage.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::VideoVolume)
    }
}

impl FromStr for ConfigField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown config field: {s}")))
    }
}

fn parse_u32(field: ConfigField, raw: &str) -> Result<u32, CoreError> {
    raw.trim().parse().map_err(|_| {
        CoreError::Validation(format!(
            "{} must be a non-negative integer, got '{raw}'",
            field.name()
        ))
    })
}

fn parse_f64(field: ConfigField, raw: &str) -> Result<f64, CoreError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::Validation(format!(
            "{} must be a number, got '{raw}'",
            field.name()
        ))),
    }
}

fn parse_bool(field: ConfigField, raw: &str) -> Result<bool, CoreError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CoreError::Validation(format!(
            "{} must be 'true' or 'false', got '{raw}'",
            field.name()
        ))),
    }
}

/// `0.3` -> `30%`.
pub fn percent_label(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

impl GlobalConfig {
    /// Apply one form edit. On error the config is left unchanged.
    pub fn set_field(&mut self, field: ConfigField, raw: &str) -> Result<(), CoreError> {
        match field {
            ConfigField::WeatherApiKey => self.weather_api_key = raw.to_string(),
            ConfigField::WeatherLocation => self.weather_location = raw.to_string(),
            ConfigField::WeatherRefresh => {
                let minutes = parse_u32(field, raw)?;
                self.weather_refresh = minutes.checked_mul(60).ok_or_else(|| {
                    CoreError::Validation(format!("weather_refresh is too large: {minutes}"))
                })?;
            }
            ConfigField::TideApiKey => self.tide_api_key = raw.to_string(),
            ConfigField::TideLat => self.tide_lat = parse_f64(field, raw)?,
            ConfigField::TideLon => self.tide_lon = parse_f64(field, raw)?,
            ConfigField::CarouselSpeed => self.carousel_speed = parse_u32(field, raw)?,
            ConfigField::AutoPlayVideos => self.auto_play_videos = parse_bool(field, raw)?,
            ConfigField::VideoVolume => {
                let volume = parse_f64(field, raw)?;
                if !(0.0..=1.0).contains(&volume) {
                    return Err(CoreError::Validation(format!(
                        "video_volume must be between 0 and 1, got {volume}"
                    )));
                }
                self.video_volume = volume;
            }
            ConfigField::AutoCleanup => self.auto_cleanup = parse_bool(field, raw)?,
            ConfigField::CleanupDays => self.cleanup_days = parse_u32(field, raw)?,
            ConfigField::DebugMode => self.debug_mode = parse_bool(field, raw)?,
            ConfigField::SelfiePath => self.selfie_path = raw.to_string(),
            ConfigField::SelfieCount => self.selfie_count = parse_u32(field, raw)?,
            ConfigField::DjUrl => self.dj_url = raw.to_string(),
            ConfigField::MusicRefresh => self.music_refresh = parse_u32(field, raw)?,
        }
        Ok(())
    }

    /// The value a form input shows for `field`.
    pub fn form_value(&self, field: ConfigField) -> String {
        match field {
            ConfigField::WeatherApiKey => self.weather_api_key.clone(),
            ConfigField::WeatherLocation => self.weather_location.clone(),
            ConfigField::WeatherRefresh => (self.weather_refresh / 60).to_string(),
            ConfigField::TideApiKey => self.tide_api_key.clone(),
            ConfigField::TideLat => self.tide_lat.to_string(),
            ConfigField::TideLon => self.tide_lon.to_string(),
            ConfigField::CarouselSpeed => self.carousel_speed.to_string(),
            ConfigField::AutoPlayVideos => self.auto_play_videos.to_string(),
            ConfigField::VideoVolume => self.video_volume.to_string(),
            ConfigField::AutoCleanup => self.auto_cleanup.to_string(),
            ConfigField::CleanupDays => self.cleanup_days.to_string(),
            ConfigField::DebugMode => self.debug_mode.to_string(),
            ConfigField::SelfiePath => self.selfie_path.clone(),
            ConfigField::SelfieCount => self.selfie_count.to_string(),
            ConfigField::DjUrl => self.dj_url.clone(),
            ConfigField::MusicRefresh => self.music_refresh.to_string(),
        }
    }

    /// Percentage label next to a range input, `None` for other inputs.
    pub fn range_label(&self, field: ConfigField) -> Option<String> {
        match field {
            ConfigField::VideoVolume => Some(percent_label(self.video_volume)),
            _ => None,
        }
    }

    /// Nest the config into the sectioned shape used by save-all and drafts.
    pub fn to_payload(&self, zones: BTreeMap<ZoneId, ZoneSaveRequest>) -> ConfigPayload {
        ConfigPayload {
            weather: WeatherSection {
                weather_api_key: self.weather_api_key.clone(),
                weather_location: self.weather_location.clone(),
                weather_refresh: self.weather_refresh,
            },
            tide: TideSection {
                tide_api_key: self.tide_api_key.clone(),
                tide_lat: self.tide_lat,
                tide_lon: self.tide_lon,
            },
            system: SystemSection {
                carousel_speed: self.carousel_speed,
                auto_play_videos: self.auto_play_videos,
                video_volume: self.video_volume,
                auto_cleanup: self.auto_cleanup,
                cleanup_days: self.cleanup_days,
                debug_mode: self.debug_mode,
            },
            modules: ModuleSection {
                selfie_path: self.selfie_path.clone(),
                selfie_count: self.selfie_count,
                dj_url: self.dj_url.clone(),
                music_refresh: self.music_refresh,
            },
            zones,
        }
    }
}

// ---------------------------------------------------------------------------
// Save payload
// ---------------------------------------------------------------------------

/// Body of `POST /api/admin/save-all` and `POST /api/admin/save-draft`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigPayload {
    pub weather: WeatherSection,
    pub tide: TideSection,
    pub system: SystemSection,
    pub modules: ModuleSection,
    /// Only the zone whose editor is open, if any.
    pub zones: BTreeMap<ZoneId, ZoneSaveRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSection {
    pub weather_api_key: String,
    pub weather_location: String,
    pub weather_refresh: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TideSection {
    pub tide_api_key: String,
    pub tide_lat: f64,
    pub tide_lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSection {
    pub carousel_speed: u32,
    pub auto_play_videos: bool,
    pub video_volume: f64,
    pub auto_cleanup: bool,
    pub cleanup_days: u32,
    pub debug_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSection {
    pub selfie_path: String,
    pub selfie_count: u32,
    pub dj_url: String,
    pub music_refresh: u32,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
