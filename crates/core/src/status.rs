//! Backend health as shown in the admin sidebar and module cards.
//!
//! Every indicator is binary. A status payload that cannot be fetched
//! renders as [`SystemStatusView::offline`] / [`WidgetStatusView::offline`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of `GET /api/admin/system-status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub server: bool,
    pub apis: ApiHealth,
    pub modules: ModuleActivity,
    /// Free-form storage summary; not rendered.
    pub storage: serde_json::Value,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiHealth {
    pub weather: bool,
    pub tide: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleActivity {
    pub active: u32,
    pub total: u32,
    pub selfie: bool,
    pub dj: bool,
}

/// Body of `GET /api/admin/widget-status`: `"online"` / `"offline"` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetStatus {
    pub weather: String,
    pub selfie: String,
    pub music: String,
}

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Online,
    Offline,
}

impl Indicator {
    pub fn from_flag(online: bool) -> Self {
        if online {
            Self::Online
        } else {
            Self::Offline
        }
    }

    /// Only the exact string `online` counts as online.
    pub fn from_wire(value: &str) -> Self {
        Self::from_flag(value == "online")
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }

    /// Class of the dot icon in module and widget cards.
    pub fn dot_class(&self) -> String {
        format!("fas fa-circle {}", self.css_class())
    }
}

/// A sidebar line: text plus indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub indicator: Indicator,
}

impl StatusLine {
    fn new(text: impl Into<String>, indicator: Indicator) -> Self {
        Self {
            text: text.into(),
            indicator,
        }
    }
}

/// Rendered system status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatusView {
    pub server: StatusLine,
    pub weather_api: StatusLine,
    pub modules: StatusLine,
    pub selfie_module: Indicator,
    pub dj_module: Indicator,
}

impl SystemStatusView {
    pub fn render(status: &SystemStatus) -> Self {
        let server = Indicator::from_flag(status.server);
        let weather = Indicator::from_flag(status.apis.weather);
        let modules = Indicator::from_flag(status.modules.active > 0);

        Self {
            server: StatusLine::new(
                if status.server { "En ligne" } else { "Hors ligne" },
                server,
            ),
            weather_api: StatusLine::new(
                if status.apis.weather { "OK" } else { "Erreur" },
                weather,
            ),
            modules: StatusLine::new(
                format!("{}/{}", status.modules.active, status.modules.total),
                modules,
            ),
            selfie_module: Indicator::from_flag(status.modules.selfie),
            dj_module: Indicator::from_flag(status.modules.dj),
        }
    }

    /// Everything down; used when the status request fails.
    pub fn offline() -> Self {
        Self {
            server: StatusLine::new("Hors ligne", Indicator::Offline),
            weather_api: StatusLine::new("Erreur", Indicator::Offline),
            modules: StatusLine::new("0/0", Indicator::Offline),
            selfie_module: Indicator::Offline,
            dj_module: Indicator::Offline,
        }
    }
}

/// Rendered widget status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetStatusView {
    pub weather: Indicator,
    pub selfie: Indicator,
    pub music: Indicator,
}

impl WidgetStatusView {
    pub fn render(status: &WidgetStatus) -> Self {
        Self {
            weather: Indicator::from_wire(&status.weather),
            selfie: Indicator::from_wire(&status.selfie),
            music: Indicator::from_wire(&status.music),
        }
    }

    pub fn offline() -> Self {
        Self {
            weather: Indicator::Offline,
            selfie: Indicator::Offline,
            music: Indicator::Offline,
        }
    }
}
