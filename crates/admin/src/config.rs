use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default interval between draft autosaves.
pub const DEFAULT_DRAFT_INTERVAL_SECS: u64 = 30;

/// Admin controller configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSettings {
    /// Backend base URL (default: `http://localhost:8000`).
    pub backend_url: String,
    /// Autosave period (default: 30s).
    pub draft_interval: Duration,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            draft_interval: Duration::from_secs(DEFAULT_DRAFT_INTERVAL_SECS),
        }
    }
}

impl AdminSettings {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `TEASER_BACKEND_URL`         | `http://localhost:8000` |
    /// | `TEASER_DRAFT_INTERVAL_SECS` | `30`                    |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("TEASER_BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.into());

        let draft_secs = match lookup("TEASER_DRAFT_INTERVAL_SECS") {
            None => DEFAULT_DRAFT_INTERVAL_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_DRAFT_INTERVAL_SECS,
                        "Invalid TEASER_DRAFT_INTERVAL_SECS, using default",
                    );
                    DEFAULT_DRAFT_INTERVAL_SECS
                }
            },
        };

        Self {
            backend_url,
            draft_interval: Duration::from_secs(draft_secs),
        }
    }
}
