//! REST client for the teaser backend.
//!
//! Wraps the admin endpoints (`/api/admin/*`) and the two public display
//! endpoints (`/api/meteo`, `/api/musique/now-playing`) using [`reqwest`].
//! No call is retried.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use teaser_core::settings::{ConfigPayload, GlobalConfig};
use teaser_core::status::{SystemStatus, WidgetStatus};
use teaser_core::types::ItemId;
use teaser_core::upload::{FileData, UploadBatch};
use teaser_core::widgets::{NowPlaying, WeatherReport};
use teaser_core::zone::{ContentItem, ZoneConfig, ZoneId, ZoneSaveRequest};

use crate::dto::{
    ActionResponse, AddUrlRequest, CleanupResponse, DjTestRequest, LogsResponse,
    MediaListResponse, Outcome, SelfieTestRequest, TestResponse, TideTestRequest, UploadResponse,
    WeatherTestRequest,
};

/// HTTP client for one teaser backend.
#[derive(Debug, Clone)]
pub struct TeaserApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx response with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A file queued for upload could not be read.
    #[error("Cannot read upload file: {0}")]
    File(#[from] std::io::Error),
}

impl ApiError {
    /// Text shown to the user after a prefix such as `Erreur: `.
    ///
    /// Backend errors carry a `detail` field; it is used when present.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(str::to_string))
                .unwrap_or_else(|| self.to_string()),
            other => other.to_string(),
        }
    }
}

impl TeaserApi {
    /// Create a client for a backend.
    ///
    /// * `base_url` - e.g. `http://localhost:8000`. A trailing slash is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- configuration ----

    /// `GET /api/admin/config`.
    pub async fn get_config(&self) -> Result<GlobalConfig, ApiError> {
        let response = self.client.get(self.url("/api/admin/config")).send().await?;
        Self::parse_response(response).await
    }

    /// `POST /api/admin/save-all`.
    pub async fn save_all(&self, payload: &ConfigPayload) -> Result<ActionResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/admin/save-all"))
            .json(payload)
            .send()
            .await?;
        Self::parse_outcome(response, "Erreur de sauvegarde globale").await
    }

    /// `POST /api/admin/save-draft`. Only the status code is checked.
    pub async fn save_draft(&self, payload: &ConfigPayload) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/api/admin/save-draft"))
            .json(payload)
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- zones & media ----

    /// `GET /api/admin/zone/{zone}`.
    pub async fn get_zone(&self, zone: ZoneId) -> Result<ZoneConfig, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/admin/zone/{zone}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /api/admin/zone/{zone}`.
    pub async fn save_zone(
        &self,
        zone: ZoneId,
        request: &ZoneSaveRequest,
    ) -> Result<ActionResponse, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/api/admin/zone/{zone}")))
            .json(request)
            .send()
            .await?;
        Self::parse_outcome(response, "Erreur de sauvegarde").await
    }

    /// `GET /api/admin/media/{zone}`.
    pub async fn list_media(&self, zone: ZoneId) -> Result<Vec<ContentItem>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/admin/media/{zone}")))
            .send()
            .await?;
        let list: MediaListResponse = Self::parse_response(response).await?;
        Ok(list.content)
    }

    /// `DELETE /api/admin/media/{zone}/{id}`.
    pub async fn delete_media(&self, zone: ZoneId, id: ItemId) -> Result<ActionResponse, ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/admin/media/{zone}/{id}")))
            .send()
            .await?;
        Self::parse_outcome(response, "Erreur de suppression").await
    }

    /// `POST /api/admin/add-url-content`.
    pub async fn add_url_content(&self, request: &AddUrlRequest) -> Result<ActionResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/admin/add-url-content"))
            .json(request)
            .send()
            .await?;
        Self::parse_outcome(response, "Erreur d'ajout d'URL").await
    }

    /// `POST /api/admin/upload` with one `files` part per accepted file and a
    /// `zone` text part.
    pub async fn upload(&self, batch: &UploadBatch) -> Result<UploadResponse, ApiError> {
        let mut form = Form::new().text("zone", batch.target.as_str().to_string());

        for file in &batch.accepted {
            let bytes = match &file.data {
                FileData::Bytes(bytes) => bytes.clone(),
                FileData::Path(path) => tokio::fs::read(path).await?,
            };
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(&file.mime)?;
            form = form.part("files", part);
        }

        tracing::debug!(
            target_zone = %batch.target,
            files = batch.accepted.len(),
            "Submitting upload"
        );

        let response = self
            .client
            .post(self.url("/api/admin/upload"))
            .multipart(form)
            .send()
            .await?;
        Self::parse_outcome(response, "Erreur d'upload").await
    }

    // ---- status ----

    /// `GET /api/admin/system-status`.
    pub async fn system_status(&self) -> Result<SystemStatus, ApiError> {
        let response = self
            .client
            .get(self.url("/api/admin/system-status"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/admin/widget-status`.
    pub async fn widget_status(&self) -> Result<WidgetStatus, ApiError> {
        let response = self
            .client
            .get(self.url("/api/admin/widget-status"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- module tests ----

    pub async fn test_weather(&self, request: &WeatherTestRequest) -> Result<TestResponse, ApiError> {
        self.post_test("weather", request).await
    }

    pub async fn test_tide(&self, request: &TideTestRequest) -> Result<TestResponse, ApiError> {
        self.post_test("tide", request).await
    }

    pub async fn test_selfie(&self, request: &SelfieTestRequest) -> Result<TestResponse, ApiError> {
        self.post_test("selfie", request).await
    }

    pub async fn test_dj(&self, request: &DjTestRequest) -> Result<TestResponse, ApiError> {
        self.post_test("dj", request).await
    }

    async fn post_test<B: serde::Serialize + ?Sized>(
        &self,
        module: &str,
        body: &B,
    ) -> Result<TestResponse, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/api/admin/test-{module}")))
            .json(body)
            .send()
            .await?;
        Self::parse_outcome(response, "Test échoué").await
    }

    // ---- maintenance ----

    /// `POST /api/admin/cleanup`.
    pub async fn cleanup(&self) -> Result<CleanupResponse, ApiError> {
        let response = self.client.post(self.url("/api/admin/cleanup")).send().await?;
        Self::parse_outcome(response, "Erreur de nettoyage").await
    }

    /// `GET /api/admin/logs`.
    pub async fn logs(&self) -> Result<LogsResponse, ApiError> {
        let response = self.client.get(self.url("/api/admin/logs")).send().await?;
        Self::parse_response(response).await
    }

    /// `GET /api/admin/stats`. The shape is free-form.
    pub async fn stats(&self) -> Result<serde_json::Value, ApiError> {
        let response = self.client.get(self.url("/api/admin/stats")).send().await?;
        Self::parse_response(response).await
    }

    /// `GET /api/admin/backup`: the raw JSON file.
    pub async fn backup(&self) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(self.url("/api/admin/backup")).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // ---- display ----

    /// `GET /api/meteo?lat=..&lon=..`.
    pub async fn weather(&self, lat: f64, lon: f64) -> Result<WeatherReport, ApiError> {
        let response = self
            .client
            .get(self.url("/api/meteo"))
            .query(&[("lat", lat), ("lon", lon)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/musique/now-playing`.
    pub async fn now_playing(&self) -> Result<NowPlaying, ApiError> {
        let response = self
            .client
            .get(self.url("/api/musique/now-playing"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or [`ApiError::Status`] carrying the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Parse a `{success, message?}` body; `success: false` becomes
    /// [`ApiError::Rejected`] with the backend message or `default_message`.
    async fn parse_outcome<T: DeserializeOwned + Outcome>(
        response: reqwest::Response,
        default_message: &str,
    ) -> Result<T, ApiError> {
        let outcome: T = Self::parse_response(response).await?;
        if !outcome.success() {
            let message = outcome
                .message()
                .filter(|m| !m.is_empty())
                .unwrap_or(default_message)
                .to_string();
            return Err(ApiError::Rejected(message));
        }
        Ok(outcome)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
