//! Request and response bodies of the admin and display endpoints.
//!
//! Domain payloads (zones, config, status, widgets) live in `teaser-core`;
//! this module holds the envelopes around them.

use serde::{Deserialize, Serialize};
use teaser_core::types::ItemId;
use teaser_core::zone::{ContentItem, ContentType, ZoneId};

/// A 2xx body that can still report a logical failure.
pub trait Outcome {
    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

macro_rules! impl_outcome {
    ($($ty:ty),* $(,)?) => {
        $(impl Outcome for $ty {
            fn success(&self) -> bool {
                self.success
            }

            fn message(&self) -> Option<&str> {
                self.message.as_deref()
            }
        })*
    };
}

impl_outcome!(ActionResponse, UploadResponse, TestResponse, CleanupResponse);

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/admin/add-url-content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddUrlRequest {
    pub zone: ZoneId,
    pub url: String,
    pub title: String,
}

/// Body of `POST /api/admin/test-weather`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherTestRequest {
    pub api_key: String,
    pub location: String,
}

/// Body of `POST /api/admin/test-tide`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TideTestRequest {
    pub api_key: String,
    pub lat: f64,
    pub lon: f64,
}

/// Body of `POST /api/admin/test-selfie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfieTestRequest {
    pub path: String,
}

/// Body of `POST /api/admin/test-dj`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DjTestRequest {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// `{success, message?}` returned by saves, deletes and URL adds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// One stored file reported back by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: ItemId,
    pub filename: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContentType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub uploaded_count: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

/// `GET /api/admin/media/{zone}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaListResponse {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

/// Result of one of the `test-*` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Photo count reported by the selfie test.
    #[serde(default)]
    pub count: Option<u32>,
    /// Any extra data the test returned (sample temperature, DJ status).
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted_files: u32,
}

/// `GET /api/admin/logs`: the tail of the latest log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: String,
    #[serde(default)]
    pub file: Option<String>,
    /// Number of lines returned.
    #[serde(default)]
    pub size: u64,
}
