//! Backend seams the controllers depend on.
//!
//! [`TeaserApi`] implements both traits; tests substitute in-memory fakes.

use async_trait::async_trait;
use teaser_core::settings::{ConfigPayload, GlobalConfig};
use teaser_core::status::{SystemStatus, WidgetStatus};
use teaser_core::types::ItemId;
use teaser_core::upload::UploadBatch;
use teaser_core::widgets::{NowPlaying, WeatherReport};
use teaser_core::zone::{ContentItem, ZoneConfig, ZoneId, ZoneSaveRequest};

use crate::api::{ApiError, TeaserApi};
use crate::dto::{
    ActionResponse, AddUrlRequest, CleanupResponse, DjTestRequest, LogsResponse,
    SelfieTestRequest, TestResponse, TideTestRequest, UploadResponse, WeatherTestRequest,
};

/// Everything the admin dashboard calls.
#[async_trait]
pub trait AdminBackend: Send + Sync {
    async fn get_config(&self) -> Result<GlobalConfig, ApiError>;
    async fn save_all(&self, payload: &ConfigPayload) -> Result<ActionResponse, ApiError>;
    async fn save_draft(&self, payload: &ConfigPayload) -> Result<(), ApiError>;

    async fn get_zone(&self, zone: ZoneId) -> Result<ZoneConfig, ApiError>;
    async fn save_zone(&self, zone: ZoneId, request: &ZoneSaveRequest)
        -> Result<ActionResponse, ApiError>;
    async fn list_media(&self, zone: ZoneId) -> Result<Vec<ContentItem>, ApiError>;
    async fn delete_media(&self, zone: ZoneId, id: ItemId) -> Result<ActionResponse, ApiError>;
    async fn add_url_content(&self, request: &AddUrlRequest) -> Result<ActionResponse, ApiError>;
    async fn upload(&self, batch: &UploadBatch) -> Result<UploadResponse, ApiError>;

    async fn system_status(&self) -> Result<SystemStatus, ApiError>;
    async fn widget_status(&self) -> Result<WidgetStatus, ApiError>;

    async fn test_weather(&self, request: &WeatherTestRequest) -> Result<TestResponse, ApiError>;
    async fn test_tide(&self, request: &TideTestRequest) -> Result<TestResponse, ApiError>;
    async fn test_selfie(&self, request: &SelfieTestRequest) -> Result<TestResponse, ApiError>;
    async fn test_dj(&self, request: &DjTestRequest) -> Result<TestResponse, ApiError>;

    async fn cleanup(&self) -> Result<CleanupResponse, ApiError>;
    async fn logs(&self) -> Result<LogsResponse, ApiError>;
    async fn stats(&self) -> Result<serde_json::Value, ApiError>;
    async fn backup(&self) -> Result<Vec<u8>, ApiError>;
}

/// Everything the public display calls.
#[async_trait]
pub trait DisplayBackend: Send + Sync {
    async fn weather(&self, lat: f64, lon: f64) -> Result<WeatherReport, ApiError>;
    async fn now_playing(&self) -> Result<NowPlaying, ApiError>;
}

#[async_trait]
impl AdminBackend for TeaserApi {
    async fn get_config(&self) -> Result<GlobalConfig, ApiError> {
        TeaserApi::get_config(self).await
    }

    async fn save_all(&self, payload: &ConfigPayload) -> Result<ActionResponse, ApiError> {
        TeaserApi::save_all(self, payload).await
    }

    async fn save_draft(&self, payload: &ConfigPayload) -> Result<(), ApiError> {
        TeaserApi::save_draft(self, payload).await
    }

    async fn get_zone(&self, zone: ZoneId) -> Result<ZoneConfig, ApiError> {
        TeaserApi::get_zone(self, zone).await
    }

    async fn save_zone(
        &self,
        zone: ZoneId,
        request: &ZoneSaveRequest,
    ) -> Result<ActionResponse, ApiError> {
        TeaserApi::save_zone(self, zone, request).await
    }

    async fn list_media(&self, zone: ZoneId) -> Result<Vec<ContentItem>, ApiError> {
        TeaserApi::list_media(self, zone).await
    }

    async fn delete_media(&self, zone: ZoneId, id: ItemId) -> Result<ActionResponse, ApiError> {
        TeaserApi::delete_media(self, zone, id).await
    }

    async fn add_url_content(&self, request: &AddUrlRequest) -> Result<ActionResponse, ApiError> {
        TeaserApi::add_url_content(self, request).await
    }

    async fn upload(&self, batch: &UploadBatch) -> Result<UploadResponse, ApiError> {
        TeaserApi::upload(self, batch).await
    }

    async fn system_status(&self) -> Result<SystemStatus, ApiError> {
        TeaserApi::system_status(self).await
    }

    async fn widget_status(&self) -> Result<WidgetStatus, ApiError> {
        TeaserApi::widget_status(self).await
    }

    async fn test_weather(&self, request: &WeatherTestRequest) -> Result<TestResponse, ApiError> {
        TeaserApi::test_weather(self, request).await
    }

    async fn test_tide(&self, request: &TideTestRequest) -> Result<TestResponse, ApiError> {
        TeaserApi::test_tide(self, request).await
    }

    async fn test_selfie(&self, request: &SelfieTestRequest) -> Result<TestResponse, ApiError> {
        TeaserApi::test_selfie(self, request).await
    }

    async fn test_dj(&self, request: &DjTestRequest) -> Result<TestResponse, ApiError> {
        TeaserApi::test_dj(self, request).await
    }

    async fn cleanup(&self) -> Result<CleanupResponse, ApiError> {
        TeaserApi::cleanup(self).await
    }

    async fn logs(&self) -> Result<LogsResponse, ApiError> {
        TeaserApi::logs(self).await
    }

    async fn stats(&self) -> Result<serde_json::Value, ApiError> {
        TeaserApi::stats(self).await
    }

    async fn backup(&self) -> Result<Vec<u8>, ApiError> {
        TeaserApi::backup(self).await
    }
}

#[async_trait]
impl DisplayBackend for TeaserApi {
    async fn weather(&self, lat: f64, lon: f64) -> Result<WeatherReport, ApiError> {
        TeaserApi::weather(self, lat, lon).await
    }

    async fn now_playing(&self) -> Result<NowPlaying, ApiError> {
        TeaserApi::now_playing(self).await
    }
}
