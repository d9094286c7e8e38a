//! Shared fakes for admin controller tests.
//!
//! [`FakeBackend`] keeps an authoritative in-memory copy of the zones and
//! records every call; [`RecordingView`] records everything drawn.
//! Individual calls can be made to fail or to block until released.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use teaser_admin::{AdminController, AdminSettings, AdminView};
use teaser_client::dto::{
    ActionResponse, AddUrlRequest, CleanupResponse, DjTestRequest, LogsResponse,
    SelfieTestRequest, TestResponse, TideTestRequest, UploadResponse, WeatherTestRequest,
};
use teaser_client::{AdminBackend, ApiError};
use teaser_core::notification::{Notification, NotificationLevel};
use teaser_core::settings::{ConfigField, ConfigPayload, GlobalConfig};
use teaser_core::status::{
    ApiHealth, ModuleActivity, SystemStatus, SystemStatusView, WidgetStatus, WidgetStatusView,
};
use teaser_core::types::ItemId;
use teaser_core::upload::UploadBatch;
use teaser_core::zone::{
    ContentItem, ContentType, UploadTarget, ZoneConfig, ZoneId, ZonePreview, ZoneSaveRequest,
    ZoneSettings,
};
use tokio::sync::Notify;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetConfig,
    SaveAll(ConfigPayload),
    SaveDraft(ConfigPayload),
    GetZone(ZoneId),
    SaveZone(ZoneId, ZoneSaveRequest),
    ListMedia(ZoneId),
    Delete(ZoneId, ItemId),
    AddUrl(AddUrlRequest),
    Upload(UploadBatch),
    SystemStatus,
    WidgetStatus,
    TestWeather(WeatherTestRequest),
    TestTide(TideTestRequest),
    TestSelfie(SelfieTestRequest),
    TestDj(DjTestRequest),
    Cleanup,
    Logs,
    Stats,
    Backup,
}

#[derive(Default)]
pub struct FakeBackend {
    pub zones: Mutex<HashMap<ZoneId, ZoneConfig>>,
    pub calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

pub fn item(zone: ZoneId, id: ItemId, order: u32) -> ContentItem {
    ContentItem {
        id,
        kind: ContentType::Image,
        src: format!("/static/media/{zone}/{id}.jpg"),
        title: None,
        filename: format!("{id}.jpg"),
        duration_seconds: 5,
        order,
    }
}

impl FakeBackend {
    /// Every zone enabled; `left1` holds items 1, 2, 3, `left2` holds 20.
    pub fn seeded() -> Arc<Self> {
        let backend = Self::default();
        {
            let mut zones = backend.zones.lock().unwrap();
            for zone in ZoneId::ALL {
                let mut config = ZoneConfig::empty(zone);
                config.title = format!("Zone {}", zone.as_str().to_uppercase());
                config.enabled = true;
                zones.insert(zone, config);
            }
            zones.get_mut(&ZoneId::Left1).unwrap().content = vec![
                item(ZoneId::Left1, 1, 0),
                item(ZoneId::Left1, 2, 1),
                item(ZoneId::Left1, 3, 2),
            ];
            zones.get_mut(&ZoneId::Left2).unwrap().content = vec![item(ZoneId::Left2, 20, 0)];
        }
        Arc::new(backend)
    }

    /// Make `op` fail with a status error until cleared.
    pub fn fail(&self, op: &str) {
        self.failing.lock().unwrap().insert(op.to_string());
    }

    pub fn recover(&self, op: &str) {
        self.failing.lock().unwrap().remove(op);
    }

    /// Block `op` until the returned handle is notified.
    pub fn gate(&self, op: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(op.to_string(), notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn server_order(&self, zone: ZoneId) -> Vec<ItemId> {
        self.zones.lock().unwrap()[&zone]
            .content
            .iter()
            .map(|i| i.id)
            .collect()
    }

    async fn enter(&self, op: &str, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        let gate = self.gates.lock().unwrap().remove(op);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.lock().unwrap().contains(op) {
            return Err(ApiError::Status {
                status: 500,
                body: format!(r#"{{"detail":"{op} indisponible"}}"#),
            });
        }
        Ok(())
    }

    fn ok() -> ActionResponse {
        ActionResponse {
            success: true,
            message: None,
        }
    }
}

#[async_trait]
impl AdminBackend for FakeBackend {
    async fn get_config(&self) -> Result<GlobalConfig, ApiError> {
        self.enter("get_config", Call::GetConfig).await?;
        Ok(GlobalConfig {
            weather_api_key: "secret".into(),
            tide_api_key: "tide-key".into(),
            ..GlobalConfig::default()
        })
    }

    async fn save_all(&self, payload: &ConfigPayload) -> Result<ActionResponse, ApiError> {
        self.enter("save_all", Call::SaveAll(payload.clone())).await?;
        Ok(Self::ok())
    }

    async fn save_draft(&self, payload: &ConfigPayload) -> Result<(), ApiError> {
        self.enter("save_draft", Call::SaveDraft(payload.clone())).await
    }

    async fn get_zone(&self, zone: ZoneId) -> Result<ZoneConfig, ApiError> {
        self.enter(&format!("get_zone:{zone}"), Call::GetZone(zone)).await?;
        Ok(self.zones.lock().unwrap()[&zone].clone())
    }

    async fn save_zone(
        &self,
        zone: ZoneId,
        request: &ZoneSaveRequest,
    ) -> Result<ActionResponse, ApiError> {
        self.enter("save_zone", Call::SaveZone(zone, request.clone()))
            .await?;
        let mut zones = self.zones.lock().unwrap();
        let config = zones.get_mut(&zone).unwrap();
        config.title = request.title.clone();
        config.duration_seconds = request.duration_seconds;
        config.enabled = request.enabled;
        for entry in &request.content_order {
            if let Some(item) = config.content.iter_mut().find(|i| i.id == entry.id) {
                item.order = entry.order;
            }
        }
        config.content.sort_by_key(|i| i.order);
        Ok(Self::ok())
    }

    async fn list_media(&self, zone: ZoneId) -> Result<Vec<ContentItem>, ApiError> {
        self.enter(&format!("list_media:{zone}"), Call::ListMedia(zone))
            .await?;
        Ok(self.zones.lock().unwrap()[&zone].content.clone())
    }

    async fn delete_media(&self, zone: ZoneId, id: ItemId) -> Result<ActionResponse, ApiError> {
        self.enter("delete_media", Call::Delete(zone, id)).await?;
        self.zones
            .lock()
            .unwrap()
            .get_mut(&zone)
            .unwrap()
            .content
            .retain(|i| i.id != id);
        Ok(Self::ok())
    }

    async fn add_url_content(&self, request: &AddUrlRequest) -> Result<ActionResponse, ApiError> {
        self.enter("add_url", Call::AddUrl(request.clone())).await?;
        let mut zones = self.zones.lock().unwrap();
        let content = &mut zones.get_mut(&request.zone).unwrap().content;
        let order = content.len() as u32;
        content.push(ContentItem {
            id: 900 + order as ItemId,
            kind: ContentType::Url,
            src: request.url.clone(),
            title: Some(request.title.clone()),
            filename: request.url.clone(),
            duration_seconds: 5,
            order,
        });
        Ok(Self::ok())
    }

    async fn upload(&self, batch: &UploadBatch) -> Result<UploadResponse, ApiError> {
        self.enter(&format!("upload:{}", batch.target), Call::Upload(batch.clone()))
            .await?;
        if let UploadTarget::Zone(zone) = batch.target {
            let mut zones = self.zones.lock().unwrap();
            let content = &mut zones.get_mut(&zone).unwrap().content;
            for (n, _file) in batch.accepted.iter().enumerate() {
                let order = content.len() as u32;
                content.push(item(zone, 700 + n as ItemId, order));
            }
        }
        Ok(UploadResponse {
            success: true,
            uploaded_count: batch.accepted.len() as u32,
            message: None,
            files: Vec::new(),
        })
    }

    async fn system_status(&self) -> Result<SystemStatus, ApiError> {
        self.enter("system_status", Call::SystemStatus).await?;
        Ok(SystemStatus {
            server: true,
            apis: ApiHealth {
                weather: true,
                tide: false,
            },
            modules: ModuleActivity {
                active: 2,
                total: 2,
                selfie: true,
                dj: false,
            },
            ..SystemStatus::default()
        })
    }

    async fn widget_status(&self) -> Result<WidgetStatus, ApiError> {
        self.enter("widget_status", Call::WidgetStatus).await?;
        Ok(WidgetStatus {
            weather: "online".into(),
            selfie: "online".into(),
            music: "online".into(),
        })
    }

    async fn test_weather(&self, request: &WeatherTestRequest) -> Result<TestResponse, ApiError> {
        self.enter("test_weather", Call::TestWeather(request.clone()))
            .await?;
        Ok(test_ok(None))
    }

    async fn test_tide(&self, request: &TideTestRequest) -> Result<TestResponse, ApiError> {
        self.enter("test_tide", Call::TestTide(request.clone())).await?;
        Ok(test_ok(None))
    }

    async fn test_selfie(&self, request: &SelfieTestRequest) -> Result<TestResponse, ApiError> {
        self.enter("test_selfie", Call::TestSelfie(request.clone()))
            .await?;
        Ok(test_ok(Some(12)))
    }

    async fn test_dj(&self, request: &DjTestRequest) -> Result<TestResponse, ApiError> {
        self.enter("test_dj", Call::TestDj(request.clone())).await?;
        Ok(test_ok(None))
    }

    async fn cleanup(&self) -> Result<CleanupResponse, ApiError> {
        self.enter("cleanup", Call::Cleanup).await?;
        Ok(CleanupResponse {
            success: true,
            message: None,
            deleted_files: 3,
        })
    }

    async fn logs(&self) -> Result<LogsResponse, ApiError> {
        self.enter("logs", Call::Logs).await?;
        Ok(LogsResponse {
            logs: "Module TEASER démarré".into(),
            file: Some("teaser.log".into()),
            size: 1,
        })
    }

    async fn stats(&self) -> Result<serde_json::Value, ApiError> {
        self.enter("stats", Call::Stats).await?;
        Ok(serde_json::json!({ "zones": { "left1": 3 } }))
    }

    async fn backup(&self) -> Result<Vec<u8>, ApiError> {
        self.enter("backup", Call::Backup).await?;
        Ok(br#"{"teaser_backup":true}"#.to_vec())
    }
}

fn test_ok(count: Option<u32>) -> TestResponse {
    TestResponse {
        success: true,
        message: None,
        count,
        data: None,
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Notify(Notification),
    Progress(bool),
    Dropzone(UploadTarget, bool),
    Unsaved(bool),
    Tab(String),
    Config(GlobalConfig),
    RangeLabel(ConfigField, String),
    MediaList(ZoneId, Vec<ItemId>),
    Preview(ZonePreview),
    WidgetStatus(WidgetStatusView),
    SystemStatus(SystemStatusView),
    EditorOpened(ZoneId, String),
    Editor(ZoneId, ZoneSettings, Vec<ItemId>),
    EditorClosed,
    UrlFormCleared,
    Logs(LogsResponse),
    Stats(serde_json::Value),
    Backup(Vec<u8>),
    Confirm(String),
}

pub struct RecordingView {
    pub drawn: Mutex<Vec<Drawn>>,
    pub confirm_answer: AtomicBool,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            drawn: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
        }
    }
}

impl RecordingView {
    fn push(&self, drawn: Drawn) {
        self.drawn.lock().unwrap().push(drawn);
    }

    pub fn drawn(&self) -> Vec<Drawn> {
        self.drawn.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.drawn()
            .into_iter()
            .filter_map(|d| match d {
                Drawn::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }

    pub fn last_unsaved(&self) -> Option<bool> {
        self.drawn().into_iter().rev().find_map(|d| match d {
            Drawn::Unsaved(u) => Some(u),
            _ => None,
        })
    }

    pub fn editors(&self) -> Vec<(ZoneId, Vec<ItemId>)> {
        self.drawn()
            .into_iter()
            .filter_map(|d| match d {
                Drawn::Editor(zone, _, ids) => Some((zone, ids)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl AdminView for RecordingView {
    fn notify(&self, notification: Notification) {
        self.push(Drawn::Notify(notification));
    }

    fn set_upload_progress(&self, visible: bool) {
        self.push(Drawn::Progress(visible));
    }

    fn set_dropzone_enabled(&self, target: UploadTarget, enabled: bool) {
        self.push(Drawn::Dropzone(target, enabled));
    }

    fn set_unsaved(&self, unsaved: bool) {
        self.push(Drawn::Unsaved(unsaved));
    }

    fn show_tab(&self, tab: &str) {
        self.push(Drawn::Tab(tab.to_string()));
    }

    fn render_config(&self, config: &GlobalConfig) {
        self.push(Drawn::Config(config.clone()));
    }

    fn set_range_label(&self, field: ConfigField, label: &str) {
        self.push(Drawn::RangeLabel(field, label.to_string()));
    }

    fn render_media_list(&self, zone: ZoneId, items: &[ContentItem]) {
        self.push(Drawn::MediaList(zone, items.iter().map(|i| i.id).collect()));
    }

    fn render_zone_preview(&self, preview: &ZonePreview) {
        self.push(Drawn::Preview(preview.clone()));
    }

    fn render_widget_status(&self, status: &WidgetStatusView) {
        self.push(Drawn::WidgetStatus(*status));
    }

    fn render_system_status(&self, status: &SystemStatusView) {
        self.push(Drawn::SystemStatus(status.clone()));
    }

    fn open_zone_editor(&self, zone: ZoneId, title: &str) {
        self.push(Drawn::EditorOpened(zone, title.to_string()));
    }

    fn render_zone_editor(&self, zone: ZoneId, settings: &ZoneSettings, items: &[ContentItem]) {
        self.push(Drawn::Editor(
            zone,
            settings.clone(),
            items.iter().map(|i| i.id).collect(),
        ));
    }

    fn close_zone_editor(&self) {
        self.push(Drawn::EditorClosed);
    }

    fn clear_url_form(&self) {
        self.push(Drawn::UrlFormCleared);
    }

    fn show_logs(&self, logs: &LogsResponse) {
        self.push(Drawn::Logs(logs.clone()));
    }

    fn show_stats(&self, stats: &serde_json::Value) {
        self.push(Drawn::Stats(stats.clone()));
    }

    fn offer_backup(&self, bytes: &[u8]) {
        self.push(Drawn::Backup(bytes.to_vec()));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.push(Drawn::Confirm(prompt.to_string()));
        self.confirm_answer.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub controller: AdminController,
    pub backend: Arc<FakeBackend>,
    pub view: Arc<RecordingView>,
}

pub fn harness() -> Harness {
    let backend = FakeBackend::seeded();
    let view = Arc::new(RecordingView::default());
    let controller = AdminController::new(backend.clone(), view.clone(), AdminSettings::default());
    Harness {
        controller,
        backend,
        view,
    }
}

/// Yield until `cond` holds; panics after a generous bound.
pub async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..1_000 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition not reached");
}
