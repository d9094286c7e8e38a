//! In-process mock of the teaser backend.
//!
//! Serves the admin and display endpoints from an axum router bound to an
//! ephemeral port and records what the client sent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use teaser_client::TeaserApi;

/// One multipart part as received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedUpload {
    pub zone: String,
    pub files: Vec<ReceivedFile>,
}

/// Recorded requests plus knobs to make endpoints fail.
#[derive(Default)]
pub struct MockBackend {
    pub uploads: Mutex<Vec<ReceivedUpload>>,
    pub saved_zones: Mutex<Vec<(String, Value)>>,
    pub saved_all: Mutex<Vec<Value>>,
    pub drafts: Mutex<Vec<Value>>,
    pub deleted: Mutex<Vec<(String, i64)>>,
    pub weather_queries: Mutex<Vec<HashMap<String, String>>>,
    pub reject_zone_save: AtomicBool,
}

pub type Shared = Arc<MockBackend>;

/// Start the mock and return a client pointed at it.
pub async fn spawn_backend() -> (TeaserApi, Shared) {
    let state: Shared = Arc::new(MockBackend::default());
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (TeaserApi::new(format!("http://{addr}")), state)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/admin/config", get(get_config))
        .route("/api/admin/save-all", post(save_all))
        .route("/api/admin/save-draft", post(save_draft))
        .route("/api/admin/zone/{zone}", get(get_zone).post(save_zone))
        .route("/api/admin/media/{zone}", get(list_media))
        .route("/api/admin/media/{zone}/{id}", delete(delete_media))
        .route("/api/admin/add-url-content", post(add_url))
        .route("/api/admin/upload", post(upload))
        .route("/api/admin/system-status", get(system_status))
        .route("/api/admin/widget-status", get(widget_status))
        .route("/api/admin/test-weather", post(test_weather))
        .route("/api/admin/test-tide", post(test_tide))
        .route("/api/admin/test-selfie", post(test_selfie))
        .route("/api/admin/test-dj", post(test_dj))
        .route("/api/admin/cleanup", post(cleanup))
        .route("/api/admin/logs", get(logs))
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/backup", get(backup))
        .route("/api/meteo", get(meteo))
        .route("/api/musique/now-playing", get(now_playing))
        .with_state(state)
}

const ZONES: [&str; 4] = ["left1", "left2", "left3", "center"];

fn invalid_zone() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "detail": "Zone invalide" })),
    )
}

fn sample_content(zone: &str) -> Value {
    json!([
        { "id": 101, "type": "image", "src": format!("/static/media/{zone}/a.jpg"),
          "filename": "a.jpg", "title": "a", "duration": 5, "order": 0 },
        { "id": 102, "type": "video", "src": format!("/static/media/{zone}/b.mp4"),
          "filename": "b.mp4", "title": "b", "duration": 10, "order": 1 }
    ])
}

// ---- handlers ----

async fn get_config() -> Json<Value> {
    Json(json!({
        "carousel_speed": 5,
        "auto_play_videos": true,
        "video_volume": 0.3,
        "weather_refresh": 300,
        "tide_refresh": 3600,
        "zones": {},
        "weather_api_key": "key",
        "weather_location": "Biarritz,FR",
        "tide_api_key": "",
        "tide_lat": 43.4832,
        "tide_lon": -1.5586,
        "selfie_path": "/static/selfies/",
        "selfie_count": 3,
        "dj_url": "http://localhost:8001",
        "music_refresh": 5,
        "debug": false
    }))
}

async fn save_all(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.saved_all.lock().unwrap().push(body);
    Json(json!({ "success": true, "message": "Configuration complète sauvegardée" }))
}

async fn save_draft(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.drafts.lock().unwrap().push(body);
    Json(json!({ "success": true, "message": "Draft sauvegardé" }))
}

async fn get_zone(Path(zone): Path<String>) -> impl IntoResponse {
    if !ZONES.contains(&zone.as_str()) {
        return invalid_zone().into_response();
    }
    Json(json!({
        "zone": zone,
        "title": format!("Zone {}", zone.to_uppercase()),
        "duration": 5,
        "enabled": true,
        "content": sample_content(&zone)
    }))
    .into_response()
}

async fn save_zone(
    State(state): State<Shared>,
    Path(zone): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    if state.reject_zone_save.load(Ordering::SeqCst) {
        return Json(json!({ "success": false }));
    }
    state.saved_zones.lock().unwrap().push((zone.clone(), body));
    Json(json!({ "success": true, "message": format!("Zone {zone} configurée") }))
}

async fn list_media(Path(zone): Path<String>) -> impl IntoResponse {
    if !ZONES.contains(&zone.as_str()) {
        return invalid_zone().into_response();
    }
    Json(json!({ "zone": zone, "content": sample_content(&zone) })).into_response()
}

async fn delete_media(
    State(state): State<Shared>,
    Path((zone, id)): Path<(String, i64)>,
) -> impl IntoResponse {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Élément non trouvé" })),
        )
            .into_response();
    }
    state.deleted.lock().unwrap().push((zone, id));
    Json(json!({ "success": true, "message": "Élément supprimé" })).into_response()
}

async fn add_url(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "URL ajoutée avec succès",
        "item": { "id": 7, "type": "url", "src": body["url"], "title": body["title"] }
    }))
}

async fn upload(State(state): State<Shared>, mut multipart: Multipart) -> impl IntoResponse {
    let mut zone = String::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("zone") => zone = field.text().await.unwrap(),
            Some("files") => {
                let name = field.file_name().unwrap_or("unknown").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field.bytes().await.unwrap().to_vec();
                files.push(ReceivedFile {
                    name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    if !ZONES.contains(&zone.as_str()) && zone != "modal" {
        return invalid_zone().into_response();
    }

    let count = files.len();
    let listed: Vec<Value> = files
        .iter()
        .enumerate()
        .map(|(i, f)| {
            json!({ "id": 500 + i as i64, "filename": f.name, "original_name": f.name, "type": "image" })
        })
        .collect();
    state
        .uploads
        .lock()
        .unwrap()
        .push(ReceivedUpload { zone, files });

    Json(json!({
        "success": true,
        "message": format!("{count} fichier(s) uploadé(s)"),
        "uploaded_count": count,
        "files": listed
    }))
    .into_response()
}

async fn system_status() -> Json<Value> {
    Json(json!({
        "server": true,
        "apis": { "weather": true, "tide": false },
        "modules": { "active": 1, "total": 2, "selfie": true, "dj": false },
        "storage": {},
        "timestamp": "2026-10-16T09:30:00"
    }))
}

async fn widget_status() -> Json<Value> {
    Json(json!({ "weather": "online", "selfie": "online", "music": "offline" }))
}

async fn test_weather(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API météo fonctionnelle",
        "data": { "location": body["location"], "temperature": 18.2 }
    }))
}

async fn test_tide(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": body["lat"].is_f64(), "message": "Test marées simulé" }))
}

async fn test_selfie(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "count": 12, "message": "12 selfies trouvés" }))
}

async fn test_dj(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": false, "message": "Module DJ non accessible" }))
}

async fn cleanup() -> Json<Value> {
    Json(json!({ "success": true, "message": "Nettoyage effectué", "deleted_files": 4 }))
}

async fn logs() -> Json<Value> {
    Json(json!({ "logs": "Module TEASER démarré\nInterface admin accessible", "file": "teaser.log", "size": 2 }))
}

async fn stats() -> Json<Value> {
    Json(json!({ "zones": { "left1": 2, "left2": 0, "left3": 0, "center": 1 } }))
}

async fn backup() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"teaser_backup":true,"version":"1.0"}"#,
    )
}

async fn meteo(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.weather_queries.lock().unwrap().push(params);
    Json(json!({
        "ville": "Biarritz",
        "temperature": 19,
        "description": "ciel dégagé",
        "icone": "fa-sun"
    }))
}

async fn now_playing() -> Json<Value> {
    Json(json!({ "titre": "X", "artiste": "Y", "cover": null, "preview": null }))
}
