//! Display zones and the content items they rotate through.
//!
//! The four zone identifiers are fixed by the display layout. Content items
//! are owned by exactly one zone and carry a server-assigned id; the client
//! never invents ids for persisted items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ItemId, Seconds};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Display duration applied when the backend omits one.
pub const DEFAULT_DURATION_SECS: Seconds = 5;

/// Thumbnail shown for anything that is not an image.
pub const VIDEO_PLACEHOLDER: &str = "/static/icons/video-placeholder.png";

/// Wire name of the sentinel upload target used by the zone editor dialog.
pub const MODAL_TARGET: &str = "modal";

fn default_duration() -> Seconds {
    DEFAULT_DURATION_SECS
}

// ---------------------------------------------------------------------------
// ZoneId
// ---------------------------------------------------------------------------

/// A named region of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneId {
    Left1,
    Left2,
    Left3,
    Center,
}

impl ZoneId {
    /// Every zone, in layout order.
    pub const ALL: [ZoneId; 4] = [ZoneId::Left1, ZoneId::Left2, ZoneId::Left3, ZoneId::Center];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left1 => "left1",
            Self::Left2 => "left2",
            Self::Left3 => "left3",
            Self::Center => "center",
        }
    }

    /// Title shown at the top of the zone editor, e.g. `Configuration LEFT1`.
    pub fn editor_title(&self) -> String {
        format!("Configuration {}", self.as_str().to_uppercase())
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left1" => Ok(Self::Left1),
            "left2" => Ok(Self::Left2),
            "left3" => Ok(Self::Left3),
            "center" => Ok(Self::Center),
            other => Err(CoreError::Validation(format!("Zone invalide: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// UploadTarget
// ---------------------------------------------------------------------------

/// Where a dropzone sends its files: a display zone, or the zone editor's
/// content-adding dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    Zone(ZoneId),
    Modal,
}

impl UploadTarget {
    /// Value of the `zone` field in the multipart submission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zone(zone) => zone.as_str(),
            Self::Modal => MODAL_TARGET,
        }
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ZoneId> for UploadTarget {
    fn from(zone: ZoneId) -> Self {
        Self::Zone(zone)
    }
}

// ---------------------------------------------------------------------------
// ContentItem
// ---------------------------------------------------------------------------

/// Kind of media a content item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Image,
    Video,
    Url,
    /// Anything the backend reports that the admin does not render specially
    /// (e.g. `audio`, `unknown`).
    #[serde(other)]
    Other,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Url => "url",
            Self::Other => "other",
        }
    }
}

/// One media entry of a zone's rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: String,
    #[serde(rename = "duration", default = "default_duration")]
    pub duration_seconds: Seconds,
    #[serde(default)]
    pub order: u32,
}

impl ContentItem {
    /// The title when set and non-empty, otherwise the file name.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.filename,
        }
    }

    /// Thumbnail source: the item itself for images, a placeholder otherwise.
    pub fn thumbnail(&self) -> &str {
        if self.kind == ContentType::Image {
            &self.src
        } else {
            VIDEO_PLACEHOLDER
        }
    }
}

/// Position assignment for one item, as sent in `content_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentOrderEntry {
    pub id: ItemId,
    pub order: u32,
}

// ---------------------------------------------------------------------------
// ZoneConfig
// ---------------------------------------------------------------------------

/// Full configuration of one zone as returned by `GET /api/admin/zone/{zone}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    #[serde(rename = "zone")]
    pub zone_id: ZoneId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "duration", default = "default_duration")]
    pub duration_seconds: Seconds,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

impl ZoneConfig {
    /// An empty, disabled zone with default settings.
    pub fn empty(zone_id: ZoneId) -> Self {
        Self {
            zone_id,
            title: String::new(),
            duration_seconds: DEFAULT_DURATION_SECS,
            enabled: false,
            content: Vec::new(),
        }
    }

    /// The editable settings of this zone.
    pub fn settings(&self) -> ZoneSettings {
        ZoneSettings {
            title: self.title.clone(),
            duration_seconds: self.duration_seconds,
            enabled: self.enabled,
        }
    }
}

/// The fields of the zone editor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSettings {
    pub title: String,
    pub duration_seconds: Seconds,
    pub enabled: bool,
}

/// Body of `POST /api/admin/zone/{zone}`.
///
/// `content_order` is empty when no reorder is pending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSaveRequest {
    pub title: String,
    #[serde(rename = "duration")]
    pub duration_seconds: Seconds,
    pub enabled: bool,
    pub content_order: Vec<ContentOrderEntry>,
}

impl ZoneSaveRequest {
    pub fn new(settings: &ZoneSettings, content_order: Vec<ContentOrderEntry>) -> Self {
        Self {
            title: settings.title.clone(),
            duration_seconds: settings.duration_seconds,
            enabled: settings.enabled,
            content_order,
        }
    }
}

// ---------------------------------------------------------------------------
// ZonePreview
// ---------------------------------------------------------------------------

/// Summary shown on the admin's mockup of the display layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePreview {
    pub zone: ZoneId,
    pub count: usize,
    /// First item's source when it is an image.
    pub background: Option<String>,
}

impl ZonePreview {
    pub fn from_content(zone: ZoneId, content: &[ContentItem]) -> Self {
        let background = content
            .first()
            .filter(|item| item.kind == ContentType::Image)
            .map(|item| item.src.clone());
        Self {
            zone,
            count: content.len(),
            background,
        }
    }

    pub fn has_content(&self) -> bool {
        self.count > 0
    }

    /// `1 élément`, `0 éléments`, `3 éléments`.
    pub fn count_label(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!("{} élément{plural}", self.count)
    }

    /// Icon class: images when populated, an add icon otherwise.
    pub fn icon(&self) -> &'static str {
        if self.has_content() {
            "fas fa-images"
        } else {
            "fas fa-plus"
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
