//! What the admin controller draws on.
//!
//! A browser binding, a terminal front end and the recording double used
//! in tests all implement [`AdminView`]. Rendering calls are synchronous and
//! must not block; only [`AdminView::confirm`] waits for the user.

use async_trait::async_trait;
use teaser_client::dto::LogsResponse;
use teaser_core::notification::Notification;
use teaser_core::settings::{ConfigField, GlobalConfig};
use teaser_core::status::{SystemStatusView, WidgetStatusView};
use teaser_core::zone::{ContentItem, UploadTarget, ZoneId, ZonePreview, ZoneSettings};

/// Placeholder shown for a zone with no media.
pub const NO_MEDIA_TEXT: &str = "Aucun média dans cette zone";

/// Text of the upload progress indicator.
pub const UPLOAD_PROGRESS_TEXT: &str = "Upload en cours...";

#[async_trait]
pub trait AdminView: Send + Sync {
    fn notify(&self, notification: Notification);

    /// Show or hide the upload progress indicator.
    fn set_upload_progress(&self, visible: bool);

    fn set_dropzone_enabled(&self, target: UploadTarget, enabled: bool);

    /// Reflect the `unsaved_changes` flag on the save button.
    fn set_unsaved(&self, unsaved: bool);

    fn show_tab(&self, tab: &str);

    /// Populate every configuration form from `config`.
    fn render_config(&self, config: &GlobalConfig);

    fn set_range_label(&self, field: ConfigField, label: &str);

    /// An empty `items` renders [`NO_MEDIA_TEXT`].
    fn render_media_list(&self, zone: ZoneId, items: &[ContentItem]);

    fn render_zone_preview(&self, preview: &ZonePreview);

    fn render_widget_status(&self, status: &WidgetStatusView);

    fn render_system_status(&self, status: &SystemStatusView);

    /// Open the zone editor dialog with its title, before content loads.
    fn open_zone_editor(&self, zone: ZoneId, title: &str);

    fn render_zone_editor(&self, zone: ZoneId, settings: &ZoneSettings, items: &[ContentItem]);

    fn close_zone_editor(&self);

    fn clear_url_form(&self);

    fn show_logs(&self, logs: &LogsResponse);

    fn show_stats(&self, stats: &serde_json::Value);

    fn offer_backup(&self, bytes: &[u8]);

    /// Ask the user a yes/no question.
    async fn confirm(&self, prompt: &str) -> bool;
}
