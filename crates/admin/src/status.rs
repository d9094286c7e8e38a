//! Initial load, media lists, zone previews and status indicators.
//!
//! Nothing here surfaces a fetch failure as an error: status widgets
//! degrade to offline and lists keep their previous rendering.

use futures::future::join_all;
use teaser_core::notification::Notification;
use teaser_core::status::{SystemStatusView, WidgetStatusView};
use teaser_core::zone::{ZoneId, ZonePreview};

use crate::controller::AdminController;

impl AdminController {
    /// Page load. Config, media lists, previews and system status are
    /// fetched concurrently; only a config failure is reported.
    pub async fn load(&self) {
        let (config, (), (), ()) = tokio::join!(
            self.load_config(),
            self.load_all_media_lists(),
            self.refresh_previews(),
            self.refresh_system_status(),
        );

        if let Err(err) = config {
            tracing::error!(error = %err, "Initial data load failed");
            self.view
                .notify(Notification::error("Erreur de chargement des données"));
        }
    }

    /// Edits made while the request is in flight win over the response.
    async fn load_config(&self) -> Result<(), teaser_client::ApiError> {
        let since = self.session().await.revision();
        let config = self.backend.get_config().await?;

        let mut session = self.session().await;
        if !session.load_config_since(config.clone(), since) {
            tracing::debug!("Discarding config response older than form edits");
            return Ok(());
        }
        drop(session);

        self.view.render_config(&config);
        tracing::debug!(location = %config.weather_location, "Configuration loaded");
        Ok(())
    }

    async fn load_all_media_lists(&self) {
        join_all(ZoneId::ALL.into_iter().map(|zone| self.reload_media_list(zone))).await;
    }

    /// Fetch and render one zone's media list and its preview count.
    pub(crate) async fn reload_media_list(&self, zone: ZoneId) {
        match self.backend.list_media(zone).await {
            Ok(items) => {
                self.view.render_media_list(zone, &items);
                if !items.is_empty() {
                    self.view
                        .render_zone_preview(&ZonePreview::from_content(zone, &items));
                }
            }
            Err(err) => tracing::warn!(zone = %zone, error = %err, "Failed to load media list"),
        }
    }

    /// Refresh one zone's preview on the layout mockup.
    pub(crate) async fn refresh_preview(&self, zone: ZoneId) {
        match self.backend.list_media(zone).await {
            Ok(items) => self
                .view
                .render_zone_preview(&ZonePreview::from_content(zone, &items)),
            Err(err) => tracing::warn!(zone = %zone, error = %err, "Failed to refresh zone preview"),
        }
    }

    /// Refresh every zone preview, then the widget status.
    pub(crate) async fn refresh_previews(&self) {
        join_all(ZoneId::ALL.into_iter().map(|zone| self.refresh_preview(zone))).await;
        self.refresh_widget_status().await;
    }

    pub async fn refresh_widget_status(&self) {
        let view = match self.backend.widget_status().await {
            Ok(status) => WidgetStatusView::render(&status),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch widget status");
                WidgetStatusView::offline()
            }
        };
        self.view.render_widget_status(&view);
    }

    pub async fn refresh_system_status(&self) {
        let view = match self.backend.system_status().await {
            Ok(status) => SystemStatusView::render(&status),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch system status");
                SystemStatusView::offline()
            }
        };
        self.view.render_system_status(&view);
    }
}
