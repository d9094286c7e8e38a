//! Zone editor: open, load, edit, reorder, save, close.
//!
//! Every request started for an editor carries the [`ZoneSessionToken`]
//! issued when that editor was opened; a response whose token is no longer
//! current is dropped.

use teaser_core::notification::Notification;
use teaser_core::session::{Section, ZoneField, ZoneSessionToken};
use teaser_core::zone::ZoneId;

use crate::controller::AdminController;

impl AdminController {
    pub async fn open_zone(&self, zone: ZoneId) {
        let token = self.session().await.open_zone(zone);
        self.view.open_zone_editor(zone, &zone.editor_title());
        self.load_zone(token, zone).await;
    }

    /// Close without saving. Any pending order is discarded.
    pub async fn close_zone(&self) {
        if let Some(zone) = self.session().await.close_zone() {
            tracing::debug!(zone = %zone, "Zone editor closed");
        }
        self.view.close_zone_editor();
    }

    /// Re-fetch the open editor's zone, if any.
    pub(crate) async fn reload_open_zone(&self) {
        let current = {
            let session = self.session().await;
            session.current_token().zip(session.open_zone_id())
        };
        if let Some((token, zone)) = current {
            self.load_zone(token, zone).await;
        }
    }

    async fn load_zone(&self, token: ZoneSessionToken, zone: ZoneId) {
        match self.backend.get_zone(zone).await {
            Ok(config) => {
                let mut session = self.session().await;
                if !session.apply_zone_load(token, config) {
                    tracing::debug!(zone = %zone, %token, "Discarding stale zone response");
                    return;
                }
                if let (Some(settings), Some(items)) = (session.zone_settings(), session.zone_content()) {
                    self.view.render_zone_editor(zone, settings, items);
                }
            }
            Err(err) => {
                tracing::warn!(zone = %zone, error = %err, "Failed to load zone");
                if self.session().await.is_current(token) {
                    self.view
                        .notify(Notification::error("Erreur de chargement de la zone"));
                }
            }
        }
    }

    pub async fn edit_zone(&self, field: ZoneField, value: &str) {
        let (result, loading) = {
            let mut session = self.session().await;
            let loading = session.is_zone_loading();
            (session.set_zone_field(field, value), loading)
        };
        match result {
            Ok(()) => self.view.set_unsaved(true),
            Err(err) if loading => {
                tracing::debug!(?field, error = %err, "Zone edit refused, editor still loading");
                self.view
                    .notify(Notification::warning("Zone en cours de chargement"));
            }
            Err(err) => {
                tracing::debug!(?field, error = %err, "Zone edit rejected");
                self.view
                    .notify(Notification::warning(format!("Valeur invalide: {value}")));
            }
        }
    }

    /// Apply a completed drag. No network call.
    pub async fn move_content(&self, from: usize, to: usize) {
        let mut session = self.session().await;
        if !session.reorder(from, to) {
            return;
        }
        if let (Some(zone), Some(settings), Some(items)) = (
            session.open_zone_id(),
            session.zone_settings(),
            session.zone_content(),
        ) {
            self.view.render_zone_editor(zone, settings, items);
        }
        drop(session);
        self.view.set_unsaved(true);
    }

    /// Save the open zone's settings and pending order. No-op when no
    /// editor is open; refused while its detail is still loading.
    pub async fn save_zone(&self) {
        let (ticket, loading) = {
            let session = self.session().await;
            (session.zone_save_ticket(), session.is_zone_loading())
        };
        let Some(ticket) = ticket else {
            if loading {
                tracing::debug!("Zone save refused, editor still loading");
                self.view
                    .notify(Notification::warning("Zone en cours de chargement"));
            }
            return;
        };

        match self.backend.save_zone(ticket.zone, &ticket.request).await {
            Ok(_) => {
                tracing::info!(
                    zone = %ticket.zone,
                    reordered = !ticket.request.content_order.is_empty(),
                    "Zone saved",
                );
                self.view
                    .notify(Notification::success("Configuration sauvegardée"));

                let closed = {
                    let mut session = self.session().await;
                    session.clear_section(Section::Zone(ticket.zone), ticket.revision);
                    session.close_zone_if_current(ticket.token)
                };
                if closed {
                    self.view.close_zone_editor();
                }
                self.refresh_preview(ticket.zone).await;
                self.sync_unsaved().await;
            }
            Err(err) => self.report_failure("Erreur: ", &err),
        }
    }
}
