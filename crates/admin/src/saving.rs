//! Global config edits, save-all and the draft autosave.

use teaser_core::notification::Notification;
use teaser_core::settings::ConfigField;

use crate::controller::AdminController;

impl AdminController {
    /// Apply one form edit. Unparsable values are refused with a warning.
    pub async fn edit_config(&self, field: ConfigField, value: &str) {
        let result = {
            let mut session = self.session().await;
            session
                .set_config_field(field, value)
                .map(|()| session.config().range_label(field))
        };

        match result {
            Ok(label) => {
                self.view.set_unsaved(true);
                if let Some(label) = label {
                    self.view.set_range_label(field, &label);
                }
            }
            Err(err) => {
                tracing::debug!(field = field.name(), error = %err, "Config edit rejected");
                self.view.notify(Notification::warning(format!(
                    "Valeur invalide pour {}: {value}",
                    field.name()
                )));
            }
        }
    }

    /// Submit the whole config plus the open zone.
    pub async fn save_all(&self) {
        let ticket = self.session().await.config_save_ticket();

        match self.backend.save_all(&ticket.payload).await {
            Ok(_) => {
                tracing::info!(revision = ticket.revision, "Configuration saved");
                self.view
                    .notify(Notification::success("Configuration complète sauvegardée"));
                self.session().await.clear_through(ticket.revision);
                self.sync_unsaved().await;
            }
            Err(err) => self.report_failure("Erreur: ", &err),
        }
    }

    /// One autosave period elapsed. Sends a draft when there are unsaved
    /// edits; never clears the dirty flag and never notifies.
    pub async fn autosave_tick(&self) {
        let ticket = {
            let session = self.session().await;
            if !session.is_dirty() {
                return;
            }
            session.config_save_ticket()
        };

        match self.backend.save_draft(&ticket.payload).await {
            Ok(()) => tracing::debug!(revision = ticket.revision, "Draft saved automatically"),
            Err(err) => tracing::warn!(error = %err, "Draft autosave failed"),
        }
    }
}
