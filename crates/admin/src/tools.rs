//! Tabs, media deletion, URL content, module tests and maintenance actions.

use teaser_client::dto::{
    AddUrlRequest, DjTestRequest, SelfieTestRequest, TideTestRequest, WeatherTestRequest,
};
use teaser_core::notification::Notification;
use teaser_core::session::Section;
use teaser_core::types::ItemId;
use teaser_core::zone::ZoneId;

use crate::controller::AdminController;

pub const CONFIRM_DELETE: &str = "Êtes-vous sûr de vouloir supprimer cet élément ?";
pub const CONFIRM_CLEANUP: &str = "Êtes-vous sûr de vouloir nettoyer les fichiers anciens ?";

impl AdminController {
    pub async fn select_tab(&self, tab: &str) {
        self.session().await.select_tab(tab);
        self.view.show_tab(tab);
    }

    // ---- media ----

    /// Delete one item after confirmation. Never retried.
    pub async fn delete_media(&self, zone: ZoneId, id: ItemId) {
        if !self.view.confirm(CONFIRM_DELETE).await {
            return;
        }

        match self.backend.delete_media(zone, id).await {
            Ok(_) => {
                tracing::info!(zone = %zone, id, "Media item deleted");
                self.view.notify(Notification::success("Élément supprimé"));
                self.reload_media_list(zone).await;
                self.refresh_previews().await;
                self.mark_dirty(Section::Zone(zone)).await;

                let editing = self.session().await.open_zone_id() == Some(zone);
                if editing {
                    self.reload_open_zone().await;
                }
            }
            Err(err) => self.report_failure("Erreur de suppression: ", &err),
        }
    }

    /// Add a URL item to the zone whose editor is open.
    pub async fn add_url(&self, url: &str, title: &str) {
        let zone = self.session().await.open_zone_id();
        let (Some(zone), false) = (zone, url.trim().is_empty()) else {
            self.view
                .notify(Notification::warning("Veuillez remplir l'URL"));
            return;
        };

        let request = AddUrlRequest {
            zone,
            url: url.trim().to_string(),
            title: title.to_string(),
        };
        match self.backend.add_url_content(&request).await {
            Ok(_) => {
                tracing::info!(zone = %zone, url = %request.url, "URL content added");
                self.view
                    .notify(Notification::success("URL ajoutée avec succès"));
                self.view.clear_url_form();
                self.reload_open_zone().await;
                self.mark_dirty(Section::Zone(zone)).await;
            }
            Err(err) => self.report_failure("Erreur: ", &err),
        }
    }

    // ---- module tests ----

    pub async fn test_weather(&self) {
        let request = {
            let session = self.session().await;
            let config = session.config();
            WeatherTestRequest {
                api_key: config.weather_api_key.clone(),
                location: config.weather_location.clone(),
            }
        };
        if request.api_key.is_empty() || request.location.is_empty() {
            self.view.notify(Notification::warning(
                "Veuillez remplir la clé API et la localisation",
            ));
            return;
        }

        match self.backend.test_weather(&request).await {
            Ok(_) => self
                .view
                .notify(Notification::success("API Météo connectée avec succès")),
            Err(err) => self.report_failure("Erreur API Météo: ", &err),
        }
    }

    pub async fn test_tide(&self) {
        let request = {
            let session = self.session().await;
            let config = session.config();
            TideTestRequest {
                api_key: config.tide_api_key.clone(),
                lat: config.tide_lat,
                lon: config.tide_lon,
            }
        };
        if request.api_key.is_empty() {
            self.view
                .notify(Notification::warning("Veuillez remplir tous les champs"));
            return;
        }

        match self.backend.test_tide(&request).await {
            Ok(_) => self
                .view
                .notify(Notification::success("API Marées connectée avec succès")),
            Err(err) => self.report_failure("Erreur API Marées: ", &err),
        }
    }

    pub async fn test_selfie(&self) {
        let path = self.session().await.config().selfie_path.clone();
        if path.is_empty() {
            self.view
                .notify(Notification::warning("Veuillez remplir le chemin des selfies"));
            return;
        }

        match self.backend.test_selfie(&SelfieTestRequest { path }).await {
            Ok(response) => self.view.notify(Notification::success(format!(
                "Module Selfie OK ({} photos trouvées)",
                response.count.unwrap_or(0)
            ))),
            Err(err) => self.report_failure("Erreur Module Selfie: ", &err),
        }
    }

    pub async fn test_dj(&self) {
        let url = self.session().await.config().dj_url.clone();
        if url.is_empty() {
            self.view
                .notify(Notification::warning("Veuillez remplir l'URL du module DJ"));
            return;
        }

        match self.backend.test_dj(&DjTestRequest { url }).await {
            Ok(_) => self.view.notify(Notification::success(
                "Module DJ/Jukebox connecté avec succès",
            )),
            Err(err) => self.report_failure("Erreur Module DJ: ", &err),
        }
    }

    // ---- maintenance ----

    pub async fn cleanup(&self) {
        if !self.view.confirm(CONFIRM_CLEANUP).await {
            return;
        }

        match self.backend.cleanup().await {
            Ok(response) => {
                tracing::info!(deleted = response.deleted_files, "Cleanup complete");
                self.view.notify(Notification::success(format!(
                    "Nettoyage terminé: {} fichiers supprimés",
                    response.deleted_files
                )));
            }
            Err(err) => self.report_failure("Erreur de nettoyage: ", &err),
        }
    }

    pub async fn view_logs(&self) {
        match self.backend.logs().await {
            Ok(logs) => self.view.show_logs(&logs),
            Err(err) => self.report_failure("Erreur de chargement des logs: ", &err),
        }
    }

    pub async fn view_stats(&self) {
        match self.backend.stats().await {
            Ok(stats) => self.view.show_stats(&stats),
            Err(err) => self.report_failure("Erreur de chargement des statistiques: ", &err),
        }
    }

    pub async fn download_backup(&self) {
        match self.backend.backup().await {
            Ok(bytes) => {
                tracing::info!(bytes = bytes.len(), "Backup downloaded");
                self.view.offer_backup(&bytes);
            }
            Err(err) => self.report_failure("Erreur de sauvegarde: ", &err),
        }
    }
}
