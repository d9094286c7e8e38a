//! Dropzone uploads.

use teaser_core::notification::Notification;
use teaser_core::session::Section;
use teaser_core::upload::{screen_batch, CandidateFile};
use teaser_core::zone::UploadTarget;

use crate::controller::AdminController;

impl AdminController {
    /// Screen a dropped batch and submit the accepted files as one request.
    ///
    /// A dropzone with an upload in flight refuses new batches. Rejected
    /// files are reported one warning each; if none survive, nothing is sent.
    pub async fn handle_files(&self, target: UploadTarget, files: Vec<CandidateFile>) {
        if files.is_empty() {
            return;
        }
        if self.session().await.is_uploading(target) {
            tracing::debug!(target_zone = %target, "Dropzone busy, batch refused");
            return;
        }

        let batch = screen_batch(target, files);
        for rejected in &batch.rejected {
            tracing::info!(target_zone = %target, file = %rejected.name, reason = ?rejected.reason, "File rejected");
            self.view.notify(Notification::warning(rejected.warning()));
        }
        if !batch.is_submittable() {
            return;
        }

        if !self.session().await.begin_upload(target) {
            tracing::debug!(target_zone = %target, "Dropzone busy, batch refused");
            return;
        }
        self.view.set_dropzone_enabled(target, false);
        self.view.set_upload_progress(true);

        let result = self.backend.upload(&batch).await;

        let (remaining, open_zone) = {
            let mut session = self.session().await;
            session.finish_upload(target);
            (session.uploads_in_flight(), session.open_zone_id())
        };
        self.view.set_dropzone_enabled(target, true);
        if remaining == 0 {
            self.view.set_upload_progress(false);
        }

        match result {
            Ok(response) => {
                tracing::info!(
                    target_zone = %target,
                    uploaded = response.uploaded_count,
                    "Upload complete",
                );
                self.view.notify(Notification::success(format!(
                    "{} fichier(s) uploadé(s)",
                    response.uploaded_count
                )));

                match target {
                    UploadTarget::Zone(zone) => {
                        self.mark_dirty(Section::Zone(zone)).await;
                        self.reload_media_list(zone).await;
                        self.refresh_previews().await;
                    }
                    UploadTarget::Modal => {
                        let section = open_zone.map(Section::Zone).unwrap_or(Section::Global);
                        self.mark_dirty(section).await;
                        self.reload_open_zone().await;
                    }
                }
            }
            Err(err) => self.report_failure("Erreur d'upload: ", &err),
        }
    }
}
