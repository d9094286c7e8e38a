//! Admin dashboard controller.
//!
//! [`AdminController`] is the single owner of the [`AdminSession`]. Events
//! enter through [`AdminController::dispatch`]; [`AdminController::run`]
//! drains an event channel and the draft-autosave ticker, handling each
//! event as its own task so that slow requests never block other handlers.
//!
//! The session lock is only held between suspension points, never across a
//! backend call.

use std::sync::Arc;

use teaser_client::{AdminBackend, ApiError, TeaserApi};
use teaser_core::notification::Notification;
use teaser_core::session::{AdminSession, Section};
use tokio::sync::{mpsc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::AdminSettings;
use crate::events::AdminEvent;
use crate::view::AdminView;

/// Capacity of the event channel returned by [`AdminController::start`].
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Event-driven controller for the admin dashboard. Cheap to clone.
#[derive(Clone)]
pub struct AdminController {
    pub(crate) backend: Arc<dyn AdminBackend>,
    pub(crate) view: Arc<dyn AdminView>,
    session: Arc<Mutex<AdminSession>>,
    settings: AdminSettings,
}

impl AdminController {
    pub fn new(
        backend: Arc<dyn AdminBackend>,
        view: Arc<dyn AdminView>,
        settings: AdminSettings,
    ) -> Self {
        Self {
            backend,
            view,
            session: Arc::new(Mutex::new(AdminSession::default())),
            settings,
        }
    }

    /// Controller talking HTTP to `settings.backend_url`.
    pub fn connect(view: Arc<dyn AdminView>, settings: AdminSettings) -> Self {
        let api = Arc::new(TeaserApi::new(settings.backend_url.clone()));
        Self::new(api, view, settings)
    }

    pub fn settings(&self) -> &AdminSettings {
        &self.settings
    }

    /// A copy of the current session state.
    pub async fn snapshot(&self) -> AdminSession {
        self.session.lock().await.clone()
    }

    pub(crate) async fn session(&self) -> MutexGuard<'_, AdminSession> {
        self.session.lock().await
    }

    // ---- event loop ----

    /// Handle one event to completion.
    pub async fn dispatch(&self, event: AdminEvent) {
        tracing::debug!(event = event.name(), "Dispatching admin event");

        match event {
            AdminEvent::Load => self.load().await,
            AdminEvent::SelectTab(tab) => self.select_tab(&tab).await,
            AdminEvent::FilesDropped { target, files } => self.handle_files(target, files).await,
            AdminEvent::ConfigEdited { field, value } => self.edit_config(field, &value).await,
            AdminEvent::SaveAll => self.save_all().await,
            AdminEvent::OpenZone(zone) => self.open_zone(zone).await,
            AdminEvent::CloseZone => self.close_zone().await,
            AdminEvent::ZoneEdited { field, value } => self.edit_zone(field, &value).await,
            AdminEvent::ContentMoved { from, to } => self.move_content(from, to).await,
            AdminEvent::SaveZone => self.save_zone().await,
            AdminEvent::DeleteMedia { zone, id } => self.delete_media(zone, id).await,
            AdminEvent::AddUrl { url, title } => self.add_url(&url, &title).await,
            AdminEvent::RefreshStatus => self.refresh_system_status().await,
            AdminEvent::TestWeather => self.test_weather().await,
            AdminEvent::TestTide => self.test_tide().await,
            AdminEvent::TestSelfie => self.test_selfie().await,
            AdminEvent::TestDj => self.test_dj().await,
            AdminEvent::Cleanup => self.cleanup().await,
            AdminEvent::ViewLogs => self.view_logs().await,
            AdminEvent::ViewStats => self.view_stats().await,
            AdminEvent::DownloadBackup => self.download_backup().await,
        }
    }

    /// Drive the controller until `cancel` fires or every sender is dropped.
    ///
    /// Each event runs as a separate task. The autosave ticker first fires
    /// one full interval after start. In-flight handlers are awaited before
    /// returning.
    pub async fn run(self, mut events: mpsc::Receiver<AdminEvent>, cancel: CancellationToken) {
        let tracker = TaskTracker::new();
        let period = self.settings.draft_interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            backend = %self.settings.backend_url,
            draft_interval_secs = period.as_secs(),
            "Admin controller started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Admin controller cancelled");
                    break;
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        tracing::info!("Admin event channel closed");
                        break;
                    };
                    let controller = self.clone();
                    tracker.spawn(async move { controller.dispatch(event).await });
                }
                _ = ticker.tick() => {
                    let controller = self.clone();
                    tracker.spawn(async move { controller.autosave_tick().await });
                }
            }
        }

        tracker.close();
        tracker.wait().await;
    }

    /// Spawn [`run`](Self::run) and return the event sender plus its handle.
    pub fn start(self, cancel: CancellationToken) -> (mpsc::Sender<AdminEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let handle = tokio::spawn(self.run(rx, cancel));
        (tx, handle)
    }

    // ---- shared helpers ----

    /// Mark `section` dirty and reflect it on the save button.
    pub(crate) async fn mark_dirty(&self, section: Section) {
        self.session().await.mark_dirty(section);
        self.view.set_unsaved(true);
    }

    /// Re-sync the save button with the session's dirty flag.
    pub(crate) async fn sync_unsaved(&self) {
        let dirty = self.session().await.is_dirty();
        self.view.set_unsaved(dirty);
    }

    /// Log a failed operation and show `prefix` followed by the error text.
    pub(crate) fn report_failure(&self, prefix: &str, err: &ApiError) {
        tracing::warn!(error = %err, "{prefix}");
        self.view
            .notify(Notification::error(format!("{prefix}{}", err.user_message())));
    }
}
