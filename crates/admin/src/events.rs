use teaser_core::session::ZoneField;
use teaser_core::settings::ConfigField;
use teaser_core::types::ItemId;
use teaser_core::upload::CandidateFile;
use teaser_core::zone::{UploadTarget, ZoneId};

/// A user action on the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminEvent {
    /// Page load: config, media lists, previews and status.
    Load,
    SelectTab(String),

    /// Files picked or dropped on a dropzone.
    FilesDropped {
        target: UploadTarget,
        files: Vec<CandidateFile>,
    },

    ConfigEdited {
        field: ConfigField,
        value: String,
    },
    SaveAll,

    OpenZone(ZoneId),
    CloseZone,
    ZoneEdited {
        field: ZoneField,
        value: String,
    },
    /// A drag in the zone editor completed.
    ContentMoved {
        from: usize,
        to: usize,
    },
    SaveZone,

    DeleteMedia {
        zone: ZoneId,
        id: ItemId,
    },
    AddUrl {
        url: String,
        title: String,
    },

    RefreshStatus,
    TestWeather,
    TestTide,
    TestSelfie,
    TestDj,
    Cleanup,
    ViewLogs,
    ViewStats,
    DownloadBackup,
}

impl AdminEvent {
    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::SelectTab(_) => "select_tab",
            Self::FilesDropped { .. } => "files_dropped",
            Self::ConfigEdited { .. } => "config_edited",
            Self::SaveAll => "save_all",
            Self::OpenZone(_) => "open_zone",
            Self::CloseZone => "close_zone",
            Self::ZoneEdited { .. } => "zone_edited",
            Self::ContentMoved { .. } => "content_moved",
            Self::SaveZone => "save_zone",
            Self::DeleteMedia { .. } => "delete_media",
            Self::AddUrl { .. } => "add_url",
            Self::RefreshStatus => "refresh_status",
            Self::TestWeather => "test_weather",
            Self::TestTide => "test_tide",
            Self::TestSelfie => "test_selfie",
            Self::TestDj => "test_dj",
            Self::Cleanup => "cleanup",
            Self::ViewLogs => "view_logs",
            Self::ViewStats => "view_stats",
            Self::DownloadBackup => "download_backup",
        }
    }
}
