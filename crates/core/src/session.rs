//! Per-admin mutable state.
//!
//! [`AdminSession`] owns the global config, the dirty bookkeeping, the zone
//! editor that is currently open, the active tab and the dropzones with an
//! upload in flight. Callers hold it behind a lock and never across a
//! network call; every response is applied against the state as it is when
//! the response lands.
//!
//! Dirty tracking is per section and revisioned: each edit bumps a counter,
//! and a save only clears sections whose last edit is not newer than the
//! revision captured when the save started.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::CoreError;
use crate::reorder::{assign_order, move_item};
use crate::settings::{ConfigField, ConfigPayload, GlobalConfig};
use crate::zone::{ContentItem, ContentOrderEntry, UploadTarget, ZoneConfig, ZoneId, ZoneSaveRequest, ZoneSettings};

/// Tab shown when the admin page loads.
pub const DEFAULT_TAB: &str = "dashboard";

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// A part of the admin state that can carry unsaved edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Global,
    Zone(ZoneId),
}

/// Edit counter value.
pub type Revision = u64;

/// Generation of a zone editor opening. A response carrying an older token
/// than the current one is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneSessionToken(u64);

impl fmt::Display for ZoneSessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Zone editor form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneField {
    Title,
    Duration,
    Enabled,
}

// ---------------------------------------------------------------------------
// Open zone editor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct OpenZone {
    token: ZoneSessionToken,
    zone: ZoneId,
    /// `None` until the detail request completes.
    loaded: Option<ZoneConfig>,
    settings: ZoneSettings,
    pending_order: Option<Vec<ContentOrderEntry>>,
}

impl OpenZone {
    fn save_request(&self) -> ZoneSaveRequest {
        ZoneSaveRequest::new(&self.settings, self.pending_order.clone().unwrap_or_default())
    }
}

/// Snapshot handed to a zone save.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSaveTicket {
    pub token: ZoneSessionToken,
    pub zone: ZoneId,
    pub revision: Revision,
    pub request: ZoneSaveRequest,
}

/// Snapshot handed to a global save or a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSaveTicket {
    pub revision: Revision,
    pub payload: ConfigPayload,
}

// ---------------------------------------------------------------------------
// AdminSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AdminSession {
    config: GlobalConfig,
    revision: Revision,
    dirty: BTreeMap<Section, Revision>,
    issued_tokens: u64,
    open_zone: Option<OpenZone>,
    active_tab: String,
    uploads_in_flight: HashSet<UploadTarget>,
}

impl Default for AdminSession {
    fn default() -> Self {
        Self::new(GlobalConfig::default())
    }
}

impl AdminSession {
    pub fn new(config: GlobalConfig) -> Self {
        Self {
            config,
            revision: 0,
            dirty: BTreeMap::new(),
            issued_tokens: 0,
            open_zone: None,
            active_tab: DEFAULT_TAB.to_string(),
            uploads_in_flight: HashSet::new(),
        }
    }

    // ---- global config ----

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Install a config loaded from the backend, fetched when the session
    /// was at `since`. Not an edit. Returns `false` and keeps the form when
    /// the global section was edited after `since`.
    pub fn load_config_since(&mut self, config: GlobalConfig, since: Revision) -> bool {
        if self.dirty.get(&Section::Global).is_some_and(|&edited| edited > since) {
            return false;
        }
        self.config = config;
        true
    }

    /// Apply one form edit; marks the global section dirty on success.
    pub fn set_config_field(&mut self, field: ConfigField, raw: &str) -> Result<(), CoreError> {
        self.config.set_field(field, raw)?;
        self.mark_dirty(Section::Global);
        Ok(())
    }

    // ---- dirty tracking ----

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn mark_dirty(&mut self, section: Section) -> Revision {
        self.revision += 1;
        self.dirty.insert(section, self.revision);
        self.revision
    }

    /// The `unsaved_changes` flag.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn is_section_dirty(&self, section: Section) -> bool {
        self.dirty.contains_key(&section)
    }

    pub fn dirty_sections(&self) -> Vec<Section> {
        self.dirty.keys().copied().collect()
    }

    /// Clear `section` unless it was edited after `revision`.
    pub fn clear_section(&mut self, section: Section, revision: Revision) {
        if self.dirty.get(&section).is_some_and(|&edited| edited <= revision) {
            self.dirty.remove(&section);
        }
    }

    /// Clear every section not edited after `revision`.
    pub fn clear_through(&mut self, revision: Revision) {
        self.dirty.retain(|_, edited| *edited > revision);
    }

    // ---- zone editor ----

    /// Open the editor for `zone`, replacing any open editor and its pending
    /// order.
    pub fn open_zone(&mut self, zone: ZoneId) -> ZoneSessionToken {
        self.issued_tokens += 1;
        let token = ZoneSessionToken(self.issued_tokens);
        let settings = ZoneConfig::empty(zone).settings();
        self.open_zone = Some(OpenZone {
            token,
            zone,
            loaded: None,
            settings,
            pending_order: None,
        });
        token
    }

    /// Close the editor. A pending order is dropped.
    pub fn close_zone(&mut self) -> Option<ZoneId> {
        self.open_zone.take().map(|open| open.zone)
    }

    /// Close the editor only if `token` still identifies it.
    pub fn close_zone_if_current(&mut self, token: ZoneSessionToken) -> bool {
        if self.is_current(token) {
            self.open_zone = None;
            true
        } else {
            false
        }
    }

    pub fn is_current(&self, token: ZoneSessionToken) -> bool {
        self.open_zone.as_ref().is_some_and(|open| open.token == token)
    }

    pub fn open_zone_id(&self) -> Option<ZoneId> {
        self.open_zone.as_ref().map(|open| open.zone)
    }

    pub fn current_token(&self) -> Option<ZoneSessionToken> {
        self.open_zone.as_ref().map(|open| open.token)
    }

    /// Install a zone detail response. Returns `false` and changes nothing
    /// when the response is stale.
    pub fn apply_zone_load(&mut self, token: ZoneSessionToken, config: ZoneConfig) -> bool {
        match self.open_zone.as_mut() {
            Some(open) if open.token == token && open.zone == config.zone_id => {
                open.settings = config.settings();
                open.pending_order = None;
                open.loaded = Some(config);
                true
            }
            _ => false,
        }
    }

    pub fn zone_content(&self) -> Option<&[ContentItem]> {
        self.open_zone
            .as_ref()
            .and_then(|open| open.loaded.as_ref())
            .map(|config| config.content.as_slice())
    }

    pub fn zone_settings(&self) -> Option<&ZoneSettings> {
        self.open_zone.as_ref().map(|open| &open.settings)
    }

    pub fn pending_order(&self) -> Option<&[ContentOrderEntry]> {
        self.open_zone
            .as_ref()
            .and_then(|open| open.pending_order.as_deref())
    }

    /// Apply a completed drag in the open editor. Returns `false` for no-op
    /// drags, which leave the session untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let Some(open) = self.open_zone.as_mut() else {
            return false;
        };
        let Some(loaded) = open.loaded.as_mut() else {
            return false;
        };
        if !move_item(&mut loaded.content, from, to) {
            return false;
        }
        open.pending_order = Some(assign_order(&mut loaded.content));
        let zone = open.zone;
        self.mark_dirty(Section::Zone(zone));
        true
    }

    /// Edit one setting of the open zone. Rejected until the zone's detail
    /// has loaded.
    pub fn set_zone_field(&mut self, field: ZoneField, raw: &str) -> Result<(), CoreError> {
        let open = self
            .open_zone
            .as_mut()
            .ok_or_else(|| CoreError::Validation("No zone editor is open".to_string()))?;
        if open.loaded.is_none() {
            return Err(CoreError::Validation(format!(
                "zone {} is still loading",
                open.zone
            )));
        }

        match field {
            ZoneField::Title => open.settings.title = raw.to_string(),
            ZoneField::Duration => {
                let seconds: u32 = raw.trim().parse().map_err(|_| {
                    CoreError::Validation(format!("duration must be a positive integer, got '{raw}'"))
                })?;
                if seconds == 0 {
                    return Err(CoreError::Validation(
                        "duration must be a positive integer, got '0'".to_string(),
                    ));
                }
                open.settings.duration_seconds = seconds;
            }
            ZoneField::Enabled => {
                open.settings.enabled = match raw.trim() {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(CoreError::Validation(format!(
                            "enabled must be 'true' or 'false', got '{raw}'"
                        )))
                    }
                }
            }
        }

        let zone = open.zone;
        self.mark_dirty(Section::Zone(zone));
        Ok(())
    }

    /// Snapshot the open zone for saving. `None` when no editor is open or
    /// its detail has not loaded yet.
    pub fn zone_save_ticket(&self) -> Option<ZoneSaveTicket> {
        self.loaded_zone().map(|open| ZoneSaveTicket {
            token: open.token,
            zone: open.zone,
            revision: self.revision,
            request: open.save_request(),
        })
    }

    /// Snapshot the whole config plus the open zone, if loaded.
    pub fn config_save_ticket(&self) -> ConfigSaveTicket {
        let mut zones = BTreeMap::new();
        if let Some(open) = self.loaded_zone() {
            zones.insert(open.zone, open.save_request());
        }
        ConfigSaveTicket {
            revision: self.revision,
            payload: self.config.to_payload(zones),
        }
    }

    fn loaded_zone(&self) -> Option<&OpenZone> {
        self.open_zone.as_ref().filter(|open| open.loaded.is_some())
    }

    /// An editor is open but its detail request has not completed.
    pub fn is_zone_loading(&self) -> bool {
        self.open_zone.as_ref().is_some_and(|open| open.loaded.is_none())
    }

    // ---- uploads ----

    /// Claim a dropzone for an upload. `false` if it is already busy.
    pub fn begin_upload(&mut self, target: UploadTarget) -> bool {
        self.uploads_in_flight.insert(target)
    }

    pub fn finish_upload(&mut self, target: UploadTarget) {
        self.uploads_in_flight.remove(&target);
    }

    pub fn is_uploading(&self, target: UploadTarget) -> bool {
        self.uploads_in_flight.contains(&target)
    }

    pub fn uploads_in_flight(&self) -> usize {
        self.uploads_in_flight.len()
    }

    // ---- tabs ----

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    /// Returns `false` when `tab` was already active.
    pub fn select_tab(&mut self, tab: &str) -> bool {
        if self.active_tab == tab {
            return false;
        }
        self.active_tab = tab.to_string();
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
