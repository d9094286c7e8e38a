//! Upload screening for dropzone batches.
//!
//! A batch comes from a file picker or a drag-drop event. Every file is
//! checked individually against the media allow-list and the size ceiling;
//! a rejected file never aborts the rest of the batch.

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::zone::UploadTarget;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// MIME types accepted by the upload endpoint.
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/webm",
    "video/ogg",
];

/// Per-file size ceiling (50 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// MIME type reported for extensions we cannot map.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Candidate files
// ---------------------------------------------------------------------------

/// Where the bytes of a candidate file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileData {
    Bytes(Vec<u8>),
    /// Read when the multipart body is built.
    Path(PathBuf),
}

/// A file offered to a dropzone, before screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub mime: String,
    /// Size as reported by the picker or the filesystem.
    pub size: u64,
    pub data: FileData,
}

impl CandidateFile {
    /// A file held in memory; its size is the buffer length.
    pub fn in_memory(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            data: FileData::Bytes(bytes),
        }
    }

    /// Describe a file on disk. Only metadata is read here; the MIME type is
    /// inferred from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(CoreError::Validation(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = path
            .extension()
            .and_then(|ext| mime_from_extension(&ext.to_string_lossy()))
            .unwrap_or(UNKNOWN_MIME)
            .to_string();

        Ok(Self {
            name,
            mime,
            size: metadata.len(),
            data: FileData::Path(path.to_path_buf()),
        })
    }
}

/// Map a file extension (case-insensitive) to one of the media MIME types.
pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "ogg" | "ogv" => Some("video/ogg"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Screening
// ---------------------------------------------------------------------------

/// Why a file was left out of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedType,
    TooLarge,
}

/// A file excluded from a batch, with the warning to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub name: String,
    pub reason: RejectReason,
}

impl RejectedFile {
    pub fn warning(&self) -> String {
        match self.reason {
            RejectReason::UnsupportedType => format!("Type de fichier non supporté: {}", self.name),
            RejectReason::TooLarge => format!("Fichier trop volumineux: {}", self.name),
        }
    }
}

/// Outcome of screening a batch for one dropzone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    pub target: UploadTarget,
    /// Files to submit, unmodified and in their original order.
    pub accepted: Vec<CandidateFile>,
    pub rejected: Vec<RejectedFile>,
}

impl UploadBatch {
    pub fn is_submittable(&self) -> bool {
        !self.accepted.is_empty()
    }
}

/// Check one file. The type check runs before the size check.
pub fn check_file(file: &CandidateFile) -> Result<(), RejectReason> {
    if !ALLOWED_MEDIA_TYPES.contains(&file.mime.as_str()) {
        return Err(RejectReason::UnsupportedType);
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(RejectReason::TooLarge);
    }
    Ok(())
}

/// Split a batch into the files to submit and the files to warn about.
pub fn screen_batch(target: UploadTarget, files: Vec<CandidateFile>) -> UploadBatch {
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();

    for file in files {
        match check_file(&file) {
            Ok(()) => accepted.push(file),
            Err(reason) => rejected.push(RejectedFile {
                name: file.name,
                reason,
            }),
        }
    }

    UploadBatch {
        target,
        accepted,
        rejected,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
