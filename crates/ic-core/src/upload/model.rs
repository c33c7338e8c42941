//! Upload pipeline value types.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Where the file to upload comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSource {
    MediaLibrary,
    Camera,
    Document,
}

impl UploadSource {
    /// The platform capability this source needs, if any. The document
    /// picker runs without an explicit permission prompt.
    pub fn required_capability(&self) -> Option<Capability> {
        match self {
            UploadSource::MediaLibrary => Some(Capability::MediaLibrary),
            UploadSource::Camera => Some(Capability::Camera),
            UploadSource::Document => None,
        }
    }
}

/// Platform capability the upload flow may have to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Camera,
    MediaLibrary,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Camera => write!(f, "camera"),
            Capability::MediaLibrary => write!(f, "camera roll"),
        }
    }
}

/// Result of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
}

/// Options passed to the file picker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PickOptions {
    /// Camera capture quality in `[0.0, 1.0]`; ignored by other sources.
    pub quality: f64,
}

/// Result of opening a picker. Cancellation is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Picked(PickedFile),
    Cancelled,
}

/// A file acquired from a picker, fully materialized in memory.
///
/// Uploads are capped well below anything that would make holding the
/// bytes here a problem; the size check runs before any network call.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub bytes: Bytes,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        let size = bytes.len() as u64;
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
            bytes,
        }
    }
}

/// Pre-signed upload descriptor issued by the API for one file.
///
/// Used exactly once: the fields are posted verbatim alongside the file
/// bytes, then the ticket is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTicket {
    /// Object storage endpoint to POST the multipart form to.
    pub url: String,
    /// Form fields in the order the API returned them.
    pub fields: Vec<(String, String)>,
}

impl UploadTicket {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The object key the file will be stored under.
    pub fn object_key(&self) -> Option<&str> {
        self.field("key")
    }
}
