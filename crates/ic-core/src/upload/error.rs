//! Upload failure taxonomy.
//!
//! Each variant carries the user-facing message for the stage that failed.
//! A failed attempt always returns the pipeline to an idle, retryable
//! state; nothing here is fatal to the process.

use thiserror::Error;

use crate::upload::model::Capability;

/// Failure reported by the object storage service or the transfer to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Storage rejected the object as too large; the payload is the
    /// human-readable proposed size from the XML envelope.
    #[error("File too large ({0})")]
    EntityTooLarge(String),

    /// The pre-signed credentials did not grant access to the bucket.
    #[error("Access Denied to the bucket")]
    AccessDenied,

    /// Any other storage-side rejection.
    #[error("Upload failed.")]
    Rejected,

    /// Network-level failure while transferring the bytes.
    #[error("network error: {0}")]
    Transport(String),
}

/// Failure of one upload attempt, by pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The platform refused the capability. Fails closed; the user has to
    /// re-initiate the upload after granting access.
    #[error("Permission to access the {0} is required!")]
    PermissionDenied(Capability),

    /// The file exceeds the upload ceiling. Checked before any network
    /// call; both sizes are part of the message.
    #[error("File size limit exceeded, your file has {size}, but the limit is {limit_mb} MB")]
    TooLarge { size: String, limit_mb: u64 },

    /// The pre-signed credential request failed.
    #[error("{0}")]
    Ticket(String),

    /// The transfer to object storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The uploaded object could not be registered as a clip.
    #[error("Clip creation failed: {0}")]
    Registration(String),
}

impl UploadError {
    /// Build the size-limit error with the file size already formatted.
    pub fn too_large(size_bytes: u64, limit_mb: u64) -> Self {
        UploadError::TooLarge {
            size: crate::format::format_bytes(size_bytes),
            limit_mb,
        }
    }
}
