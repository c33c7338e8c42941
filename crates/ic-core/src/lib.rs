//! # ic-core
//!
//! Core domain models and business logic for the Interclip client.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: clip models, input validators, the upload state machine
//! and the port traits implemented by the infrastructure layer.

pub mod clip;
pub mod config;
pub mod format;
pub mod ports;
pub mod settings;
pub mod upload;
pub mod validate;

// Re-export commonly used types at the crate root
pub use clip::{Clip, ClipError, ClipSignature, OEmbed};
pub use config::ClipConfig;
pub use settings::Preferences;
pub use upload::{
    Capability, PermissionDecision, PickOptions, PickOutcome, PickedFile, StorageError,
    UploadAction, UploadError, UploadEvent, UploadSource, UploadState, UploadStateMachine,
    UploadTicket,
};
pub use validate::{validate_code, validate_url, CodeValidation, UrlValidation};
