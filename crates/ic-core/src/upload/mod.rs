//! File upload domain: sources, errors and the upload state machine.

pub mod error;
pub mod model;
pub mod state_machine;

pub use error::{StorageError, UploadError};
pub use model::{
    Capability, PermissionDecision, PickOptions, PickOutcome, PickedFile, UploadSource,
    UploadTicket,
};
pub use state_machine::{UploadAction, UploadEvent, UploadState, UploadStateMachine};
