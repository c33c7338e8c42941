//! Application use cases.

pub mod preferences;
pub mod upload_file;

pub use preferences::{GetPreferences, UpdatePreferences};
pub use upload_file::{UploadOrchestrator, UploadOutcome};
