//! # ic-app
//!
//! Application layer of the Interclip client: the screen controllers for
//! code resolution and clip creation, the upload orchestrator, and the
//! preference use cases. Everything here talks to the outside world
//! through the ports defined in `ic-core`.

pub mod controllers;
pub mod usecases;

pub use controllers::{CreateState, CreationController, ResolutionController, ResolveState};
pub use usecases::{GetPreferences, UpdatePreferences, UploadOrchestrator, UploadOutcome};
