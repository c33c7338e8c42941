//! Port interfaces for the application layer.
//!
//! Ports define the contract between the use cases and the
//! infrastructure/platform implementations, keeping the core logic
//! independent of HTTP, object storage and the host platform.

pub mod clip_api;
pub mod media;
pub mod object_store;
pub mod settings;

pub use clip_api::ClipApiPort;
pub use media::{FilePickerPort, PermissionsPort};
pub use object_store::ObjectStorePort;
pub use settings::SettingsPort;
