//! # ic-infra
//!
//! Infrastructure adapters for the Interclip client: the HTTP clip API
//! client, the pre-signed object storage uploader and the file-backed
//! preference repository. Each implements a port from `ic-core`.

pub mod api;
pub mod settings;

pub use api::{HttpClipApi, PresignedObjectStore};
pub use settings::FilePreferencesRepository;
