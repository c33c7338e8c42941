//! HTTP adapters for the clip API and object storage.

pub mod client;
pub mod object_store;

pub use client::HttpClipApi;
pub use object_store::PresignedObjectStore;
