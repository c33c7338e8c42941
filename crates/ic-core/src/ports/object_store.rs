//! Object storage port.

use async_trait::async_trait;

use crate::upload::{PickedFile, StorageError, UploadTicket};

/// Direct-to-storage upload using pre-signed credentials, bypassing the
/// application server for the file bytes.
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    async fn upload(&self, ticket: &UploadTicket, file: &PickedFile) -> Result<(), StorageError>;
}
