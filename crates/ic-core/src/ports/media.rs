//! Platform media ports: permissions and file picking.
//!
//! The original client drove these through callbacks; here they are
//! awaitable operations returning plain result types consumed
//! sequentially by the upload orchestrator.

use async_trait::async_trait;

use crate::upload::{Capability, PermissionDecision, PickOptions, PickOutcome, UploadSource};

/// Asks the platform for a capability. A refusal is a decision, not an
/// error; the orchestrator fails closed on `Denied`.
#[async_trait]
pub trait PermissionsPort: Send + Sync {
    async fn request(&self, capability: Capability) -> PermissionDecision;
}

/// Opens the platform picker for a source and resolves once the user
/// picked a file or backed out.
#[async_trait]
pub trait FilePickerPort: Send + Sync {
    async fn pick(&self, source: UploadSource, options: &PickOptions) -> PickOutcome;
}
