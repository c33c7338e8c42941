//! Clip API port.

use async_trait::async_trait;

use crate::clip::{Clip, ClipError, ClipSignature};
use crate::upload::UploadTicket;

/// The remote clip service, as seen by controllers and orchestrators.
///
/// Implementations normalize every transport and HTTP-status outcome into
/// [`ClipError`]; callers never see a raw HTTP error. There is no retry
/// logic behind this trait, so a returned error means the attempt is over.
#[async_trait]
pub trait ClipApiPort: Send + Sync {
    /// Resolve a code to its clip.
    async fn resolve(&self, code: &str) -> Result<Clip, ClipError>;

    /// Create a clip for a URL, optionally carrying an ownership
    /// attestation the server understands.
    async fn create(
        &self,
        url: &str,
        signature: Option<ClipSignature>,
    ) -> Result<Clip, ClipError>;

    /// Request pre-signed upload credentials for a filename/content-type
    /// pair. The ticket is single-use.
    async fn request_upload(
        &self,
        name: &str,
        content_type: &str,
    ) -> Result<UploadTicket, ClipError>;
}
