//! Error taxonomy for clip API calls.
//!
//! Every transport- or HTTP-level failure is normalized into one of these
//! variants before it reaches a controller; nothing from the network layer
//! is allowed to propagate as an unhandled error.

use thiserror::Error;

/// Normalized outcome of a failed clip API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// HTTP 404 on lookup. Shown as a friendly message instead of a raw
    /// error so typos don't look like outages.
    #[error("This code doesn't seem to exist.")]
    NotFound,

    /// HTTP 429. There is no automatic backoff; the user retries.
    #[error("We are getting too many requests from you.")]
    RateLimited,

    /// Any other non-2xx status with no specific handling.
    #[error("Got the error {0}")]
    Status(u16),

    /// The API answered with an error envelope; the message is server-provided.
    #[error("{0}")]
    Api(String),

    /// Network-level failure: DNS, timeout, connection refused.
    #[error("network error: {0}")]
    Transport(String),
}
