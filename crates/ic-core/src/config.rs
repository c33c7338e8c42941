//! Client configuration.

use std::time::Duration;

/// Static configuration for the clip API client and upload pipeline.
///
/// The defaults mirror the production Interclip deployment; deployments
/// with their own API host override the endpoints and keep the rest.
#[derive(Debug, Clone)]
pub struct ClipConfig {
    /// Base URL of the clip API, without a trailing slash.
    pub api_endpoint: String,
    /// Base URL of the file storage host, without a trailing slash.
    pub files_endpoint: String,
    /// Codes shorter than this are incomplete input.
    pub minimum_code_length: usize,
    /// Codes longer than this are rejected outright.
    pub maximum_code_length: usize,
    /// Upload size ceiling in bytes, checked before any network call.
    pub upload_limit_bytes: u64,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://interclip.app".to_string(),
            files_endpoint: "https://files.interclip.app".to_string(),
            minimum_code_length: 5,
            maximum_code_length: 99,
            upload_limit_bytes: 100 * 1024 * 1024,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl ClipConfig {
    /// The upload ceiling expressed in whole megabytes, as shown to users.
    pub fn upload_limit_mb(&self) -> u64 {
        self.upload_limit_bytes / (1024 * 1024)
    }
}
