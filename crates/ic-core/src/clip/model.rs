//! Clip entities as produced by the remote service.
//!
//! The client never mutates a [`Clip`]; it only displays and copies fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A server-stored mapping from a short code to a target URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Immutable alphanumeric identifier of the clip.
    pub code: String,
    /// How many leading characters of `code` should be presented to a user.
    pub hash_length: usize,
    /// The URL value of the clip.
    pub url: String,
    /// When the clip was created.
    pub created_at: DateTime<Utc>,
    /// When the clip will expire.
    pub expires_at: DateTime<Utc>,
    /// OEmbed preview metadata, when the target supports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<OEmbed>,
}

impl Clip {
    /// The leading `hash_length` characters of the code, which is the
    /// form shown on screen and copied to the clipboard.
    pub fn display_code(&self) -> String {
        self.code.chars().take(self.hash_length).collect()
    }

    /// Whether the clip target lives on the file storage host.
    ///
    /// Used by the presentation layer to decide between opening a link
    /// and showing the file preview sheet.
    pub fn is_file_clip(&self, files_endpoint: &str) -> bool {
        match (Url::parse(&self.url), Url::parse(files_endpoint)) {
            (Ok(target), Ok(files)) => {
                target.scheme() == files.scheme() && target.host() == files.host()
            }
            _ => false,
        }
    }
}

/// OEmbed preview metadata attached to a clip by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OEmbed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Opaque authenticity attestation forwarded with clip creation.
///
/// The client treats the signature scheme as a black box owned by the
/// server; it only carries the fields through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSignature {
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
