//! Typed preference model.
//!
//! The original client kept these in the platform key-value settings store
//! under fixed string keys. The serde renames preserve those keys so a
//! store written by an older build still loads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Open scanned QR codes automatically instead of asking first.
    /// Stored under the legacy `"data"` key.
    #[serde(rename = "data", default)]
    pub auto_open_scanned: bool,

    /// Camera capture quality in `[0.0, 1.0]`, applied to camera uploads.
    /// Stored under the legacy `"uploadquality"` key.
    #[serde(rename = "uploadquality", default)]
    pub upload_quality: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_open_scanned: false,
            upload_quality: 0.0,
        }
    }
}
