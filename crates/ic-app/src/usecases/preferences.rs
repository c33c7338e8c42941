//! Preference use cases.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use ic_core::ports::SettingsPort;
use ic_core::settings::Preferences;

/// Loads the stored preferences.
pub struct GetPreferences {
    settings: Arc<dyn SettingsPort>,
}

impl GetPreferences {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<Preferences> {
        self.settings.load().await
    }
}

/// Persists updated preferences through the settings port.
pub struct UpdatePreferences {
    settings: Arc<dyn SettingsPort>,
}

impl UpdatePreferences {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, preferences: Preferences) -> Result<()> {
        let old = self.settings.load().await.unwrap_or_default();
        if old != preferences {
            info!(
                auto_open_scanned = preferences.auto_open_scanned,
                upload_quality = preferences.upload_quality,
                "updating preferences"
            );
        }
        self.settings.save(&preferences).await
    }
}
