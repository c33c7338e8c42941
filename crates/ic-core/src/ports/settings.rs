//! Preference store port.

use async_trait::async_trait;

use crate::settings::Preferences;

/// Typed preference store injected into use cases, replacing the
/// process-wide settings singleton of the original client.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<Preferences>;
    async fn save(&self, preferences: &Preferences) -> anyhow::Result<()>;
}
