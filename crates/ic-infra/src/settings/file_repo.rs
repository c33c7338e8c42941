//! JSON file preference store.
//!
//! Saves write to a temp file next to the target and rename over it, so
//! a crash mid-write leaves either the old or the new contents, never a
//! torn file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use ic_core::ports::SettingsPort;
use ic_core::settings::Preferences;

pub struct FilePreferencesRepository {
    path: PathBuf,
}

impl FilePreferencesRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("platform config directory unavailable")?;
        Ok(dir.join("interclip").join("preferences.json"))
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create preferences dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp preferences failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp preferences to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }
}

#[async_trait]
impl SettingsPort for FilePreferencesRepository {
    async fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            // First run: nothing stored yet.
            return Ok(Preferences::default());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read preferences failed: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parse preferences failed: {}", self.path.display()))
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        let content =
            serde_json::to_string_pretty(preferences).context("serialize preferences failed")?;
        self.atomic_write(&content).await
    }
}
