//! SettingsStore implementations: in-memory and a JSON file.

use async_trait::async_trait;
use cortex_types::{SettingsError, SettingsStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Process-lifetime settings.
pub struct InMemorySettingsStore {
    values: tokio::sync::RwLock<BTreeMap<String, String>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self {
            values: tokio::sync::RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Settings kept as one JSON object in a file. A missing file reads as empty.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// concurrent reader never sees a truncated file.
pub struct JsonFileSettingsStore {
    path: PathBuf,
    lock: tokio::sync::RwLock<()>,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: tokio::sync::RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn store(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(values)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "settings".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let _guard = self.lock.write().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let _guard = self.lock.write().await;
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.store(&values).await?;
        }
        Ok(())
    }
}
