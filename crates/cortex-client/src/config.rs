//! Client configuration: base URL, API key, default tenant.

use cortex_types::{
    SettingsError, SettingsStore, TenantScope, SETTINGS_API_KEY, SETTINGS_APP_ID,
    SETTINGS_EXTERNAL_USER_ID,
};
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9123";

/// Fallback application id when none is persisted in settings.
pub const FALLBACK_APP_ID: &str = "openclaw";
/// Fallback external user id when none is persisted in settings.
pub const FALLBACK_EXTERNAL_USER_ID: &str = "default";

/// Read-only for the lifetime of a [`crate::CortexClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub app_id: Option<String>,
    pub external_user_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("app_id", &self.app_id)
            .field("external_user_id", &self.external_user_id)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            app_id: None,
            external_user_id: None,
        }
    }

    /// Sent as `X-API-Key` on every request. An empty key is treated as no key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|k| !k.is_empty());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_external_user_id(mut self, external_user_id: impl Into<String>) -> Self {
        self.external_user_id = Some(external_user_id.into());
        self
    }

    pub fn with_tenant(self, app_id: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        self.with_app_id(app_id).with_external_user_id(external_user_id)
    }

    /// Defaults applied to every operation that does not pass its own tenant.
    pub fn default_tenant(&self) -> TenantScope {
        TenantScope {
            app_id: self.app_id.clone(),
            external_user_id: self.external_user_id.clone(),
        }
    }

    /// `CORTEX_API_URL`, `CORTEX_API_KEY`, `CORTEX_APP_ID`, `CORTEX_USER_ID`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CORTEX_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        if let Ok(key) = std::env::var("CORTEX_API_KEY") {
            config = config.with_api_key(key);
        }
        config.app_id = std::env::var("CORTEX_APP_ID").ok().filter(|s| !s.is_empty());
        config.external_user_id = std::env::var("CORTEX_USER_ID").ok().filter(|s| !s.is_empty());
        config
    }

    /// Resolve API key and default tenant from persisted settings.
    ///
    /// Missing tenant values fall back to `openclaw` / `default`.
    pub async fn from_settings(
        base_url: impl Into<String>,
        store: &dyn SettingsStore,
    ) -> Result<Self, SettingsError> {
        let mut config = Self::new(base_url);
        if let Some(key) = store.get(SETTINGS_API_KEY).await? {
            config = config.with_api_key(key);
        }
        let app_id = store
            .get(SETTINGS_APP_ID)
            .await?
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_APP_ID.to_string());
        let external_user_id = store
            .get(SETTINGS_EXTERNAL_USER_ID)
            .await?
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_EXTERNAL_USER_ID.to_string());
        Ok(config.with_tenant(app_id, external_user_id))
    }
}

/// Persist the default tenant for later [`ClientConfig::from_settings`] calls.
pub async fn save_tenant(
    store: &dyn SettingsStore,
    app_id: &str,
    external_user_id: &str,
) -> Result<(), SettingsError> {
    store.set(SETTINGS_APP_ID, app_id).await?;
    store.set(SETTINGS_EXTERNAL_USER_ID, external_user_id).await
}

/// Persist the API key; `None` or an empty key clears it.
pub async fn save_api_key(store: &dyn SettingsStore, key: Option<&str>) -> Result<(), SettingsError> {
    match key.filter(|k| !k.is_empty()) {
        Some(k) => store.set(SETTINGS_API_KEY, k).await,
        None => store.remove(SETTINGS_API_KEY).await,
    }
}
