//! Traits for pluggable collaborators of the client.

use crate::SettingsError;
use async_trait::async_trait;

/// Key under which the API key is persisted.
pub const SETTINGS_API_KEY: &str = "cortex_api_key";
/// Key under which the default application id is persisted.
pub const SETTINGS_APP_ID: &str = "cortex_app_id";
/// Key under which the default external user id is persisted.
pub const SETTINGS_EXTERNAL_USER_ID: &str = "cortex_external_user_id";

/// Persisted key/value settings (API key, default tenant).
///
/// The client never reads this directly; configuration is resolved from it once,
/// before the client is constructed.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Value for `key`, or `None` when unset.
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Insert or overwrite `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Remove `key`; removing an unset key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
