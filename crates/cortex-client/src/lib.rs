//! Typed client for the Cortex memory API.
//!
//! ```no_run
//! use cortex_client::{ClientConfig, CortexClient};
//! use cortex_types::{ParamStyle, QueryMemoryRequest, StoreMemoryRequest};
//!
//! # async fn run() -> Result<(), cortex_types::CortexError> {
//! let client = CortexClient::new(ClientConfig::default().with_tenant("myapp", "user123"));
//! let stored = client
//!     .store_memory(&StoreMemoryRequest::new("likes coffee"), ParamStyle::Body)
//!     .await?;
//! let hits = client
//!     .query_memory(&QueryMemoryRequest::new("coffee").limit(5), ParamStyle::Body)
//!     .await?;
//! # let _ = (stored, hits);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod request;
mod settings;

pub use client::CortexClient;
pub use config::{
    save_api_key, save_tenant, ClientConfig, DEFAULT_BASE_URL, FALLBACK_APP_ID,
    FALLBACK_EXTERNAL_USER_ID,
};
pub use cortex_types::{CortexError, ParamStyle, SettingsStore, TenantScope};
pub use request::{ApiRequest, RequestBody, API_KEY_HEADER};
pub use settings::{InMemorySettingsStore, JsonFileSettingsStore};
