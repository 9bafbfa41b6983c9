//! Request and response DTOs for the Cortex seeds/bundles API.

use crate::TenantScope;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Free-form metadata attached to a memory. The service imposes no schema.
pub type Metadata = HashMap<String, serde_json::Value>;

/// Store-memory request (POST /seeds).
#[derive(Debug, Clone, Default)]
pub struct StoreMemoryRequest {
    pub content: String,
    pub metadata: Option<Metadata>,
    pub bundle_id: Option<i64>,
    pub tenant: TenantScope,
}

impl StoreMemoryRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn bundle_id(mut self, bundle_id: i64) -> Self {
        self.bundle_id = Some(bundle_id);
        self
    }

    pub fn tenant(mut self, tenant: TenantScope) -> Self {
        self.tenant = tenant;
        self
    }
}

/// Semantic query request (POST /seeds/query).
#[derive(Debug, Clone, Default)]
pub struct QueryMemoryRequest {
    pub query: String,
    pub limit: Option<u32>,
    pub bundle_id: Option<i64>,
    /// 0..=1; only results with similarity >= threshold. Unset means no filter.
    pub threshold: Option<f64>,
    /// Restrict the search to these memory ids.
    pub seed_ids: Option<Vec<i64>>,
    pub tenant: TenantScope,
}

impl QueryMemoryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn bundle_id(mut self, bundle_id: i64) -> Self {
        self.bundle_id = Some(bundle_id);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn seed_ids(mut self, seed_ids: Vec<i64>) -> Self {
        self.seed_ids = Some(seed_ids);
        self
    }

    pub fn tenant(mut self, tenant: TenantScope) -> Self {
        self.tenant = tenant;
        self
    }
}

/// Create-bundle request (POST /bundles).
#[derive(Debug, Clone, Default)]
pub struct CreateBundleRequest {
    pub name: String,
    pub tenant: TenantScope,
}

impl CreateBundleRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn tenant(mut self, tenant: TenantScope) -> Self {
        self.tenant = tenant;
        self
    }
}

/// Paged listing of a tenant's memories (GET /seeds).
#[derive(Debug, Clone, Default)]
pub struct ListMemoriesRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub tenant: TenantScope,
}

/// Webhook registration (POST /webhooks). `app_id` falls back to the client default.
#[derive(Debug, Clone, Default)]
pub struct CreateWebhookRequest {
    pub url: String,
    pub events: Vec<String>,
    pub secret: Option<String>,
    pub app_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreMemoryResponse {
    pub id: i64,
    pub message: String,
}

/// One semantic-search hit. Ordering and similarity range are the service's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryMemoryResult {
    pub id: i64,
    pub content: String,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<i64>,
    pub created_at: String,
    pub similarity: f64,
}

/// Delete confirmation for memories, bundles and webhooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bundle {
    pub id: i64,
    pub name: String,
    pub app_id: String,
    pub external_user_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateEmbeddingsResponse {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Stored memory as returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Memory {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub importance: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// MIME type of `content`; the service stores `text/plain` unless told otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub created_at: String,
}

/// Global counters (GET /stats).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub memories: i64,
    pub entities: i64,
    pub relations: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    /// e.g. "memory.created", "bundle.created".
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageStats {
    pub total_size: i64,
    pub memories_count: i64,
    pub bundles_count: i64,
    pub webhooks_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Tenant (or global, when no tenant is resolved) usage analytics (GET /analytics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analytics {
    pub tenant_id: String,
    pub app_id: String,
    pub external_user_id: String,
    pub total_memories: i64,
    pub total_bundles: i64,
    pub memories_with_embeddings: i64,
    pub memories_by_type: HashMap<String, i64>,
    /// Keyed by bundle id; JSON object keys arrive as strings.
    pub memories_by_bundle: HashMap<String, i64>,
    pub recent_activity: Vec<ActivityEntry>,
    pub storage_stats: StorageStats,
    pub time_range: TimeRange,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub id: i64,
    pub url: String,
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}
