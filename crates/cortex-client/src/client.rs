//! HTTP client for the Cortex memory API (seeds, bundles, embeddings).

use crate::config::ClientConfig;
use crate::request::{
    build_url, carries_body, decode_response, ApiRequest, BundleBody, QueryBody, RequestBody,
    SeedBody, WebhookBody, API_KEY_HEADER,
};
use cortex_types::{
    Analytics, Bundle, CortexError, CreateBundleRequest, CreateWebhookRequest, DeleteResponse,
    GenerateEmbeddingsResponse, HealthResponse, ListMemoriesRequest, Memory, ParamStyle,
    QueryMemoryRequest, QueryMemoryResult, Stats, StoreMemoryRequest, StoreMemoryResponse,
    TenantScope, Webhook,
};
use serde::de::DeserializeOwned;

/// Typed client. Holds no mutable state, so one instance can serve concurrent calls.
///
/// Every call is a single round trip with no retries; timeouts belong to the caller
/// (wrap the future, or pass a configured `reqwest::Client` to [`CortexClient::with_http_client`]).
#[derive(Debug, Clone)]
pub struct CortexClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Default for CortexClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl CortexClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn tenant(&self, scope: &TenantScope) -> TenantScope {
        scope.or(&self.config.default_tenant())
    }

    /// Split the resolved tenant into (body part, query part) for `style`.
    fn place_tenant(&self, scope: &TenantScope, style: ParamStyle) -> (TenantScope, TenantScope) {
        let resolved = self.tenant(scope);
        match style {
            ParamStyle::Body => (resolved, TenantScope::default()),
            ParamStyle::Query => (TenantScope::default(), resolved),
        }
    }

    /// Perform one call and decode the body as `T`.
    pub(crate) async fn execute<T>(&self, req: ApiRequest) -> Result<T, CortexError>
    where
        T: DeserializeOwned + Default,
    {
        let url = build_url(&self.config.base_url, &req)?;
        tracing::debug!(method = %req.method, path = %req.path, "cortex request");
        let mut builder = self.http.request(req.method.clone(), url);
        if let Some(ref key) = self.config.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(ref body) = req.body {
            if carries_body(&req.method) {
                builder = builder.json(body);
            }
        }
        let res = builder
            .send()
            .await
            .map_err(|e| CortexError::Network(describe(&e)))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| CortexError::Network(describe(&e)))?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), path = %req.path, "cortex request failed");
        }
        decode_response(status, &text)
    }

    // --- request construction (pure) ---

    pub fn store_memory_request(&self, req: &StoreMemoryRequest, style: ParamStyle) -> ApiRequest {
        let (in_body, in_query) = self.place_tenant(&req.tenant, style);
        ApiRequest::post("/seeds")
            .tenant_query(&in_query)
            .body(RequestBody::Seed(SeedBody {
                app_id: in_body.app_id,
                external_user_id: in_body.external_user_id,
                content: req.content.clone(),
                metadata: req.metadata.clone(),
                bundle_id: req.bundle_id,
            }))
    }

    pub fn query_memory_request(&self, req: &QueryMemoryRequest, style: ParamStyle) -> ApiRequest {
        let (in_body, in_query) = self.place_tenant(&req.tenant, style);
        ApiRequest::post("/seeds/query")
            .tenant_query(&in_query)
            .body(RequestBody::Query(QueryBody {
                app_id: in_body.app_id,
                external_user_id: in_body.external_user_id,
                query: req.query.clone(),
                limit: req.limit,
                bundle_id: req.bundle_id,
                threshold: req.threshold,
                seed_ids: req.seed_ids.clone(),
            }))
    }

    pub fn delete_memory_request(&self, id: i64, tenant: &TenantScope) -> ApiRequest {
        ApiRequest::delete(format!("/seeds/{}", id)).tenant_query(&self.tenant(tenant))
    }

    pub fn list_memories_request(&self, req: &ListMemoriesRequest) -> ApiRequest {
        ApiRequest::get("/seeds")
            .tenant_query(&self.tenant(&req.tenant))
            .query("limit", req.limit)
            .query("offset", req.offset)
    }

    pub fn create_bundle_request(&self, req: &CreateBundleRequest, style: ParamStyle) -> ApiRequest {
        let (in_body, in_query) = self.place_tenant(&req.tenant, style);
        ApiRequest::post("/bundles")
            .tenant_query(&in_query)
            .body(RequestBody::Bundle(BundleBody {
                app_id: in_body.app_id,
                external_user_id: in_body.external_user_id,
                name: req.name.clone(),
            }))
    }

    pub fn list_bundles_request(&self, tenant: &TenantScope) -> ApiRequest {
        ApiRequest::get("/bundles").tenant_query(&self.tenant(tenant))
    }

    pub fn get_bundle_request(&self, id: i64, tenant: &TenantScope) -> ApiRequest {
        ApiRequest::get(format!("/bundles/{}", id)).tenant_query(&self.tenant(tenant))
    }

    pub fn delete_bundle_request(&self, id: i64, tenant: &TenantScope) -> ApiRequest {
        ApiRequest::delete(format!("/bundles/{}", id)).tenant_query(&self.tenant(tenant))
    }

    pub fn generate_embeddings_request(&self, batch_size: Option<u32>) -> ApiRequest {
        ApiRequest::post("/seeds/generate-embeddings").query("batchSize", batch_size)
    }

    pub fn analytics_request(&self, tenant: &TenantScope, days: Option<u32>) -> ApiRequest {
        ApiRequest::get("/analytics")
            .tenant_query(&self.tenant(tenant))
            .query("days", days)
    }

    pub fn create_webhook_request(&self, req: &CreateWebhookRequest) -> ApiRequest {
        let scope = self.tenant(&TenantScope {
            app_id: req.app_id.clone(),
            external_user_id: None,
        });
        ApiRequest::post("/webhooks").body(RequestBody::Webhook(WebhookBody {
            url: req.url.clone(),
            events: req.events.clone(),
            secret: req.secret.clone(),
            app_id: scope.app_id,
        }))
    }

    pub fn list_webhooks_request(&self, app_id: Option<&str>) -> ApiRequest {
        let scope = self.tenant(&TenantScope {
            app_id: app_id.map(String::from),
            external_user_id: None,
        });
        ApiRequest::get("/webhooks").query("appId", scope.app_id)
    }

    // --- memories ---

    /// Store a memory; the service assigns the id.
    pub async fn store_memory(
        &self,
        req: &StoreMemoryRequest,
        style: ParamStyle,
    ) -> Result<StoreMemoryResponse, CortexError> {
        self.execute(self.store_memory_request(req, style)).await
    }

    /// Semantic query. Result order is whatever the service returns.
    pub async fn query_memory(
        &self,
        req: &QueryMemoryRequest,
        style: ParamStyle,
    ) -> Result<Vec<QueryMemoryResult>, CortexError> {
        self.execute(self.query_memory_request(req, style)).await
    }

    pub async fn delete_memory(
        &self,
        id: i64,
        tenant: &TenantScope,
    ) -> Result<DeleteResponse, CortexError> {
        self.execute(self.delete_memory_request(id, tenant)).await
    }

    pub async fn list_memories(&self, req: &ListMemoriesRequest) -> Result<Vec<Memory>, CortexError> {
        self.execute(self.list_memories_request(req)).await
    }

    // --- bundles ---

    pub async fn create_bundle(
        &self,
        req: &CreateBundleRequest,
        style: ParamStyle,
    ) -> Result<Bundle, CortexError> {
        self.execute(self.create_bundle_request(req, style)).await
    }

    pub async fn list_bundles(&self, tenant: &TenantScope) -> Result<Vec<Bundle>, CortexError> {
        self.execute(self.list_bundles_request(tenant)).await
    }

    pub async fn get_bundle(&self, id: i64, tenant: &TenantScope) -> Result<Bundle, CortexError> {
        self.execute(self.get_bundle_request(id, tenant)).await
    }

    pub async fn delete_bundle(
        &self,
        id: i64,
        tenant: &TenantScope,
    ) -> Result<DeleteResponse, CortexError> {
        self.execute(self.delete_bundle_request(id, tenant)).await
    }

    // --- maintenance ---

    /// Ask the service to backfill missing embeddings. Does not wait for completion.
    pub async fn generate_embeddings(
        &self,
        batch_size: Option<u32>,
    ) -> Result<GenerateEmbeddingsResponse, CortexError> {
        self.execute(self.generate_embeddings_request(batch_size)).await
    }

    pub async fn health(&self) -> Result<HealthResponse, CortexError> {
        self.execute(ApiRequest::get("/health")).await
    }

    pub async fn stats(&self) -> Result<Stats, CortexError> {
        self.execute(ApiRequest::get("/stats")).await
    }

    /// Tenant analytics over the last `days` (service default 30). With no tenant
    /// resolved the service answers with global analytics.
    pub async fn analytics(
        &self,
        tenant: &TenantScope,
        days: Option<u32>,
    ) -> Result<Analytics, CortexError> {
        self.execute(self.analytics_request(tenant, days)).await
    }

    // --- webhooks ---

    pub async fn create_webhook(&self, req: &CreateWebhookRequest) -> Result<Webhook, CortexError> {
        self.execute(self.create_webhook_request(req)).await
    }

    pub async fn list_webhooks(&self, app_id: Option<&str>) -> Result<Vec<Webhook>, CortexError> {
        self.execute(self.list_webhooks_request(app_id)).await
    }

    pub async fn delete_webhook(&self, id: i64) -> Result<DeleteResponse, CortexError> {
        self.execute(ApiRequest::delete(format!("/webhooks/{}", id))).await
    }
}

/// reqwest error plus its source chain (the top-level message alone hides the cause).
fn describe(err: &reqwest::Error) -> String {
    use std::error::Error as _;
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
