//! Fake Cortex services for integration tests, served by axum on 127.0.0.1:0.
//!
//! `scripted` answers every request with a fixed status/body and records what it
//! received; `memory_service` is a small stateful seeds/bundles implementation.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

/// One request as the fake service saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub raw_body: String,
}

impl Recorded {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Option<Value> {
        if self.raw_body.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&self.raw_body).unwrap())
        }
    }
}

#[derive(Clone)]
struct Script {
    status: StatusCode,
    body: String,
    log: Arc<Mutex<Vec<Recorded>>>,
}

pub struct Scripted {
    pub base_url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl Scripted {
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

async fn record(
    State(script): State<Script>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    script.log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        api_key: header_str("x-api-key"),
        content_type: header_str("content-type"),
        raw_body: String::from_utf8_lossy(&body).into_owned(),
    });
    (
        script.status,
        [(header::CONTENT_TYPE, "application/json")],
        script.body.clone(),
    )
        .into_response()
}

/// Service answering every request with `status` and `body`.
pub async fn scripted(status: u16, body: &str) -> Scripted {
    let log = Arc::new(Mutex::new(Vec::new()));
    let script = Script {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        log: Arc::clone(&log),
    };
    let app = Router::new().fallback(record).with_state(script);
    Scripted {
        base_url: serve(app).await,
        log,
    }
}

#[derive(Clone)]
struct StoredMemory {
    id: i64,
    app_id: String,
    user_id: String,
    content: String,
    metadata: Value,
    bundle_id: Option<i64>,
}

#[derive(Clone)]
struct StoredBundle {
    id: i64,
    app_id: String,
    user_id: String,
    name: String,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    memories: Vec<StoredMemory>,
    bundles: Vec<StoredBundle>,
}

#[derive(Clone)]
struct Service {
    store: Arc<Mutex<Store>>,
    api_key: Option<String>,
}

const CREATED_AT: &str = "2025-01-01T00:00:00Z";

fn text(status: StatusCode, msg: &str) -> Response {
    (status, msg.to_string()).into_response()
}

fn parse_body(body: &Bytes) -> Result<Value, Response> {
    if body.is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_slice(body).map_err(|_| text(StatusCode::BAD_REQUEST, "invalid json body"))
}

impl Service {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        match &self.api_key {
            Some(key) => {
                let given = headers.get("x-api-key").and_then(|v| v.to_str().ok());
                if given == Some(key.as_str()) {
                    Ok(())
                } else {
                    Err(text(StatusCode::UNAUTHORIZED, "unauthorized"))
                }
            }
            None => Ok(()),
        }
    }
}

/// Query parameters take priority, the body is the fallback.
fn tenant(q: &HashMap<String, String>, body: &Value) -> Result<(String, String), Response> {
    let field = |name: &str| {
        q.get(name)
            .cloned()
            .filter(|s| !s.is_empty())
            .or_else(|| body.get(name).and_then(Value::as_str).map(String::from))
            .filter(|s| !s.is_empty())
    };
    let app = field("appId")
        .ok_or_else(|| text(StatusCode::BAD_REQUEST, "missing required field: appId"))?;
    let user = field("externalUserId")
        .ok_or_else(|| text(StatusCode::BAD_REQUEST, "missing required field: externalUserId"))?;
    Ok((app, user))
}

fn bundle_json(b: &StoredBundle) -> Value {
    json!({
        "id": b.id,
        "name": b.name,
        "app_id": b.app_id,
        "external_user_id": b.user_id,
        "created_at": CREATED_AT,
    })
}

async fn store_seed(
    State(svc): State<Service>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    let body = match parse_body(&body) {
        Ok(b) => b,
        Err(r) => return r,
    };
    let (app_id, user_id) = match tenant(&q, &body) {
        Ok(t) => t,
        Err(r) => return r,
    };
    let content = body["content"].as_str().unwrap_or_default().to_string();
    if content.trim().is_empty() {
        return text(StatusCode::BAD_REQUEST, "missing required field: content");
    }
    let mut store = svc.store.lock().unwrap();
    let id = store.next_id;
    store.next_id += 1;
    store.memories.push(StoredMemory {
        id,
        app_id,
        user_id,
        content,
        metadata: body.get("metadata").cloned().unwrap_or_else(|| json!({})),
        bundle_id: body.get("bundleId").and_then(Value::as_i64),
    });
    Json(json!({ "id": id, "message": "Memory stored successfully" })).into_response()
}

async fn query_seeds(
    State(svc): State<Service>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    let body = match parse_body(&body) {
        Ok(b) => b,
        Err(r) => return r,
    };
    let (app_id, user_id) = match tenant(&q, &body) {
        Ok(t) => t,
        Err(r) => return r,
    };
    let needle = body["query"].as_str().unwrap_or_default().to_lowercase();
    let limit = body.get("limit").and_then(Value::as_u64).unwrap_or(10) as usize;
    let bundle = body.get("bundleId").and_then(Value::as_i64);
    let store = svc.store.lock().unwrap();
    let hits: Vec<Value> = store
        .memories
        .iter()
        .filter(|m| m.app_id == app_id && m.user_id == user_id)
        .filter(|m| bundle.is_none() || m.bundle_id == bundle)
        .filter(|m| m.content.to_lowercase().contains(&needle))
        .take(limit)
        .map(|m| {
            json!({
                "id": m.id,
                "content": m.content,
                "metadata": m.metadata,
                "created_at": CREATED_AT,
                "similarity": 0.92,
            })
        })
        .collect();
    Json(Value::Array(hits)).into_response()
}

async fn delete_seed(
    State(svc): State<Service>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    let (app_id, user_id) = match tenant(&q, &json!({})) {
        Ok(t) => t,
        Err(r) => return r,
    };
    let mut store = svc.store.lock().unwrap();
    let before = store.memories.len();
    store
        .memories
        .retain(|m| !(m.id == id && m.app_id == app_id && m.user_id == user_id));
    if store.memories.len() == before {
        return text(StatusCode::NOT_FOUND, "Memory not found");
    }
    Json(json!({ "message": "Memory deleted successfully", "id": id })).into_response()
}

async fn create_bundle(
    State(svc): State<Service>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    let body = match parse_body(&body) {
        Ok(b) => b,
        Err(r) => return r,
    };
    let (app_id, user_id) = match tenant(&q, &body) {
        Ok(t) => t,
        Err(r) => return r,
    };
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if name.is_empty() {
        return text(StatusCode::BAD_REQUEST, "missing required field: name");
    }
    let mut store = svc.store.lock().unwrap();
    let bundle = StoredBundle {
        id: store.next_id,
        app_id,
        user_id,
        name,
    };
    store.next_id += 1;
    store.bundles.push(bundle.clone());
    Json(bundle_json(&bundle)).into_response()
}

async fn list_bundles(
    State(svc): State<Service>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    let (app_id, user_id) = match tenant(&q, &json!({})) {
        Ok(t) => t,
        Err(r) => return r,
    };
    let store = svc.store.lock().unwrap();
    let list: Vec<Value> = store
        .bundles
        .iter()
        .filter(|b| b.app_id == app_id && b.user_id == user_id)
        .map(bundle_json)
        .collect();
    Json(Value::Array(list)).into_response()
}

async fn get_bundle(
    State(svc): State<Service>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    let (app_id, user_id) = match tenant(&q, &json!({})) {
        Ok(t) => t,
        Err(r) => return r,
    };
    let store = svc.store.lock().unwrap();
    match store
        .bundles
        .iter()
        .find(|b| b.id == id && b.app_id == app_id && b.user_id == user_id)
    {
        Some(b) => Json(bundle_json(b)).into_response(),
        None => text(StatusCode::NOT_FOUND, "Bundle not found"),
    }
}

async fn delete_bundle(
    State(svc): State<Service>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    let (app_id, user_id) = match tenant(&q, &json!({})) {
        Ok(t) => t,
        Err(r) => return r,
    };
    let mut store = svc.store.lock().unwrap();
    let before = store.bundles.len();
    store
        .bundles
        .retain(|b| !(b.id == id && b.app_id == app_id && b.user_id == user_id));
    if store.bundles.len() == before {
        return text(StatusCode::NOT_FOUND, "Bundle not found");
    }
    Json(json!({ "message": "Bundle deleted successfully", "id": id })).into_response()
}

async fn generate_embeddings(State(svc): State<Service>, headers: HeaderMap) -> Response {
    if let Err(r) = svc.authorize(&headers) {
        return r;
    }
    Json(json!({ "message": "Embedding generation started" })).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": CREATED_AT }))
}

/// Stateful seeds/bundles service. Ids start at 42. With `api_key` set, every
/// route except /health requires a matching `X-API-Key`.
pub async fn memory_service(api_key: Option<&str>) -> String {
    let svc = Service {
        store: Arc::new(Mutex::new(Store {
            next_id: 42,
            ..Default::default()
        })),
        api_key: api_key.map(String::from),
    };
    let app = Router::new()
        .route("/health", get(health))
        .route("/seeds", post(store_seed))
        .route("/seeds/query", post(query_seeds))
        .route("/seeds/generate-embeddings", post(generate_embeddings))
        .route("/seeds/:id", delete(delete_seed))
        .route("/bundles", post(create_bundle).get(list_bundles))
        .route("/bundles/:id", get(get_bundle).delete(delete_bundle))
        .with_state(svc);
    serve(app).await
}
