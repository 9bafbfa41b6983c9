//! Request description, URL building and response decoding.
//!
//! Everything here is pure: an [`ApiRequest`] is plain data until the client
//! executes it, so both parameter conventions can be inspected without I/O.

use cortex_types::{CortexError, Metadata, TenantScope};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// One HTTP call: method, path relative to the base URL, query pairs, JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append `key=value` when `value` is present; absent values are left out entirely.
    pub fn query<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.query.push((key.to_string(), v.to_string()));
        }
        self
    }

    /// Append `appId` / `externalUserId` for whichever of them is set.
    pub fn tenant_query(self, tenant: &TenantScope) -> Self {
        self.query("appId", tenant.app_id.as_deref())
            .query("externalUserId", tenant.external_user_id.as_deref())
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first query pair named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Whether `method` conventionally carries a request body.
pub(crate) fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// JSON bodies sent by the client. Unset optional fields are omitted, not sent as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    Seed(SeedBody),
    Query(QueryBody),
    Bundle(BundleBody),
    Webhook(WebhookBody),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookBody {
    pub url: String,
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

/// `base` with trailing slashes trimmed, then `path`, then the query pairs.
pub fn build_url(base: &str, req: &ApiRequest) -> Result<Url, CortexError> {
    let joined = format!("{}{}", base.trim_end_matches('/'), req.path);
    let mut url = Url::parse(&joined)
        .map_err(|e| CortexError::Network(format!("invalid URL {}: {}", joined, e)))?;
    if !req.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &req.query {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// Map a status + body text to the caller's type or a [`CortexError`].
pub fn decode_response<T>(status: StatusCode, text: &str) -> Result<T, CortexError>
where
    T: DeserializeOwned + Default,
{
    if !status.is_success() {
        return Err(api_error(status.as_u16(), text));
    }
    if text.trim().is_empty() {
        return Ok(empty_result());
    }
    serde_json::from_str(text).map_err(|e| CortexError::Decode {
        message: e.to_string(),
        status: status.as_u16(),
        body: text.to_string(),
    })
}

/// `{}` decoded as `T`, or `T::default()` for shapes that cannot come from an object.
fn empty_result<T>() -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(serde_json::Value::Object(serde_json::Map::new())).unwrap_or_default()
}

fn api_error(status: u16, text: &str) -> CortexError {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(body) => {
            let message = ["message", "error"]
                .iter()
                .filter_map(|k| body.get(*k).and_then(|v| v.as_str()))
                .find(|m| !m.is_empty())
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {}", status));
            CortexError::Api {
                message,
                status,
                body,
            }
        }
        Err(_) => {
            let raw = text.trim_end();
            let message = if raw.is_empty() {
                format!("HTTP {}", status)
            } else {
                raw.to_string()
            };
            CortexError::Api {
                message,
                status,
                body: serde_json::Value::String(text.to_string()),
            }
        }
    }
}
