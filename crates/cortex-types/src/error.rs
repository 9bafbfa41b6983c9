//! The one failure type every client operation returns.

/// Failure of a Cortex API call.
///
/// Three causes collapse into this type: a non-2xx response, a transport
/// failure, and a 2xx response whose body is not the expected JSON.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CortexError {
    /// Non-2xx response. `body` is the parsed JSON, or the raw text as a JSON string.
    #[error("{message}")]
    Api {
        message: String,
        status: u16,
        body: serde_json::Value,
    },
    /// Connection failure, unusable base URL, or a body that could not be read.
    #[error("Network error: {0}")]
    Network(String),
    /// 2xx response whose body did not parse into the expected shape.
    #[error("invalid response body: {message}")]
    Decode {
        message: String,
        status: u16,
        body: String,
    },
}

impl CortexError {
    /// Human-readable message (same as `Display`).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CortexError::Api { status, .. } | CortexError::Decode { status, .. } => Some(*status),
            CortexError::Network(_) => None,
        }
    }

    /// Response body, parsed when it was JSON.
    pub fn body(&self) -> Option<serde_json::Value> {
        match self {
            CortexError::Api { body, .. } => Some(body.clone()),
            CortexError::Decode { body, .. } => Some(serde_json::Value::String(body.clone())),
            CortexError::Network(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
