//! API client error types
//!
//! Every failure of a remote call surfaces as one [`ApiError`]. Screens match
//! on [`ApiError::kind`] instead of probing the response body themselves.

use thiserror::Error;

/// Coarse classification of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection refused, DNS failure, reset or connect timeout
    Network,
    /// The client-side window elapsed and the call was dropped
    Timeout,
    /// The service answered with a non-2xx status
    Server { status: u16 },
    /// A 2xx response whose body did not match the expected shape
    Decode,
}

/// Errors that can occur when calling the recommendation service
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Transport timeouts (connect included) are network failures;
        // Timeout is reserved for the recommend window
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Timeout => ErrorKind::Timeout,
            ApiError::Server { status, .. } => ErrorKind::Server { status: *status },
            ApiError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Server-supplied detail, when the service sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether the service rejected the bearer credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind(), ErrorKind::Server { status: 401 })
    }

    /// Technical description of the failure
    pub fn raw_message(&self) -> String {
        match self {
            ApiError::Server { status, .. } => {
                format!("Request failed with status code {}", status)
            }
            ApiError::Network(msg) | ApiError::Decode(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Message for an inline error: server detail, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Message for an inline error: server detail, else the raw error text,
    /// else `fallback`
    pub fn user_message_or_raw(&self, fallback: &str) -> String {
        if let Some(detail) = self.detail().filter(|d| !d.is_empty()) {
            return detail.to_string();
        }
        let raw = self.raw_message();
        if raw.is_empty() {
            fallback.to_string()
        } else {
            raw
        }
    }
}

/// Extract the human-readable `detail` from an error body
///
/// Accepts `{"detail": "..."}` as well as validation responses of the form
/// `{"detail": [{"msg": "..."}, ...]}`, where the first message wins.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .map(str::to_string),
        _ => None,
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
