//! Error taxonomy for the network-facing components.
//!
//! Both the content loader and the wisdom streamer report failures with
//! `FetchError`. Neither lets one escape to the renderer: callers convert
//! every error into fixed fallback text plus a log entry.

use std::fmt;

use serde_json::Value;

/// Categories of fetch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Superseded by a newer activation; never shown to the user.
    Cancelled,
    /// Missing or placeholder credential; no request was sent.
    Configuration,
    /// Network failure, non-2xx status, or undecodable response.
    Transport,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::Cancelled => write!(f, "cancelled"),
            FetchErrorKind::Configuration => write!(f, "configuration"),
            FetchErrorKind::Transport => write!(f, "transport"),
        }
    }
}

/// Structured fetch error with kind and details.
#[derive(Debug, Clone)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    /// One-line summary suitable for logs
    pub message: String,
    /// Optional raw error body
    pub details: Option<String>,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn cancelled() -> Self {
        Self::new(FetchErrorKind::Cancelled, "Request superseded")
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Configuration, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, message)
    }

    /// Creates a transport error for a non-2xx response.
    pub fn http_status(status: u16, body: &str) -> Self {
        if body.is_empty() {
            return Self::transport(format!("HTTP {status}"));
        }
        // Chat-completion endpoints wrap errors as {"error": {"message": ...}}
        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(msg) = json
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        {
            return Self {
                kind: FetchErrorKind::Transport,
                message: format!("HTTP {status}: {msg}"),
                details: Some(body.to_string()),
            };
        }
        Self {
            kind: FetchErrorKind::Transport,
            message: format!("HTTP {status}"),
            details: Some(body.to_string()),
        }
    }

    /// Creates a transport error from a mid-stream error object.
    pub fn api_error(error_type: &str, message: &str) -> Self {
        Self::transport(format!("{error_type}: {message}"))
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FetchErrorKind::Cancelled
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

pub(crate) fn classify_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::transport(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        FetchError::transport(format!("Connection failed: {e}"))
    } else if e.is_decode() || e.is_body() {
        FetchError::transport(format!("Failed to read response body: {e}"))
    } else if e.is_request() {
        FetchError::transport(format!("Request error: {e}"))
    } else {
        FetchError::transport(format!("Network error: {e}"))
    }
}
