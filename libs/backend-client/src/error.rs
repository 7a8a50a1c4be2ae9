use thiserror::Error;

/// Per-operation error taxonomy for remote store and API calls.
///
/// Every variant is terminal for the operation that produced it: nothing
/// retries, recovery is a user-initiated repeat of the action.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Rejected locally before any network call.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// No authenticated identity present (or the store rejected the token).
    #[error("Not signed in")]
    Auth,

    /// The store or API returned an error; message surfaced verbatim.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Transport-level failure (DNS, connect, timeout, malformed body).
    #[error("Network error: {message}")]
    Transport { message: String },
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport {
            message: e.to_string(),
        }
    }
}

/// Extract a `StoreError` from a non-success response.
///
/// The store answers errors as JSON (`{"message": ...}` from the data API,
/// `{"error_description": ...}` or `{"msg": ...}` from auth); the message is
/// surfaced verbatim, falling back to the HTTP status text.
pub async fn error_from_response(resp: reqwest::Response) -> StoreError {
    let status = resp.status();
    if status.as_u16() == 401 {
        return StoreError::Auth;
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();
    let message = match resp.text().await {
        Ok(body) => extract_message(&body).unwrap_or(fallback),
        Err(_) => fallback,
    };
    StoreError::remote(status.as_u16(), message)
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error_description", "msg", "error"] {
        if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
            return Some(s.to_string());
        }
    }
    None
}
