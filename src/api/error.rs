use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - session is no longer valid")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Fixed fallback shown when no better message can be extracted.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        // Back off to a char boundary so the slice cannot split a
        // multi-byte character
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            400 | 422 => ApiError::Validation(truncated),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// The raw response body this error carries, if any.
    fn body(&self) -> Option<&str> {
        match self {
            ApiError::AccessDenied(body)
            | ApiError::NotFound(body)
            | ApiError::Validation(body)
            | ApiError::ServerError(body) => Some(body),
            _ => None,
        }
    }

    /// Structured message from the response body: a `detail` field wins over
    /// a `message` field. FastAPI emits `detail`, sometimes as a list of
    /// validation errors, which is flattened to one line.
    pub fn server_detail(&self) -> Option<String> {
        let body: serde_json::Value = serde_json::from_str(self.body()?).ok()?;

        match body.get("detail") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => {
                return Some(s.clone());
            }
            Some(serde_json::Value::Array(items)) if !items.is_empty() => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other
                            .get("msg")
                            .and_then(|m| m.as_str())
                            .map(str::to_string)
                            .unwrap_or_else(|| other.to_string()),
                    })
                    .collect();
                return Some(parts.join("; "));
            }
            _ => {}
        }

        match body.get("message") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Extract a human-readable message from a failed operation.
///
/// Priority: structured `detail` on the failure body, then structured
/// `message`, then the error's own display text, then [`FALLBACK_MESSAGE`].
pub fn user_message(err: &anyhow::Error) -> String {
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        if let Some(detail) = api_err.server_detail() {
            return detail;
        }
    }

    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}
