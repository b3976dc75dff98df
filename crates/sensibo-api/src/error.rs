use thiserror::Error;

/// Top-level error type for the `sensibo-api` crate.
///
/// HTTP 401 maps to [`Error::Authentication`]; every other non-200 status
/// maps to [`Error::Api`] carrying the raw response body. Network failures
/// pass through untouched as [`Error::Transport`].
#[derive(Debug, Error)]
pub enum Error {
    // ── API ─────────────────────────────────────────────────────────
    /// API key rejected (HTTP 401). Needs new credentials, not a retry.
    #[error("Invalid API key")]
    Authentication,

    /// Any other non-200 response. `message` is the raw response body.
    #[error("API error: {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A 200 response whose envelope has no `result` field.
    #[error("Malformed response: missing `result` field")]
    MissingResult { body: String },

    /// A 200 response that is not a JSON object, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying `reqwest::Client` could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl Error {
    /// Returns `true` if the API key was rejected.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Returns `true` for network-level failures worth retrying.
    ///
    /// API errors are never classified as transient: the response body is
    /// the only detail available and the caller decides.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The HTTP status code behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_display() {
        let err = Error::Authentication;
        assert_eq!(err.to_string(), "Invalid API key");
        assert!(err.is_authentication());
        assert!(!err.is_transient());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn api_error_carries_body() {
        let err = Error::Api {
            status: 500,
            message: "server exploded".into(),
        };
        assert_eq!(err.to_string(), "API error: server exploded");
        assert!(!err.is_authentication());
        assert!(!err.is_transient());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn missing_result_has_no_status() {
        let err = Error::MissingResult {
            body: r#"{"status":"success"}"#.into(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("result"));
    }
}
