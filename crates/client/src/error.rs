use fundhub_core::error::CoreError;

/// Client-level error type.
///
/// Wraps [`CoreError`] for domain failures (for example a reward list that
/// did not validate) and adds transport and configuration variants.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A domain-level error from `fundhub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A payload could not be encoded or decoded.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API rejected the session (HTTP 401).
    #[error("Session expired or not signed in")]
    Unauthorized,

    /// An environment value is missing or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;
