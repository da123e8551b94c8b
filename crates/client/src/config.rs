use crate::endpoints::Endpoint;
use crate::error::{ClientError, ClientResult};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SSE_RECONNECT_MAX_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API origin without a trailing slash.
    pub api_base_url: String,
    /// Per-request timeout for ordinary REST calls.
    pub request_timeout_secs: u64,
    /// Path of the notification event stream, relative to `api_base_url`.
    pub notification_stream_path: String,
    /// Upper bound on the stream reconnect delay.
    pub sse_reconnect_max_secs: u64,
    /// Access token to start with, if any.
    pub access_token: Option<String>,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                          |
    /// |----------------------------|----------------------------------|
    /// | `API_BASE_URL`             | `http://localhost:8080`          |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                             |
    /// | `NOTIFICATION_STREAM_PATH` | `/api/notifications/subscribe`   |
    /// | `SSE_RECONNECT_MAX_SECS`   | `30`                             |
    /// | `ACCESS_TOKEN`             | unset                            |
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into())
            .trim()
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&api_base_url)
            .map_err(|e| ClientError::Config(format!("API_BASE_URL is not a valid URL: {e}")))?;

        let request_timeout_secs =
            parse_secs(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let sse_reconnect_max_secs =
            parse_secs(&lookup, "SSE_RECONNECT_MAX_SECS", DEFAULT_SSE_RECONNECT_MAX_SECS)?;

        let notification_stream_path = lookup("NOTIFICATION_STREAM_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| Endpoint::NotificationStream.path());
        if !notification_stream_path.starts_with('/') {
            return Err(ClientError::Config(
                "NOTIFICATION_STREAM_PATH must start with '/'".into(),
            ));
        }

        let access_token = lookup("ACCESS_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            api_base_url,
            request_timeout_secs,
            notification_stream_path,
            sse_reconnect_max_secs,
            access_token,
        })
    }

    /// Absolute URL of the notification event stream.
    pub fn notification_stream_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.notification_stream_path)
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> ClientResult<u64> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ClientError::Config(format!(
                "{key} must be a positive integer, got '{raw}'"
            ))),
        },
    }
}
