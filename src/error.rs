//! Error types for Smartsheet API calls.
//!
//! Every failure produced by the request core funnels through [`Error`]. Remote
//! failures carry the HTTP status together with the platform's `errorCode`,
//! `detail` and `refId` fields so callers can branch on them without touching
//! the underlying transport error.

use http::StatusCode;
use std::time::Duration;

/// The single error type returned by the client.
///
/// # Examples
///
/// ```no_run
/// use smartsheet_tools::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("token", "https://api.smartsheet.com/2.0")?;
///
/// match client.webhooks().get(42).await {
///     Ok(webhook) => println!("Webhook: {:?}", webhook.name),
///     Err(e) if e.status().map(|s| s.as_u16()) == Some(404) => {
///         eprintln!("No such webhook (error code {:?})", e.error_code());
///     }
///     Err(e) => eprintln!("Request failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API answered with a non-2xx status.
    ///
    /// `message` prefers the `message` field of the error body and falls back
    /// to `"Request failed with status code N"`.
    #[error("{message}")]
    Api {
        /// Normalized human readable message
        message: String,
        /// The HTTP status code
        status: StatusCode,
        /// Platform error code (`errorCode` in the body)
        error_code: Option<i64>,
        /// Extra detail (`detail` in the body)
        detail: Option<String>,
        /// Platform reference id for support requests (`refId` in the body)
        ref_id: Option<String>,
        /// Delay requested through the `Retry-After` header
        retry_after: Option<Duration>,
        /// The raw response body
        raw_response: String,
    },

    /// No response was obtained (connection refused, DNS failure, timeout...).
    #[error("{message}")]
    Transport {
        /// The transport-level message
        message: String,
        /// The underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response whose body did not decode into the expected type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// Invalid client configuration (empty token, empty endpoint, bad header value).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The retry loop ended without a definitive success or failure.
    #[error("Maximum retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded {
        /// The number of attempts made
        attempts: usize,
    },

    /// The endpoint and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Reads a string field, accepting numbers as their decimal text.
fn text_field(body: &serde_json::Value, key: &str) -> Option<String> {
    match body.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Error {
    /// Builds the normalized error for a non-2xx response.
    ///
    /// Fields of the error body are read independently of each other.
    pub(crate) fn from_response(
        status: StatusCode,
        raw_response: String,
        retry_after: Option<Duration>,
    ) -> Self {
        let body: serde_json::Value =
            serde_json::from_str(&raw_response).unwrap_or(serde_json::Value::Null);

        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        let error_code = body.get("errorCode").and_then(|code| match code {
            serde_json::Value::String(s) => s.trim().parse().ok(),
            other => other.as_i64(),
        });

        let detail = body.get("detail").and_then(|d| match d {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });

        Error::Api {
            message,
            status,
            error_code,
            detail,
            ref_id: text_field(&body, "refId"),
            retry_after,
            raw_response,
        }
    }

    /// Returns the normalized message.
    pub fn message(&self) -> String {
        match self {
            Error::Api { message, .. } | Error::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns the HTTP status code if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the platform error code, when the error body carried one.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Error::Api { error_code, .. } => *error_code,
            _ => None,
        }
    }

    /// Returns the platform error detail, when the error body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns the platform reference id, when the error body carried one.
    pub fn ref_id(&self) -> Option<&str> {
        match self {
            Error::Api { ref_id, .. } => ref_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Api { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the delay requested by the server's `Retry-After` header.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns `true` for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// Returns `true` if the client would retry this error given remaining budget.
    ///
    /// Only rate limiting is retried; every other failure is terminal.
    ///
    /// ```
    /// use smartsheet_tools::Error;
    ///
    /// let err = Error::MaxRetriesExceeded { attempts: 4 };
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limited()
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Transport {
            message: source.to_string(),
            source,
        }
    }
}

/// A specialized `Result` type for Smartsheet API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_platform_error_body() {
        let err = Error::from_response(
            StatusCode::NOT_FOUND,
            r#"{"message":"Not Found","errorCode":1006,"refId":"abc123"}"#.to_string(),
            None,
        );

        assert_eq!(err.to_string(), "Not Found");
        assert_eq!(err.message(), "Not Found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.error_code(), Some(1006));
        assert_eq!(err.ref_id(), Some("abc123"));
        assert_eq!(err.detail(), None);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_falls_back_to_status_message() {
        let err = Error::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>oops</html>".to_string(),
            None,
        );

        assert_eq!(err.message(), "Request failed with status code 500");
        assert_eq!(err.error_code(), None);
        assert_eq!(err.raw_response(), Some("<html>oops</html>"));
    }

    #[test]
    fn test_structured_detail_is_kept_as_json_text() {
        let err = Error::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid row","errorCode":1012,"detail":{"index":3}}"#.to_string(),
            None,
        );

        assert_eq!(err.detail(), Some(r#"{"index":3}"#));
    }

    #[test]
    fn test_rate_limited_errors_are_retryable() {
        let err = Error::from_response(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"errorCode":4003,"message":"Rate limit exceeded."}"#.to_string(),
            Some(Duration::from_secs(2)),
        );

        assert!(err.is_rate_limited());
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
        assert_eq!(err.error_code(), Some(4003));
    }

    #[test]
    fn test_textual_error_code_keeps_message() {
        let err = Error::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid sheet id","errorCode":"1006"}"#.to_string(),
            None,
        );

        assert_eq!(err.message(), "Invalid sheet id");
        assert_eq!(err.error_code(), Some(1006));
    }

    #[test]
    fn test_numeric_ref_id_keeps_message_and_code() {
        let err = Error::from_response(
            StatusCode::NOT_FOUND,
            r#"{"message":"Not Found","errorCode":1006,"refId":12345}"#.to_string(),
            None,
        );

        assert_eq!(err.message(), "Not Found");
        assert_eq!(err.error_code(), Some(1006));
        assert_eq!(err.ref_id(), Some("12345"));
    }

    #[test]
    fn test_non_string_message_falls_back_but_keeps_code() {
        let err = Error::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":{"text":"nested"},"errorCode":1012}"#.to_string(),
            None,
        );

        assert_eq!(err.message(), "Request failed with status code 400");
        assert_eq!(err.error_code(), Some(1012));
    }
}
