//! Response wrapper that keeps the decoded body next to the transport details.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful API response.
///
/// [`Client::call`](crate::Client::call) returns this wrapper; the resource
/// wrappers and [`Client::request`](crate::Client::request) only hand back `data`.
///
/// # Examples
///
/// ```no_run
/// use smartsheet_tools::{Client, metadata::RequestMetadata};
/// use http::Method;
///
/// # async fn example() -> Result<(), smartsheet_tools::Error> {
/// let client = Client::new("token", "https://api.smartsheet.com/2.0")?;
///
/// let response = client
///     .call::<(), serde_json::Value>(RequestMetadata::new(Method::GET, "/users/me"), None)
///     .await?;
///
/// println!("Status: {}", response.status);
/// println!("Request took {:?} over {} attempt(s)", response.latency, response.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The deserialized response data.
    pub data: T,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from the first attempt until the successful response, including backoff sleeps.
    pub latency: Duration,

    /// The number of attempts made, `1` when no rate limit retry was needed.
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Returns `true` if at least one rate limited attempt preceded this response.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Number of rate limit retries spent on this response.
    pub fn retries(&self) -> usize {
        self.attempts.saturating_sub(1)
    }

    /// A response header as text, `None` when absent or not visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Discards the transport details and returns the decoded body.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(attempts: usize) -> Response<serde_json::Value> {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "abc".parse().unwrap());
        Response::new(
            serde_json::json!({ "version": 3 }),
            r#"{"version":3}"#.to_string(),
            StatusCode::OK,
            headers,
            Duration::from_millis(5),
            attempts,
        )
    }

    #[test]
    fn test_retry_counts() {
        assert!(!response(1).was_retried());
        assert_eq!(response(1).retries(), 0);
        assert!(response(3).was_retried());
        assert_eq!(response(3).retries(), 2);
    }

    #[test]
    fn test_header_and_deref() {
        let response = response(1);
        assert_eq!(response.header("X-Request-Id"), Some("abc"));
        assert_eq!(response.header("retry-after"), None);
        assert_eq!(response["version"], 3);
        assert_eq!(response.into_data()["version"], 3);
    }
}
