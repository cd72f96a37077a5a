//! HTTP client with rate limit retries and normalized errors.
//!
//! The [`Client`] type is the single funnel every resource wrapper goes
//! through. Use [`ClientBuilder`] to configure and create clients.

use crate::{
    config::Config,
    metadata::RequestMetadata,
    rate_limit::parse_retry_after,
    retry::{Outcome, RetryPolicy},
    Error, Response, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("smartsheet-tools/", env!("CARGO_PKG_VERSION"));

/// A Smartsheet API client.
///
/// The client is cheap to clone: all clones share one connection pool and one
/// immutable configuration (endpoint, token, retry policy).
///
/// # Examples
///
/// ```no_run
/// use smartsheet_tools::{Client, RetryPolicy};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), smartsheet_tools::Error> {
/// let client = Client::builder()
///     .base_url("https://api.smartsheet.com/2.0")
///     .access_token("my-token")
///     .timeout(Duration::from_secs(30))
///     .retry_policy(RetryPolicy { max_retries: 5, ..RetryPolicy::default() })
///     .build()?;
///
/// let me: serde_json::Value = client.get("/users/me").await?;
/// println!("{}", me["email"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("retry_policy", &self.inner.retry_policy)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client with the default retry policy.
    ///
    /// # Errors
    ///
    /// Fails if either argument is empty or the endpoint is not a valid URL.
    pub fn new(access_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::builder()
            .access_token(access_token)
            .base_url(base_url)
            .build()
    }

    /// Creates a client from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder()
            .access_token(&config.access_token)
            .base_url(&config.endpoint)
            .retry_policy(config.retry_policy.clone())
            .build()
    }

    /// The endpoint every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The retry policy applied to rate limited requests.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry_policy
    }

    /// Makes a request and returns the decoded body with its transport details.
    ///
    /// Rate limited attempts (HTTP 429) are retried according to the client's
    /// [`RetryPolicy`]; every other failure is returned immediately.
    pub async fn call<Req, Res>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.send(metadata, body, decode_json::<Res>).await
    }

    /// Like [`Client::call`] for endpoints that answer with text (CSV exports);
    /// the body is returned as is.
    pub async fn call_text(&self, metadata: RequestMetadata) -> Result<Response<String>> {
        self.send::<(), String>(metadata, None, decode_text).await
    }

    async fn send<Req, Res>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
        decode: Decoder<Res>,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::SerializationFailed(e.to_string()))?;
        let url = self.build_url(&metadata)?;

        let policy = &self.inner.retry_policy;
        let start_time = Instant::now();
        let mut attempt = 0;

        while attempt <= policy.max_retries {
            let result = self
                .execute_request(&metadata, &url, body.as_deref(), attempt, start_time, decode)
                .await;

            match policy.classify(attempt, result) {
                Outcome::Success(response) => return Ok(response),
                Outcome::Retry { delay, error } => {
                    tracing::warn!(
                        status = ?error.status().map(|s| s.as_u16()),
                        delay_ms = delay.as_millis(),
                        attempt = attempt,
                        method = %metadata.method,
                        path = %metadata.path,
                        "Rate limited - retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Outcome::Fail(error) => {
                    tracing::error!(
                        error = %error,
                        status = ?error.status().map(|s| s.as_u16()),
                        error_code = ?error.error_code(),
                        attempt = attempt,
                        method = %metadata.method,
                        path = %metadata.path,
                        "API error"
                    );
                    return Err(error);
                }
            }
        }

        Err(Error::MaxRetriesExceeded { attempts: attempt })
    }

    /// Makes a request and returns only the decoded body.
    pub async fn request<Req, Res>(&self, metadata: RequestMetadata, body: Option<&Req>) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.call(metadata, body).await.map(Response::into_data)
    }

    /// Makes a request without a body and returns the decoded response.
    pub async fn fetch<Res>(&self, metadata: RequestMetadata) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        self.request::<(), Res>(metadata, None).await
    }

    fn build_url(&self, metadata: &RequestMetadata) -> Result<Url> {
        let path = metadata.path.as_str();
        let mut url = if path.is_empty() || path.starts_with('/') {
            Url::parse(&format!("{}{}", self.inner.base_url, path))?
        } else {
            Url::parse(&format!("{}/{}", self.inner.base_url, path))?
        };

        if !metadata.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &metadata.query_params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Executes a single attempt.
    async fn execute_request<Res>(
        &self,
        metadata: &RequestMetadata,
        url: &Url,
        body: Option<&[u8]>,
        attempt: usize,
        start_time: Instant,
        decode: Decoder<Res>,
    ) -> Result<Response<Res>> {
        tracing::info!(
            method = %metadata.method,
            url = %url,
            attempt = attempt,
            "API request"
        );

        let mut request = self
            .inner
            .http_client
            .request(metadata.method.clone(), url.clone());

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }
        for (name, value) in &metadata.headers {
            request = request.header(name, value);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;
        self.parse_response(response, start_time.elapsed(), attempt + 1, decode)
            .await
    }

    async fn parse_response<Res>(
        &self,
        response: reqwest::Response,
        latency: Duration,
        attempts: usize,
        decode: Decoder<Res>,
    ) -> Result<Response<Res>> {
        let status = response.status();
        let headers = response.headers().clone();

        tracing::debug!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            attempts = attempts,
            "Received API response"
        );

        if !status.is_success() {
            let raw_response = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read error response body"
                    );
                    String::new()
                }
            };
            return Err(Error::from_response(
                status,
                raw_response,
                parse_retry_after(&headers),
            ));
        }

        let raw_body = response.text().await?;

        match decode(&raw_body) {
            Ok(data) => Ok(Response::new(
                data, raw_body, status, headers, latency, attempts,
            )),
            Err(e) => Err(Error::DeserializationFailed {
                raw_response: raw_body,
                serde_error: e.to_string(),
                status,
            }),
        }
    }

    /// Makes a GET request to the specified path.
    pub async fn get<Res>(&self, path: impl Into<String>) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        self.fetch(RequestMetadata::new(Method::GET, path)).await
    }

    /// Makes a POST request to the specified path with a JSON body.
    pub async fn post<Req, Res>(&self, path: impl Into<String>, body: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.request(RequestMetadata::new(Method::POST, path), Some(body))
            .await
    }

    /// Makes a PUT request to the specified path with a JSON body.
    pub async fn put<Req, Res>(&self, path: impl Into<String>, body: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.request(RequestMetadata::new(Method::PUT, path), Some(body))
            .await
    }

    /// Makes a DELETE request to the specified path.
    pub async fn delete<Res>(&self, path: impl Into<String>) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        self.fetch(RequestMetadata::new(Method::DELETE, path)).await
    }
}

type Decoder<Res> = fn(&str) -> serde_json::Result<Res>;

/// Decodes a JSON body; an empty body reads as `null`.
fn decode_json<Res: DeserializeOwned>(body: &str) -> serde_json::Result<Res> {
    if body.trim().is_empty() {
        serde_json::from_str("null")
    } else {
        serde_json::from_str(body)
    }
}

fn decode_text(body: &str) -> serde_json::Result<String> {
    Ok(body.to_string())
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use smartsheet_tools::ClientBuilder;
///
/// # fn example() -> Result<(), smartsheet_tools::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.smartsheet.eu/2.0")
///     .access_token("my-token")
///     .default_header("Accept-Language", "en")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<String>,
    access_token: Option<String>,
    user_agent: String,
    default_headers: HeaderMap,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            access_token: None,
            user_agent: USER_AGENT.to_string(),
            default_headers: HeaderMap::new(),
            retry_policy: RetryPolicy::default(),
            timeout: None,
        }
    }

    /// Sets the API endpoint, e.g. `https://api.smartsheet.com/2.0`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer token sent with every request.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the retry policy for rate limited requests.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token or endpoint is missing or empty,
    /// or if the endpoint is not a valid URL.
    pub fn build(self) -> Result<Client> {
        let access_token = self
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                Error::ConfigurationError(
                    "Access token is required (set SMARTSHEET_API_KEY)".to_string(),
                )
            })?;

        let base_url = self
            .base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                Error::ConfigurationError(
                    "API endpoint is required (set SMARTSHEET_ENDPOINT)".to_string(),
                )
            })?;
        Url::parse(&base_url)?;

        let mut authorization = HeaderValue::try_from(format!("Bearer {}", access_token.trim()))
            .map_err(|e| Error::ConfigurationError(format!("Invalid access token: {}", e)))?;
        authorization.set_sensitive(true);
        let user_agent = HeaderValue::try_from(self.user_agent.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid user agent: {}", e)))?;

        let mut default_headers = self.default_headers;
        default_headers.insert(header::AUTHORIZATION, authorization);
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        default_headers.insert(header::USER_AGENT, user_agent);

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers,
                retry_policy: self.retry_policy,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_fails_fast() {
        let result = Client::new("", "https://api.smartsheet.com/2.0");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));

        let result = Client::new("   ", "https://api.smartsheet.com/2.0");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_empty_endpoint_fails_fast() {
        let result = Client::new("token", "");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));

        let result = Client::builder().access_token("token").build();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result = Client::new("token", "not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_url_joins_endpoint_path_and_query() {
        let client = Client::new("token", "https://api.smartsheet.com/2.0/").unwrap();
        assert_eq!(client.base_url(), "https://api.smartsheet.com/2.0");

        let metadata = RequestMetadata::new(Method::GET, "/sheets/1/columns")
            .with_optional_query_param("include", Some("filters"))
            .with_optional_query_param("level", None::<u8>);
        let url = client.build_url(&metadata).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.smartsheet.com/2.0/sheets/1/columns?include=filters"
        );

        let url = client
            .build_url(&RequestMetadata::new(Method::GET, "users/me"))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.smartsheet.com/2.0/users/me");
    }

    #[test]
    fn test_user_agent_names_crate_and_version() {
        assert!(USER_AGENT.starts_with("smartsheet-tools/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_body_decoders() {
        let empty: Option<u32> = decode_json("  ").unwrap();
        assert_eq!(empty, None);
        assert!(decode_json::<u32>("a,b").is_err());
        assert_eq!(decode_text("a,b\n1,2").unwrap(), "a,b\n1,2");
    }
}
