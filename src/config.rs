//! Environment configuration.

use crate::{Error, Result, RetryPolicy};

/// Endpoint used when `SMARTSHEET_ENDPOINT` is not set (US commercial region).
pub const DEFAULT_ENDPOINT: &str = "https://api.smartsheet.com/2.0";

/// Variable holding the API access token.
pub const API_KEY_VAR: &str = "SMARTSHEET_API_KEY";
/// Variable holding the API endpoint.
pub const ENDPOINT_VAR: &str = "SMARTSHEET_ENDPOINT";
/// Variable enabling destructive tools when set to `true`.
pub const ALLOW_DELETE_VAR: &str = "ALLOW_DELETE_TOOLS";
/// Variable overriding the rate limit retry bound.
pub const MAX_RETRIES_VAR: &str = "SMARTSHEET_MAX_RETRIES";

/// Settings shared by the library, the tool registry and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token for the API.
    pub access_token: String,
    /// API endpoint, e.g. `https://api.smartsheet.eu/2.0`.
    pub endpoint: String,
    /// Whether tools that delete remote data are exposed.
    pub allow_delete_tools: bool,
    /// Backoff applied to rate limited requests.
    pub retry_policy: RetryPolicy,
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// ```
    /// use smartsheet_tools::config::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "SMARTSHEET_API_KEY" => Some("abc".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.endpoint, "https://api.smartsheet.com/2.0");
    /// assert!(!config.allow_delete_tools);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                Error::ConfigurationError(format!("{} environment variable is not set", API_KEY_VAR))
            })?;

        let endpoint = lookup(ENDPOINT_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let allow_delete_tools = lookup(ALLOW_DELETE_VAR).as_deref() == Some("true");

        let mut retry_policy = RetryPolicy::default();
        if let Some(raw) = lookup(MAX_RETRIES_VAR) {
            retry_policy.max_retries = raw.trim().parse().map_err(|_| {
                Error::ConfigurationError(format!(
                    "{} must be a non-negative integer, got {:?}",
                    MAX_RETRIES_VAR, raw
                ))
            })?;
        }

        Ok(Self {
            access_token,
            endpoint,
            allow_delete_tools,
            retry_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[(ENDPOINT_VAR, DEFAULT_ENDPOINT)]));
        assert!(matches!(result, Err(Error::ConfigurationError(msg)) if msg.contains(API_KEY_VAR)));

        let result = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_full_configuration() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "token"),
            (ENDPOINT_VAR, "https://api.smartsheet.eu/2.0"),
            (ALLOW_DELETE_VAR, "true"),
            (MAX_RETRIES_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.access_token, "token");
        assert_eq!(config.endpoint, "https://api.smartsheet.eu/2.0");
        assert!(config.allow_delete_tools);
        assert_eq!(config.retry_policy.max_retries, 5);
    }

    #[test]
    fn test_delete_tools_need_exact_true() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "token"),
            (ALLOW_DELETE_VAR, "yes"),
        ]))
        .unwrap();
        assert!(!config.allow_delete_tools);
        assert_eq!(config.retry_policy, RetryPolicy::default());
    }

    #[test]
    fn test_bad_retry_bound_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "token"),
            (MAX_RETRIES_VAR, "-1"),
        ]));
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }
}
