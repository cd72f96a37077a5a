//! Request descriptors.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;
use std::fmt::Display;

/// Metadata for an individual API request.
///
/// Holds the method, the path relative to the client's endpoint, extra headers
/// and the query string. Query parameters keep their insertion order; absent
/// values are never added.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The request path (relative to the base URL), e.g. `/sheets/123/columns`.
    pub path: String,

    /// Additional headers for this request.
    pub headers: HeaderMap,

    /// Query parameters for this request, already stringified.
    pub query_params: Vec<(String, String)>,
}

impl RequestMetadata {
    /// Creates a new `RequestMetadata` with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query_params: Vec::new(),
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query_params.push((key.into(), value.to_string()));
        self
    }

    /// Adds a query parameter only when a value is present.
    ///
    /// ```
    /// use smartsheet_tools::metadata::RequestMetadata;
    /// use http::Method;
    ///
    /// let metadata = RequestMetadata::new(Method::GET, "/reports")
    ///     .with_optional_query_param("pageSize", Some(100))
    ///     .with_optional_query_param("page", None::<u32>);
    ///
    /// assert_eq!(metadata.query_params, vec![("pageSize".to_string(), "100".to_string())]);
    /// ```
    pub fn with_optional_query_param<V: Display>(
        self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.with_query_param(key, value),
            None => self,
        }
    }

    /// Adds query parameters from a JSON object, skipping `null` values.
    ///
    /// Strings are used verbatim, arrays are joined with `,`, everything else
    /// uses its JSON text.
    pub fn with_json_query_params(mut self, params: &serde_json::Map<String, Value>) -> Self {
        for (key, value) in params {
            if let Some(value) = query_value(value) {
                self.query_params.push((key.clone(), value));
            }
        }
        self
    }
}

/// Stringifies a JSON value for use in a query string. `null` has no representation.
pub(crate) fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| query_value(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_values_are_omitted() {
        let metadata = RequestMetadata::new(Method::GET, "/events")
            .with_optional_query_param("since", Some("2024-01-01T00:00:00Z"))
            .with_optional_query_param("maxCount", None::<u32>)
            .with_optional_query_param("numericDates", Some(false));

        assert_eq!(
            metadata.query_params,
            vec![
                ("since".to_string(), "2024-01-01T00:00:00Z".to_string()),
                ("numericDates".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_query_params_are_stringified() {
        let params = json!({
            "include": "filters",
            "pageSize": 50,
            "level": null,
            "objectIds": [1, 2, 3],
            "includeAll": true
        });

        let metadata = RequestMetadata::new(Method::GET, "/x")
            .with_json_query_params(params.as_object().unwrap());

        let mut pairs = metadata.query_params.clone();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("include".to_string(), "filters".to_string()),
                ("includeAll".to_string(), "true".to_string()),
                ("objectIds".to_string(), "1,2,3".to_string()),
                ("pageSize".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let result = RequestMetadata::new(Method::GET, "/x").with_header("bad header", "v");
        assert!(matches!(result, Err(crate::Error::ConfigurationError(_))));
    }
}
