//! Parsing of the server's rate limit hints.

use http::HeaderMap;
use std::time::{Duration, SystemTime};

/// Parses the `Retry-After` header of a rate limited response.
///
/// Supports both delay-seconds (integer) and HTTP-date formats. An HTTP-date
/// in the past yields a zero delay. Unparseable values are ignored so the
/// retry policy can fall back to its default hint.
///
/// # Examples
///
/// ```
/// use smartsheet_tools::rate_limit::parse_retry_after;
/// use http::HeaderMap;
/// use std::time::Duration;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("retry-after", "60".parse().unwrap());
///
/// assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(60)));
/// ```
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date_time = httpdate::parse_http_date(header).ok()?;
    Some(
        date_time
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("2"));

        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        let future = SystemTime::now() + Duration::from_secs(120);
        let mut headers = HeaderMap::new();
        headers.insert(
            "retry-after",
            HeaderValue::from_str(&httpdate::fmt_http_date(future)).unwrap(),
        );

        let delay = parse_retry_after(&headers).unwrap();
        // HTTP dates have whole-second precision
        assert!(
            delay >= Duration::from_secs(118) && delay <= Duration::from_secs(120),
            "Delay should be close to 120 seconds, got {:?}",
            delay
        );
    }

    #[test]
    fn test_parse_retry_after_past_date_is_zero() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "retry-after",
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );

        assert_eq!(parse_retry_after(&headers), Some(Duration::ZERO));
    }

    #[test]
    fn test_missing_or_garbage_retry_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert("retry-after", HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after(&headers), None);
    }
}
