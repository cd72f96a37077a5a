//! Retry policy for rate limited requests.
//!
//! Only HTTP 429 responses are retried. The delay before retry `n` (zero-based)
//! is `max(retry_after, base_delay * 2^n + jitter)`, where `retry_after` is the
//! server's hint (or [`RetryPolicy::default_retry_after`] when absent) and
//! `jitter` is uniform in `[0, max_jitter)`.

use crate::{Error, Result};
use rand::Rng;
use std::time::Duration;

/// Bounds and constants of the rate limit backoff.
///
/// # Examples
///
/// ```
/// use smartsheet_tools::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_retries, 3);
///
/// // Server asked for 5 seconds: honored even though 2^0 * 1s + jitter is smaller.
/// let delay = policy.backoff(0, Some(Duration::from_secs(5)), Duration::from_millis(250));
/// assert_eq!(delay, Duration::from_secs(5));
///
/// // No hint: exponential component wins on later attempts.
/// let delay = policy.backoff(2, None, Duration::from_millis(250));
/// assert_eq!(delay, Duration::from_millis(4250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base of the exponential component (`base_delay * 2^attempt`).
    pub base_delay: Duration,
    /// Exclusive upper bound of the random jitter added to the exponential component.
    pub max_jitter: Duration,
    /// Server hint assumed when a 429 carries no usable `Retry-After` header.
    pub default_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::from_secs(1),
            default_retry_after: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Computes the backoff delay for a given zero-based attempt with explicit jitter.
    pub fn backoff(&self, attempt: usize, retry_after: Option<Duration>, jitter: Duration) -> Duration {
        let hinted = retry_after.unwrap_or(self.default_retry_after);

        let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
        let multiplier = 2u32.saturating_pow(exponent);
        let exponential = self.base_delay.saturating_mul(multiplier).saturating_add(jitter);

        hinted.max(exponential)
    }

    /// Computes the backoff delay for an attempt, drawing a fresh random jitter.
    pub fn delay_for_attempt(&self, attempt: usize, retry_after: Option<Duration>) -> Duration {
        self.backoff(attempt, retry_after, self.random_jitter())
    }

    fn random_jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }

    /// Classifies the result of one attempt.
    ///
    /// Rate limited failures with budget left become [`Outcome::Retry`]; every
    /// other failure is terminal.
    pub fn classify<T>(&self, attempt: usize, result: Result<T>) -> Outcome<T> {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) if error.is_retryable() && attempt < self.max_retries => Outcome::Retry {
                delay: self.delay_for_attempt(attempt, error.retry_after()),
                error,
            },
            Err(error) => Outcome::Fail(error),
        }
    }
}

/// What the request loop does after an attempt.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The attempt succeeded; return the value.
    Success(T),
    /// The attempt was rate limited; sleep for `delay` and send the same request again.
    Retry {
        /// How long to wait before the next attempt
        delay: Duration,
        /// The rate limit error that triggered the retry
        error: Error,
    },
    /// The attempt failed terminally; surface the error.
    Fail(Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn rate_limited(retry_after: Option<Duration>) -> Error {
        Error::from_response(StatusCode::TOO_MANY_REQUESTS, String::new(), retry_after)
    }

    #[test]
    fn test_exponential_backoff_without_hint() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff(0, None, Duration::ZERO), Duration::from_secs(1));
        assert_eq!(policy.backoff(1, None, Duration::ZERO), Duration::from_secs(2));
        assert_eq!(policy.backoff(2, None, Duration::ZERO), Duration::from_secs(4));
        assert_eq!(
            policy.backoff(1, None, Duration::from_millis(999)),
            Duration::from_millis(2999)
        );
    }

    #[test]
    fn test_retry_after_hint_wins_when_longer() {
        let policy = RetryPolicy::default();

        assert_eq!(
            policy.backoff(1, Some(Duration::from_secs(30)), Duration::from_millis(500)),
            Duration::from_secs(30)
        );
        // A short hint never shortens the exponential component
        assert_eq!(
            policy.backoff(2, Some(Duration::from_secs(1)), Duration::from_millis(500)),
            Duration::from_millis(4500)
        );
    }

    #[test]
    fn test_random_delay_stays_within_bounds() {
        let policy = RetryPolicy::default();

        for attempt in 0..3 {
            let floor = Duration::from_secs(1 << attempt);
            for _ in 0..50 {
                let delay = policy.delay_for_attempt(attempt, None);
                assert!(delay >= floor, "attempt {}: {:?} < {:?}", attempt, delay, floor);
                assert!(delay < floor + Duration::from_secs(1));
            }
        }
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let policy = RetryPolicy {
            max_jitter: Duration::ZERO,
            ..RetryPolicy::default()
        };

        assert_eq!(policy.delay_for_attempt(1, None), Duration::from_secs(2));
    }

    #[test]
    fn test_huge_attempt_saturates() {
        let policy = RetryPolicy::default();
        let delay = policy.backoff(usize::MAX, None, Duration::ZERO);
        assert!(delay >= Duration::from_secs(u64::from(u32::MAX)));
    }

    #[test]
    fn test_classify_retries_rate_limits_within_budget() {
        let policy = RetryPolicy::default();

        for attempt in 0..3 {
            match policy.classify::<()>(attempt, Err(rate_limited(Some(Duration::from_secs(2))))) {
                Outcome::Retry { delay, .. } => assert!(delay >= Duration::from_secs(2)),
                other => panic!("Expected Retry at attempt {}, got {:?}", attempt, other),
            }
        }

        assert!(matches!(
            policy.classify::<()>(3, Err(rate_limited(None))),
            Outcome::Fail(_)
        ));
    }

    #[test]
    fn test_classify_other_failures_are_terminal() {
        let policy = RetryPolicy::default();
        let not_found = Error::from_response(StatusCode::NOT_FOUND, String::new(), None);

        assert!(matches!(policy.classify::<()>(0, Err(not_found)), Outcome::Fail(_)));
        assert!(matches!(
            policy.classify::<()>(0, Err(Error::ConfigurationError("bad".into()))),
            Outcome::Fail(_)
        ));
        assert!(matches!(policy.classify(2, Ok(7)), Outcome::Success(7)));
    }

    #[test]
    fn test_none_policy_never_retries() {
        let policy = RetryPolicy::none();
        assert!(matches!(
            policy.classify::<()>(0, Err(rate_limited(None))),
            Outcome::Fail(_)
        ));
    }
}
