//! Example demonstrating rate limit handling.
//!
//! This example shows how to:
//! - Inspect the default backoff schedule of a `RetryPolicy`
//! - Build a client with a custom policy
//! - Disable retries entirely
//! - Read the platform error code and rate limit details from an `Error`
//!
//! The request examples need `SMARTSHEET_API_KEY` in the environment.
//!
//! Run with: `cargo run --example rate_limits`

use smartsheet_tools::{config::Config, Client, Error, RetryPolicy};
use std::time::Duration;

fn describe(error: &Error) {
    println!("Request failed: {}", error);
    if let Some(status) = error.status() {
        println!("  HTTP status: {}", status);
    }
    match error.error_code() {
        Some(4003) => println!("  Smartsheet error code 4003: rate limit exceeded"),
        Some(code) => println!("  Smartsheet error code: {}", code),
        None => println!("  No Smartsheet error code (transport or decoding failure)"),
    }
    if let Some(ref_id) = error.ref_id() {
        println!("  Reference id for support: {}", ref_id);
    }
    if error.is_rate_limited() {
        println!(
            "  Rate limited; server asked to wait {:?}",
            error.retry_after()
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("smartsheet_tools=debug")
        .init();

    println!("=== Example 1: Default Backoff Schedule ===");
    let policy = RetryPolicy::default();
    println!(
        "max_retries={} base_delay={:?} max_jitter={:?} default_retry_after={:?}",
        policy.max_retries, policy.base_delay, policy.max_jitter, policy.default_retry_after
    );
    for attempt in 0..policy.max_retries {
        let quiet = policy.backoff(attempt, None, Duration::ZERO);
        let hinted = policy.backoff(attempt, Some(Duration::from_secs(3)), Duration::ZERO);
        println!(
            "  attempt {}: {:?} without a hint, {:?} with Retry-After: 3",
            attempt, quiet, hinted
        );
    }
    println!(
        "  attempt 0 with random jitter: {:?}\n",
        policy.delay_for_attempt(0, None)
    );

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("Skipping request examples: {}", e);
            return Ok(());
        }
    };

    println!("=== Example 2: Custom Retry Policy ===");
    let client = Client::builder()
        .base_url(&config.endpoint)
        .access_token(&config.access_token)
        .timeout(Duration::from_secs(10))
        .retry_policy(RetryPolicy {
            max_retries: 5,
            base_delay: Duration::from_millis(500),
            max_jitter: Duration::from_millis(250),
            default_retry_after: Duration::from_secs(2),
        })
        .build()?;

    match client.users().current_user().await {
        Ok(me) => println!("Signed in as {:?}\n", me.email),
        Err(e) => describe(&e),
    }

    println!("=== Example 3: Retries Disabled ===");
    println!("A 429 surfaces immediately instead of being retried.\n");
    let client = Client::builder()
        .base_url(&config.endpoint)
        .access_token(&config.access_token)
        .retry_policy(RetryPolicy::none())
        .build()?;

    println!("=== Example 4: Reading Error Details ===");
    // No sheet has id 1, so the platform answers with a coded 404.
    match client.sheets().get(1, None).await {
        Ok(sheet) => println!("Unexpectedly found sheet {}", sheet["name"]),
        Err(e) => describe(&e),
    }

    Ok(())
}
