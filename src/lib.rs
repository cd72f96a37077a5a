//! # smartsheet-tools - A rate-limit aware Smartsheet API client
//!
//! Every call to the Smartsheet REST API goes through one [`Client`], which
//! joins the endpoint, path and query, sends the bearer token, decodes JSON,
//! retries rate limited requests (HTTP 429) with exponential backoff and turns
//! every failure into one normalized [`Error`].
//!
//! On top of the client sit typed resource wrappers ([`api`]) and a catalog of
//! callable tools for automation hosts ([`tools`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use smartsheet_tools::{config::Config, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smartsheet_tools::Error> {
//!     let config = Config::from_env()?;
//!     let client = Client::from_config(&config)?;
//!
//!     let me = client.users().current_user().await?;
//!     println!("Signed in as {:?}", me.email);
//!
//!     let sheet = client.sheets().get(4583173393803140, None).await?;
//!     println!("{}", sheet["name"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! API failures keep the platform's `errorCode`, `detail` and `refId`:
//!
//! ```no_run
//! use smartsheet_tools::{Client, Error};
//!
//! # async fn example(client: Client) {
//! match client.get::<serde_json::Value>("/sheets/1").await {
//!     Ok(sheet) => println!("{}", sheet),
//!     Err(e) if e.is_rate_limited() => eprintln!("still rate limited: {}", e),
//!     Err(e @ Error::Api { .. }) => {
//!         eprintln!("{} (code {:?}, ref {:?})", e, e.error_code(), e.ref_id());
//!     }
//!     Err(e) => eprintln!("request failed: {}", e),
//! }
//! # }
//! ```
//!
//! ## Retries
//!
//! Only rate limited responses are retried. The wait before each retry is the
//! larger of the server's `Retry-After` and `base_delay * 2^attempt + jitter`:
//!
//! ```no_run
//! use smartsheet_tools::{Client, RetryPolicy};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), smartsheet_tools::Error> {
//! let client = Client::builder()
//!     .base_url("https://api.smartsheet.com/2.0")
//!     .access_token("my-token")
//!     .retry_policy(RetryPolicy {
//!         max_retries: 5,
//!         base_delay: Duration::from_millis(500),
//!         ..RetryPolicy::default()
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod api;
mod client;
pub mod config;
mod error;
pub mod metadata;
pub mod rate_limit;
mod response;
pub mod retry;
pub mod tools;

pub use client::{Client, ClientBuilder, USER_AGENT};
pub use error::{Error, Result};
pub use response::Response;
pub use retry::RetryPolicy;
