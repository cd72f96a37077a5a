//! Organization event stream (system admin only).
//!
//! The platform has no server-side filters; [`Events::by_object_type`] and
//! [`Events::by_action`] filter one page client-side.

use crate::{metadata::RequestMetadata, Client, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Largest page the event stream serves.
pub const MAX_EVENTS_PER_PAGE: usize = 10_000;

/// One audited action in the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: Option<String>,
    /// `SHEET`, `WORKSPACE`, `FOLDER`, `REPORT`, `DASHBOARD`, `USER`, `GROUP`...
    pub object_type: Option<String>,
    /// `CREATE`, `UPDATE`, `DELETE`, `LOAD`, `SHARE`...
    pub action: Option<String>,
    /// Numeric for most objects, string for some
    pub object_id: Option<Value>,
    /// ISO 8601 text, or epoch milliseconds with `numericDates`
    pub event_timestamp: Option<Value>,
    /// The user the action was performed as
    pub user_id: Option<u64>,
    /// The user who issued the request, differs from `user_id` under impersonation
    pub request_user_id: Option<u64>,
    /// Client that made the change, e.g. `WEB_APP` or `API_INTEGRATED_APP`
    pub source: Option<String>,
    pub additional_details: Option<Map<String, Value>>,
}

/// One page of the event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    #[serde(default)]
    pub data: Vec<Event>,
    /// More events are ready to be read right away
    #[serde(default)]
    pub more_available: bool,
    /// Position to resume from on the next request
    pub next_stream_position: Option<String>,
}

/// Where to read the stream from and how much.
///
/// Use `since` for the first request and `stream_position` (taken from
/// [`EventsPage::next_stream_position`]) for the following ones.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// ISO 8601 start time
    pub since: Option<String>,
    pub stream_position: Option<String>,
    /// Page size, at most [`MAX_EVENTS_PER_PAGE`]
    pub max_count: Option<usize>,
    /// Timestamps as epoch milliseconds instead of text
    pub numeric_dates: Option<bool>,
}

impl EventQuery {
    /// Starts reading at `since`.
    pub fn since(since: impl Into<String>) -> Self {
        Self {
            since: Some(since.into()),
            ..Self::default()
        }
    }

    /// Sets the page size.
    pub fn max_count(mut self, max_count: Option<usize>) -> Self {
        self.max_count = max_count;
        self
    }
}

/// Event stream endpoints; see [`Client::events`].
pub struct Events<'a> {
    client: &'a Client,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// One page of the stream.
    pub async fn list(&self, query: &EventQuery) -> Result<EventsPage> {
        let metadata = RequestMetadata::new(Method::GET, "/events")
            .with_optional_query_param("since", query.since.as_deref().filter(|s| !s.is_empty()))
            .with_optional_query_param(
                "streamPosition",
                query.stream_position.as_deref().filter(|s| !s.is_empty()),
            )
            .with_optional_query_param("maxCount", query.max_count.filter(|&n| n > 0))
            .with_optional_query_param("numericDates", query.numeric_dates);
        self.client.fetch(metadata).await
    }

    /// Events of the last 24 hours.
    pub async fn recent(&self, max_count: Option<usize>) -> Result<EventsPage> {
        let since = chrono::Utc::now() - chrono::Duration::hours(24);
        let query = EventQuery::since(since.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .max_count(max_count);
        self.list(&query).await
    }

    pub async fn by_object_type(&self, object_type: &str, query: &EventQuery) -> Result<Vec<Event>> {
        let page = self.list(query).await?;
        Ok(page
            .data
            .into_iter()
            .filter(|e| e.object_type.as_deref() == Some(object_type))
            .collect())
    }

    pub async fn by_action(&self, action: &str, query: &EventQuery) -> Result<Vec<Event>> {
        let page = self.list(query).await?;
        Ok(page
            .data
            .into_iter()
            .filter(|e| e.action.as_deref() == Some(action))
            .collect())
    }

    /// Follows the stream from `since` until it is drained or `max_total` events were read.
    ///
    /// `max_total` of `None` (or zero) reads everything available.
    pub async fn all(&self, since: &str, max_total: Option<usize>) -> Result<Vec<Event>> {
        let max_total = max_total.filter(|&n| n > 0);
        let mut events = Vec::new();
        let mut query = EventQuery::since(since);

        loop {
            let remaining = match max_total {
                Some(max) if events.len() >= max => break,
                Some(max) => max - events.len(),
                None => MAX_EVENTS_PER_PAGE,
            };
            query.max_count = Some(remaining.min(MAX_EVENTS_PER_PAGE));

            let page = self.list(&query).await?;
            events.extend(page.data);

            match page.next_stream_position {
                Some(position) if page.more_available => {
                    query.since = None;
                    query.stream_position = Some(position);
                }
                _ => break,
            }
        }

        if let Some(max) = max_total {
            events.truncate(max);
        }
        Ok(events)
    }
}
