use super::{object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{api::events::EventQuery, Client};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    since: Option<String>,
    stream_position: Option<String>,
    max_count: Option<usize>,
    numeric_dates: Option<bool>,
}

impl From<ListArgs> for EventQuery {
    fn from(args: ListArgs) -> Self {
        EventQuery {
            since: args.since,
            stream_position: args.stream_position,
            max_count: args.max_count,
            numeric_dates: args.numeric_dates,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SinceArgs {
    timestamp: String,
    max_count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentArgs {
    max_count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectTypeArgs {
    object_type: String,
    since: Option<String>,
    max_count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionArgs {
    action: String,
    since: Option<String>,
    max_count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllArgs {
    since: String,
    max_total: Option<usize>,
}

fn filtered_query(since: Option<String>, max_count: Option<usize>) -> EventQuery {
    EventQuery {
        since,
        ..EventQuery::default()
    }
    .max_count(max_count)
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let since = json!({ "type": "string", "description": "ISO 8601 timestamp to read events from (e.g., '2024-01-01T00:00:00Z')" });
    let max_count = json!({ "type": "integer", "description": "Maximum number of events to return (1-10000)" });

    vec![
        tool(
            "get_events",
            "Gets organization events (system admin only)",
            object_schema(
                json!({
                    "since": since,
                    "streamPosition": { "type": "string", "description": "Stream position from a previous response" },
                    "maxCount": max_count,
                    "numericDates": { "type": "boolean", "description": "Return dates as epoch milliseconds" }
                }),
                &[],
            ),
        ),
        tool(
            "get_events_since",
            "Gets events since a specific timestamp",
            object_schema(
                json!({
                    "timestamp": since,
                    "maxCount": max_count
                }),
                &["timestamp"],
            ),
        ),
        tool(
            "get_recent_events",
            "Gets events from the last 24 hours",
            object_schema(json!({ "maxCount": max_count }), &[]),
        ),
        tool(
            "get_events_by_object_type",
            "Gets events for one object type (SHEET, WORKSPACE, FOLDER, REPORT, DASHBOARD, USER, GROUP)",
            object_schema(
                json!({
                    "objectType": { "type": "string", "description": "Object type to filter by" },
                    "since": since,
                    "maxCount": max_count
                }),
                &["objectType"],
            ),
        ),
        tool(
            "get_events_by_action",
            "Gets events for one action (CREATE, UPDATE, DELETE, LOAD, SHARE...)",
            object_schema(
                json!({
                    "action": { "type": "string", "description": "Action to filter by" },
                    "since": since,
                    "maxCount": max_count
                }),
                &["action"],
            ),
        ),
        tool(
            "get_all_events",
            "Gets all events since a timestamp, following the stream across pages",
            object_schema(
                json!({
                    "since": since,
                    "maxTotal": { "type": "integer", "description": "Maximum total number of events to read" }
                }),
                &["since"],
            ),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let events = client.events();

    match name {
        "get_events" => {
            let args: ListArgs = parse(args)?;
            render(&events.list(&args.into()).await?)
        }
        "get_events_since" => {
            let args: SinceArgs = parse(args)?;
            let query = EventQuery::since(args.timestamp).max_count(args.max_count);
            render(&events.list(&query).await?)
        }
        "get_recent_events" => {
            let args: RecentArgs = parse(args)?;
            render(&events.recent(args.max_count).await?)
        }
        "get_events_by_object_type" => {
            let args: ObjectTypeArgs = parse(args)?;
            let query = filtered_query(args.since, args.max_count);
            render(&events.by_object_type(&args.object_type, &query).await?)
        }
        "get_events_by_action" => {
            let args: ActionArgs = parse(args)?;
            let query = filtered_query(args.since, args.max_count);
            render(&events.by_action(&args.action, &query).await?)
        }
        "get_all_events" => {
            let args: AllArgs = parse(args)?;
            render(&events.all(&args.since, args.max_total).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
