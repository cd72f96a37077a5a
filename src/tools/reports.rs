use super::{object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{reports::ReportEmail, Id},
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    page_size: Option<u32>,
    page: Option<u32>,
    include_all: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetArgs {
    report_id: Id,
    page_size: Option<u32>,
    page: Option<u32>,
    include: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendArgs {
    report_id: Id,
    #[serde(flatten)]
    email: ReportEmail,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let report_id = json!({ "type": "integer", "description": "The ID of the report" });

    vec![
        tool(
            "list_reports",
            "Lists all reports accessible to the current user",
            object_schema(
                json!({
                    "pageSize": { "type": "integer", "description": "Number of reports to return per page" },
                    "page": { "type": "integer", "description": "Page number to return" },
                    "includeAll": { "type": "boolean", "description": "Include all results without pagination" }
                }),
                &[],
            ),
        ),
        tool(
            "get_report",
            "Retrieves a report by ID with its data rows",
            object_schema(
                json!({
                    "reportId": report_id,
                    "pageSize": { "type": "integer", "description": "Number of rows to return per page" },
                    "page": { "type": "integer", "description": "Page number to return" },
                    "include": { "type": "string", "description": "Comma-separated list of elements to include" }
                }),
                &["reportId"],
            ),
        ),
        tool(
            "send_report",
            "Sends a report via email to specified recipients",
            object_schema(
                json!({
                    "reportId": report_id,
                    "sendTo": {
                        "type": "array",
                        "description": "Email recipients",
                        "items": object_schema(
                            json!({ "email": { "type": "string", "description": "Email address of recipient" } }),
                            &["email"],
                        )
                    },
                    "subject": { "type": "string", "description": "Email subject line" },
                    "message": { "type": "string", "description": "Email message body" },
                    "ccMe": { "type": "boolean", "description": "CC the sender" },
                    "format": { "type": "string", "enum": ["PDF", "EXCEL", "PDF_GANTT"], "description": "Export format" }
                }),
                &["reportId", "sendTo", "subject"],
            ),
        ),
        tool(
            "get_report_publish_status",
            "Gets the publish status of a report",
            object_schema(json!({ "reportId": report_id }), &["reportId"]),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let reports = client.reports();

    match name {
        "list_reports" => {
            let args: ListArgs = parse(args)?;
            render(&reports.list(args.page_size, args.page, args.include_all).await?)
        }
        "get_report" => {
            let args: GetArgs = parse(args)?;
            render(
                &reports
                    .get(args.report_id, args.page_size, args.page, args.include.as_deref())
                    .await?,
            )
        }
        "send_report" => {
            let args: SendArgs = parse(args)?;
            render(&reports.send(args.report_id, &args.email).await?)
        }
        "get_report_publish_status" => {
            #[derive(Deserialize)]
            #[serde(rename_all = "camelCase")]
            struct ReportArgs {
                report_id: Id,
            }

            let args: ReportArgs = parse(args)?;
            render(&reports.publish_status(args.report_id).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
