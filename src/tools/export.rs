use super::{object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{sheets::SheetQuery, Id},
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvArgs {
    sheet_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonArgs {
    sheet_id: Id,
    #[serde(flatten)]
    query: SheetQuery,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "export_sheet_to_csv",
            "Exports a sheet to CSV format",
            object_schema(
                json!({ "sheetId": { "type": "integer", "description": "The ID of the sheet to export" } }),
                &["sheetId"],
            ),
        ),
        tool(
            "get_sheet_as_json",
            "Gets a sheet in JSON format with optional filtering and pagination",
            object_schema(
                json!({
                    "sheetId": { "type": "integer", "description": "The ID of the sheet" },
                    "include": { "type": "array", "items": { "type": "string" }, "description": "Elements to include (e.g., attachments, discussions)" },
                    "exclude": { "type": "array", "items": { "type": "string" }, "description": "Elements to exclude" },
                    "rowIds": { "type": "array", "items": { "type": "integer" }, "description": "Specific row IDs to return" },
                    "columnIds": { "type": "array", "items": { "type": "integer" }, "description": "Specific column IDs to return" },
                    "filterId": { "type": "integer", "description": "Filter ID to apply" },
                    "pageSize": { "type": "integer", "description": "Number of rows per page" },
                    "page": { "type": "integer", "description": "Page number" }
                }),
                &["sheetId"],
            ),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let sheets = client.sheets();

    match name {
        "export_sheet_to_csv" => {
            let args: CsvArgs = parse(args)?;
            Ok(sheets.export_csv(args.sheet_id).await?)
        }
        "get_sheet_as_json" => {
            let args: JsonArgs = parse(args)?;
            render(&sheets.get_filtered(args.sheet_id, &args.query).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
