use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{
        columns::{ColumnUpdate, NewColumn},
        Id,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    sheet_id: Id,
    include: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnArgs {
    sheet_id: Id,
    column_id: Id,
    include: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddArgs {
    sheet_id: Id,
    #[serde(flatten)]
    column: NewColumn,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    sheet_id: Id,
    column_id: Id,
    #[serde(flatten)]
    update: ColumnUpdate,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let sheet_id = json!({ "type": "integer", "description": "The ID of the sheet" });

    vec![
        tool(
            "get_columns",
            "Lists all columns of a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "include": { "type": "string", "description": "Comma-separated list of elements to include (e.g., 'filters')" }
                }),
                &["sheetId"],
            ),
        ),
        tool(
            "get_column",
            "Gets a specific column of a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "columnId": { "type": "integer", "description": "The ID of the column" },
                    "include": { "type": "string", "description": "Comma-separated list of elements to include" }
                }),
                &["sheetId", "columnId"],
            ),
        ),
        tool(
            "add_column",
            "Adds a column to a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "title": { "type": "string", "description": "Column title" },
                    "type": { "type": "string", "description": "Column type (TEXT_NUMBER, DATE, DATETIME, CONTACT_LIST, CHECKBOX, PICKLIST, DURATION, PREDECESSOR, ABSTRACT_DATETIME)" },
                    "index": { "type": "integer", "description": "Column index position (0-based)" },
                    "options": { "type": "array", "items": { "type": "string" }, "description": "Options for PICKLIST columns" },
                    "symbol": { "type": "string", "description": "Symbol for CHECKBOX columns (STAR, FLAG, etc.)" },
                    "width": { "type": "integer", "description": "Column width in pixels" }
                }),
                &["sheetId", "title", "type"],
            ),
        ),
        tool(
            "update_column",
            "Updates a column's title, type, position or options",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "columnId": { "type": "integer", "description": "The ID of the column to update" },
                    "title": { "type": "string", "description": "New column title" },
                    "type": { "type": "string", "description": "New column type" },
                    "index": { "type": "integer", "description": "New column index position" },
                    "options": { "type": "array", "items": { "type": "string" }, "description": "New options for PICKLIST columns" },
                    "symbol": { "type": "string", "description": "New symbol for CHECKBOX columns" },
                    "width": { "type": "integer", "description": "New column width in pixels" }
                }),
                &["sheetId", "columnId"],
            ),
        ),
        destructive_tool(
            "delete_column",
            "Deletes a column from a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "columnId": { "type": "integer", "description": "The ID of the column to delete" }
                }),
                &["sheetId", "columnId"],
            ),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let columns = client.columns();

    match name {
        "get_columns" => {
            let args: ListArgs = parse(args)?;
            render(&columns.list(args.sheet_id, args.include.as_deref()).await?)
        }
        "get_column" => {
            let args: ColumnArgs = parse(args)?;
            render(
                &columns
                    .get(args.sheet_id, args.column_id, args.include.as_deref())
                    .await?,
            )
        }
        "add_column" => {
            let args: AddArgs = parse(args)?;
            render(&columns.add(args.sheet_id, &args.column).await?)
        }
        "update_column" => {
            let args: UpdateArgs = parse(args)?;
            render(
                &columns
                    .update(args.sheet_id, args.column_id, &args.update)
                    .await?,
            )
        }
        "delete_column" => {
            let args: ColumnArgs = parse(args)?;
            columns.delete(args.sheet_id, args.column_id).await?;
            Ok(format!(
                "Successfully deleted column {} from sheet {}",
                args.column_id, args.sheet_id
            ))
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
