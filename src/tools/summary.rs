use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{
        summary::{NewSummaryField, SummaryFieldUpdate},
        Id,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetArgs {
    sheet_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldArgs {
    sheet_id: Id,
    field_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddArgs {
    sheet_id: Id,
    fields: Vec<NewSummaryField>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    sheet_id: Id,
    fields: Vec<SummaryFieldUpdate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteArgs {
    sheet_id: Id,
    field_ids: Vec<Id>,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let sheet_id = json!({ "type": "integer", "description": "The ID of the sheet" });
    let field_type = json!({
        "type": "string",
        "enum": [
            "TEXT_NUMBER", "DATE", "DATETIME", "CONTACT_LIST", "CHECKBOX",
            "PICKLIST", "DURATION", "PREDECESSOR", "ABSTRACT_DATETIME"
        ],
        "description": "Type of the summary field"
    });

    vec![
        tool(
            "get_summary_fields",
            "Gets all summary fields for a sheet (the sheet summary section)",
            object_schema(json!({ "sheetId": sheet_id }), &["sheetId"]),
        ),
        tool(
            "get_summary_field",
            "Gets a specific summary field by ID",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "fieldId": { "type": "integer", "description": "The ID of the summary field" }
                }),
                &["sheetId", "fieldId"],
            ),
        ),
        tool(
            "add_summary_fields",
            "Adds new summary fields to a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "fields": {
                        "type": "array",
                        "description": "Summary fields to add",
                        "items": object_schema(
                            json!({
                                "title": { "type": "string", "description": "Title of the summary field" },
                                "type": field_type,
                                "formula": { "type": "string", "description": "Formula for the field" },
                                "objectValue": { "description": "Value for the field" },
                                "index": { "type": "integer", "description": "Position index for the field" }
                            }),
                            &["title", "type"],
                        )
                    }
                }),
                &["sheetId", "fields"],
            ),
        ),
        tool(
            "update_summary_fields",
            "Updates existing summary fields",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "fields": {
                        "type": "array",
                        "description": "Summary field updates",
                        "items": object_schema(
                            json!({
                                "id": { "type": "integer", "description": "ID of the summary field to update" },
                                "title": { "type": "string", "description": "New title for the field" },
                                "formula": { "type": "string", "description": "New formula for the field" },
                                "objectValue": { "description": "New value for the field" },
                                "index": { "type": "integer", "description": "New position index" },
                                "locked": { "type": "boolean", "description": "Whether to lock the field" }
                            }),
                            &["id"],
                        )
                    }
                }),
                &["sheetId", "fields"],
            ),
        ),
        destructive_tool(
            "delete_summary_fields",
            "Deletes summary fields from a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "fieldIds": { "type": "array", "items": { "type": "integer" }, "description": "Summary field IDs to delete" }
                }),
                &["sheetId", "fieldIds"],
            ),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let summary = client.summary();

    match name {
        "get_summary_fields" => {
            let args: SheetArgs = parse(args)?;
            render(&summary.fields(args.sheet_id).await?)
        }
        "get_summary_field" => {
            let args: FieldArgs = parse(args)?;
            match summary.field(args.sheet_id, args.field_id).await? {
                Some(field) => render(&field),
                None => Err(ToolError::NotFound(format!(
                    "Summary field {} not found",
                    args.field_id
                ))),
            }
        }
        "add_summary_fields" => {
            let args: AddArgs = parse(args)?;
            render(&summary.add_fields(args.sheet_id, &args.fields).await?)
        }
        "update_summary_fields" => {
            let args: UpdateArgs = parse(args)?;
            render(&summary.update_fields(args.sheet_id, &args.fields).await?)
        }
        "delete_summary_fields" => {
            let args: DeleteArgs = parse(args)?;
            render(&summary.delete_fields(args.sheet_id, &args.field_ids).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
