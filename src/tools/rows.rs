use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{
        rows::{NewRow, RowDestination, RowUpdate, SortCriterion},
        Container, Id,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferArgs {
    source_sheet_id: Id,
    row_ids: Vec<Id>,
    destination_sheet_id: Id,
    to_top: Option<bool>,
    to_bottom: Option<bool>,
    parent_id: Option<Id>,
    sibling_id: Option<Id>,
}

impl TransferArgs {
    fn destination(&self) -> RowDestination {
        RowDestination {
            sheet_id: self.destination_sheet_id,
            to_top: self.to_top.filter(|&top| top),
            to_bottom: self.to_bottom.filter(|&bottom| bottom),
            parent_id: self.parent_id,
            sibling_id: self.sibling_id,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveSheetArgs {
    sheet_id: Id,
    folder_id: Option<Id>,
    workspace_id: Option<Id>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteArgs {
    sheet_id: Id,
    row_ids: Vec<Id>,
    #[serde(default)]
    ignore_rows_not_found: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddArgs {
    sheet_id: Id,
    rows: Vec<NewRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    sheet_id: Id,
    rows: Vec<RowUpdate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SortArgs {
    sheet_id: Id,
    sort_criteria: Vec<SortCriterion>,
}

fn transfer_schema(verb: &str) -> Value {
    object_schema(
        json!({
            "sourceSheetId": { "type": "integer", "description": "The ID of the source sheet" },
            "rowIds": { "type": "array", "items": { "type": "integer" }, "description": format!("Row IDs to {}", verb) },
            "destinationSheetId": { "type": "integer", "description": "The ID of the destination sheet" },
            "toTop": { "type": "boolean", "description": "Place rows at the top of the destination sheet" },
            "toBottom": { "type": "boolean", "description": "Place rows at the bottom of the destination sheet" },
            "parentId": { "type": "integer", "description": "ID of the parent row in the destination" },
            "siblingId": { "type": "integer", "description": "ID of the sibling row in the destination" }
        }),
        &["sourceSheetId", "rowIds", "destinationSheetId"],
    )
}

fn cells_schema() -> Value {
    json!({
        "type": "array",
        "description": "Cells to write",
        "items": object_schema(
            json!({
                "columnId": { "type": "integer", "description": "Column ID" },
                "value": { "description": "Cell value" }
            }),
            &["columnId"],
        )
    })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let sheet_id = json!({ "type": "integer", "description": "The ID of the sheet" });

    vec![
        tool("move_rows", "Moves rows from one sheet to another", transfer_schema("move")),
        tool("copy_rows", "Copies rows from one sheet to another", transfer_schema("copy")),
        tool(
            "move_sheet",
            "Moves a sheet to a different folder or workspace",
            object_schema(
                json!({
                    "sheetId": { "type": "integer", "description": "The ID of the sheet to move" },
                    "folderId": { "type": "integer", "description": "ID of the destination folder" },
                    "workspaceId": { "type": "integer", "description": "ID of the destination workspace" }
                }),
                &["sheetId"],
            ),
        ),
        destructive_tool(
            "bulk_delete_rows",
            "Deletes multiple rows from a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "rowIds": { "type": "array", "items": { "type": "integer" }, "description": "Row IDs to delete" },
                    "ignoreRowsNotFound": { "type": "boolean", "description": "Don't fail when some rows do not exist" }
                }),
                &["sheetId", "rowIds"],
            ),
        ),
        tool(
            "bulk_add_rows",
            "Adds multiple rows to a sheet in a single operation",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "rows": {
                        "type": "array",
                        "description": "Rows to add",
                        "items": object_schema(
                            json!({
                                "toTop": { "type": "boolean", "description": "Add the row at the top of the sheet" },
                                "toBottom": { "type": "boolean", "description": "Add the row at the bottom of the sheet" },
                                "parentId": { "type": "integer", "description": "ID of the parent row" },
                                "siblingId": { "type": "integer", "description": "ID of the sibling row" },
                                "cells": cells_schema()
                            }),
                            &["cells"],
                        )
                    }
                }),
                &["sheetId", "rows"],
            ),
        ),
        tool(
            "bulk_update_rows",
            "Updates multiple rows in a sheet in a single operation",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "rows": {
                        "type": "array",
                        "description": "Rows to update",
                        "items": object_schema(
                            json!({
                                "id": { "type": "integer", "description": "Row ID" },
                                "cells": cells_schema()
                            }),
                            &["id", "cells"],
                        )
                    }
                }),
                &["sheetId", "rows"],
            ),
        ),
        tool(
            "sort_rows",
            "Sorts rows in a sheet by one or more columns",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "sortCriteria": {
                        "type": "array",
                        "description": "Sort criteria, applied in order",
                        "items": object_schema(
                            json!({
                                "columnId": { "type": "integer", "description": "Column ID to sort by" },
                                "direction": { "type": "string", "enum": ["ASCENDING", "DESCENDING"], "description": "Sort direction" }
                            }),
                            &["columnId", "direction"],
                        )
                    }
                }),
                &["sheetId", "sortCriteria"],
            ),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let rows = client.rows();

    match name {
        "move_rows" => {
            let args: TransferArgs = parse(args)?;
            render(
                &rows
                    .move_to(args.source_sheet_id, &args.row_ids, &args.destination())
                    .await?,
            )
        }
        "copy_rows" => {
            let args: TransferArgs = parse(args)?;
            render(
                &rows
                    .copy_to(args.source_sheet_id, &args.row_ids, &args.destination())
                    .await?,
            )
        }
        "move_sheet" => {
            let args: MoveSheetArgs = parse(args)?;
            let container = match Container::from_ids(args.folder_id, args.workspace_id) {
                Container::Home => {
                    return Err(ToolError::InvalidArguments(serde::de::Error::custom(
                        "folderId or workspaceId is required",
                    )))
                }
                container => container,
            };
            render(&client.sheets().move_to(args.sheet_id, container).await?)
        }
        "bulk_delete_rows" => {
            let args: DeleteArgs = parse(args)?;
            render(
                &rows
                    .delete(args.sheet_id, &args.row_ids, args.ignore_rows_not_found)
                    .await?,
            )
        }
        "bulk_add_rows" => {
            let args: AddArgs = parse(args)?;
            render(&rows.add(args.sheet_id, &args.rows).await?)
        }
        "bulk_update_rows" => {
            let args: UpdateArgs = parse(args)?;
            render(&rows.update(args.sheet_id, &args.rows).await?)
        }
        "sort_rows" => {
            let args: SortArgs = parse(args)?;
            render(&rows.sort(args.sheet_id, &args.sort_criteria).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
