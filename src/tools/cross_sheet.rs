use super::{object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{cross_sheet::NewCrossSheetReference, rows::CellRef, Id},
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
struct ReferenceArgs {
    sheet_id: Id,
    reference_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReferenceArgs {
    sheet_id: Id,
    #[serde(flatten)]
    reference: NewCrossSheetReference,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellArgs {
    sheet_id: Id,
    row_id: Id,
    column_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkArgs {
    #[serde(flatten)]
    cell: CellArgs,
    source_sheet_id: Id,
    source_row_id: Id,
    source_column_id: Id,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let sheet_id = json!({ "type": "integer", "description": "The ID of the sheet" });

    vec![
        tool(
            "list_cross_sheet_references",
            "Lists all cross-sheet references defined for a sheet",
            object_schema(json!({ "sheetId": sheet_id }), &["sheetId"]),
        ),
        tool(
            "get_cross_sheet_reference",
            "Gets a specific cross-sheet reference",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "referenceId": { "type": "integer", "description": "The ID of the cross-sheet reference" }
                }),
                &["sheetId", "referenceId"],
            ),
        ),
        tool(
            "create_cross_sheet_reference",
            "Creates a cross-sheet reference to use in formulas like VLOOKUP or INDEX",
            object_schema(
                json!({
                    "sheetId": { "type": "integer", "description": "The ID of the sheet where the reference will be used" },
                    "name": { "type": "string", "description": "Name for the cross-sheet reference" },
                    "sourceSheetId": { "type": "integer", "description": "ID of the source sheet to reference" },
                    "startRowId": { "type": "integer", "description": "ID of the first row in the range" },
                    "endRowId": { "type": "integer", "description": "ID of the last row in the range" },
                    "startColumnId": { "type": "integer", "description": "ID of the first column in the range" },
                    "endColumnId": { "type": "integer", "description": "ID of the last column in the range" }
                }),
                &["sheetId", "name", "sourceSheetId"],
            ),
        ),
        tool(
            "create_cell_link",
            "Creates a cell link that syncs a cell's value from another sheet",
            object_schema(
                json!({
                    "sheetId": { "type": "integer", "description": "The ID of the destination sheet" },
                    "rowId": { "type": "integer", "description": "The ID of the destination row" },
                    "columnId": { "type": "integer", "description": "The ID of the destination column" },
                    "sourceSheetId": { "type": "integer", "description": "The ID of the source sheet" },
                    "sourceRowId": { "type": "integer", "description": "The ID of the source row" },
                    "sourceColumnId": { "type": "integer", "description": "The ID of the source column" }
                }),
                &["sheetId", "rowId", "columnId", "sourceSheetId", "sourceRowId", "sourceColumnId"],
            ),
        ),
        tool(
            "remove_cell_link",
            "Removes the inbound cell link from a cell and clears it",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "rowId": { "type": "integer", "description": "The ID of the row" },
                    "columnId": { "type": "integer", "description": "The ID of the column" }
                }),
                &["sheetId", "rowId", "columnId"],
            ),
        ),
        tool(
            "get_cell_links",
            "Gets a sheet with cell link information on its cells",
            object_schema(json!({ "sheetId": sheet_id }), &["sheetId"]),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let cross_sheet = client.cross_sheet();

    match name {
        "list_cross_sheet_references" => {
            let args: SheetArgs = parse(args)?;
            render(&cross_sheet.references(args.sheet_id).await?)
        }
        "get_cross_sheet_reference" => {
            let args: ReferenceArgs = parse(args)?;
            render(&cross_sheet.reference(args.sheet_id, args.reference_id).await?)
        }
        "create_cross_sheet_reference" => {
            let args: CreateReferenceArgs = parse(args)?;
            render(
                &cross_sheet
                    .create_reference(args.sheet_id, &args.reference)
                    .await?,
            )
        }
        "create_cell_link" => {
            let args: LinkArgs = parse(args)?;
            let source = CellRef {
                sheet_id: args.source_sheet_id,
                row_id: args.source_row_id,
                column_id: args.source_column_id,
            };
            let cell = args.cell;
            render(
                &cross_sheet
                    .link_cell(cell.sheet_id, cell.row_id, cell.column_id, source)
                    .await?,
            )
        }
        "remove_cell_link" => {
            let args: CellArgs = parse(args)?;
            render(
                &cross_sheet
                    .unlink_cell(args.sheet_id, args.row_id, args.column_id)
                    .await?,
            )
        }
        "get_cell_links" => {
            let args: SheetArgs = parse(args)?;
            render(&cross_sheet.cell_links(args.sheet_id).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
