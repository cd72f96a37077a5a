use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{attachments::UrlAttachment, Id},
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    sheet_id: Id,
    page_size: Option<u32>,
    page: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowListArgs {
    row_id: Id,
    #[serde(flatten)]
    list: ListArgs,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentArgs {
    sheet_id: Id,
    attachment_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachArgs {
    sheet_id: Id,
    #[serde(flatten)]
    attachment: UrlAttachment,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowAttachArgs {
    row_id: Id,
    #[serde(flatten)]
    attach: AttachArgs,
}

fn url_attachment_properties() -> Value {
    json!({
        "sheetId": { "type": "integer", "description": "The ID of the sheet" },
        "name": { "type": "string", "description": "Display name for the attachment" },
        "url": { "type": "string", "description": "The URL to attach" },
        "attachmentType": {
            "type": "string",
            "enum": ["LINK", "BOX_COM", "DROPBOX", "EGNYTE", "EVERNOTE", "GOOGLE_DRIVE", "ONEDRIVE"],
            "description": "Type of URL attachment"
        }
    })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let sheet_id = json!({ "type": "integer", "description": "The ID of the sheet" });
    let row_id = json!({ "type": "integer", "description": "The ID of the row" });
    let page_size = json!({ "type": "integer", "description": "Number of attachments to return per page" });
    let page = json!({ "type": "integer", "description": "Page number to return" });

    let mut row_attachment = url_attachment_properties();
    row_attachment["rowId"] = row_id.clone();

    vec![
        tool(
            "list_sheet_attachments",
            "Lists all attachments on a sheet",
            object_schema(
                json!({ "sheetId": sheet_id, "pageSize": page_size, "page": page }),
                &["sheetId"],
            ),
        ),
        tool(
            "list_row_attachments",
            "Lists all attachments on a specific row",
            object_schema(
                json!({ "sheetId": sheet_id, "rowId": row_id, "pageSize": page_size, "page": page }),
                &["sheetId", "rowId"],
            ),
        ),
        tool(
            "get_attachment",
            "Gets attachment metadata including download URL",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "attachmentId": { "type": "integer", "description": "The ID of the attachment" }
                }),
                &["sheetId", "attachmentId"],
            ),
        ),
        tool(
            "attach_url_to_sheet",
            "Attaches a URL (link, Google Drive, Dropbox, etc.) to a sheet",
            object_schema(
                url_attachment_properties(),
                &["sheetId", "name", "url", "attachmentType"],
            ),
        ),
        tool(
            "attach_url_to_row",
            "Attaches a URL (link, Google Drive, Dropbox, etc.) to a specific row",
            object_schema(
                row_attachment,
                &["sheetId", "rowId", "name", "url", "attachmentType"],
            ),
        ),
        destructive_tool(
            "delete_attachment",
            "Deletes an attachment from a sheet",
            object_schema(
                json!({
                    "sheetId": sheet_id,
                    "attachmentId": { "type": "integer", "description": "The ID of the attachment to delete" }
                }),
                &["sheetId", "attachmentId"],
            ),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let attachments = client.attachments();

    match name {
        "list_sheet_attachments" => {
            let args: ListArgs = parse(args)?;
            render(
                &attachments
                    .list_for_sheet(args.sheet_id, args.page, args.page_size)
                    .await?,
            )
        }
        "list_row_attachments" => {
            let RowListArgs { row_id, list } = parse(args)?;
            render(
                &attachments
                    .list_for_row(list.sheet_id, row_id, list.page, list.page_size)
                    .await?,
            )
        }
        "get_attachment" => {
            let args: AttachmentArgs = parse(args)?;
            render(&attachments.get(args.sheet_id, args.attachment_id).await?)
        }
        "attach_url_to_sheet" => {
            let args: AttachArgs = parse(args)?;
            render(
                &attachments
                    .attach_url_to_sheet(args.sheet_id, &args.attachment)
                    .await?,
            )
        }
        "attach_url_to_row" => {
            let RowAttachArgs { row_id, attach } = parse(args)?;
            render(
                &attachments
                    .attach_url_to_row(attach.sheet_id, row_id, &attach.attachment)
                    .await?,
            )
        }
        "delete_attachment" => {
            let args: AttachmentArgs = parse(args)?;
            attachments.delete(args.sheet_id, args.attachment_id).await?;
            Ok(format!(
                "Successfully deleted attachment {} from sheet {}",
                args.attachment_id, args.sheet_id
            ))
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
