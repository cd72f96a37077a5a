use super::{object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{Container, Id},
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateArgs {
    template_id: Id,
    sheet_name: String,
    folder_id: Option<Id>,
    workspace_id: Option<Id>,
    #[serde(default)]
    includes: Vec<String>,
}

fn create_schema(container_key: Option<(&str, &str)>) -> Value {
    let mut properties = json!({
        "templateId": { "type": "integer", "description": "The ID of the template to use" },
        "sheetName": { "type": "string", "description": "Name for the new sheet" },
        "includes": {
            "type": "array",
            "items": { "type": "string", "enum": ["data", "attachments", "discussions", "cellLinks", "forms"] },
            "description": "Elements to include from the template"
        }
    });

    match container_key {
        Some((key, description)) => {
            properties[key] = json!({ "type": "integer", "description": description });
            object_schema(properties, &[key, "templateId", "sheetName"])
        }
        None => {
            properties["folderId"] =
                json!({ "type": "integer", "description": "ID of the folder to create the sheet in" });
            properties["workspaceId"] =
                json!({ "type": "integer", "description": "ID of the workspace to create the sheet in" });
            object_schema(properties, &["templateId", "sheetName"])
        }
    }
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "list_public_templates",
            "Lists all publicly available Smartsheet templates",
            object_schema(json!({}), &[]),
        ),
        tool(
            "list_user_templates",
            "Lists templates created by the user",
            object_schema(json!({}), &[]),
        ),
        tool(
            "create_sheet_from_template",
            "Creates a new sheet from a template, in a folder, a workspace or the user's home",
            create_schema(None),
        ),
        tool(
            "create_sheet_in_folder_from_template",
            "Creates a new sheet in a folder from a template",
            create_schema(Some(("folderId", "The ID of the destination folder"))),
        ),
        tool(
            "create_sheet_in_workspace_from_template",
            "Creates a new sheet in a workspace from a template",
            create_schema(Some(("workspaceId", "The ID of the destination workspace"))),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let templates = client.templates();

    match name {
        "list_public_templates" => render(&templates.public().await?),
        "list_user_templates" => render(&templates.user().await?),
        "create_sheet_from_template"
        | "create_sheet_in_folder_from_template"
        | "create_sheet_in_workspace_from_template" => {
            let args: CreateArgs = parse(args)?;
            let container = Container::from_ids(args.folder_id, args.workspace_id);
            render(
                &templates
                    .create_sheet(args.template_id, &args.sheet_name, container, &args.includes)
                    .await?,
            )
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
