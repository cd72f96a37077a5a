use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{
        shares::{AccessLevel, NewShare, ShareTarget},
        Id,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

// Every share tool names its object as `<verb>_<kind>_...`, and takes the
// object id under the matching key.

#[derive(Deserialize)]
struct ObjectArgs {
    #[serde(alias = "sheetId", alias = "workspaceId", alias = "reportId", alias = "folderId")]
    id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareArgs {
    #[serde(alias = "sheetId", alias = "workspaceId", alias = "reportId", alias = "folderId")]
    id: Id,
    shares: Vec<NewShare>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareIdArgs {
    #[serde(alias = "sheetId", alias = "workspaceId")]
    id: Id,
    share_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    #[serde(alias = "sheetId", alias = "workspaceId")]
    id: Id,
    share_id: String,
    access_level: AccessLevel,
}

fn target(name: &str, id: Id) -> Result<ShareTarget, ToolError> {
    match name.split('_').nth(1) {
        Some("sheet") => Ok(ShareTarget::Sheet(id)),
        Some("workspace") => Ok(ShareTarget::Workspace(id)),
        Some("report") => Ok(ShareTarget::Report(id)),
        Some("folder") => Ok(ShareTarget::Folder(id)),
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

fn access_level() -> Value {
    json!({
        "type": "string",
        "enum": ["VIEWER", "EDITOR", "EDITOR_SHARE", "ADMIN", "OWNER"],
        "description": "Access level to grant"
    })
}

fn shares_schema(id_key: &str, id_description: &str, with_email: bool) -> Value {
    let mut share = json!({
        "email": { "type": "string", "description": "Email of the user to share with" },
        "groupId": { "type": "integer", "description": "ID of the group to share with" },
        "accessLevel": access_level()
    });
    if with_email {
        share["subject"] = json!({ "type": "string", "description": "Email subject line" });
        share["message"] = json!({ "type": "string", "description": "Email message body" });
        share["ccMe"] = json!({ "type": "boolean", "description": "CC the sender on the share email" });
    }

    let mut properties = serde_json::Map::new();
    properties.insert(
        id_key.to_string(),
        json!({ "type": "integer", "description": id_description }),
    );
    properties.insert(
        "shares".to_string(),
        json!({
            "type": "array",
            "description": "Users or groups to share with",
            "items": object_schema(share, &["accessLevel"])
        }),
    );
    object_schema(Value::Object(properties), &[id_key, "shares"])
}

fn id_schema(id_key: &str, description: &str) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        id_key.to_string(),
        json!({ "type": "integer", "description": description }),
    );
    object_schema(Value::Object(properties), &[id_key])
}

fn share_id_schema(id_key: &str, with_access_level: bool) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        id_key.to_string(),
        json!({ "type": "integer", "description": "The ID of the shared object" }),
    );
    properties.insert(
        "shareId".to_string(),
        json!({ "type": "string", "description": "The ID of the share" }),
    );
    if with_access_level {
        properties.insert("accessLevel".to_string(), access_level());
        object_schema(Value::Object(properties), &[id_key, "shareId", "accessLevel"])
    } else {
        object_schema(Value::Object(properties), &[id_key, "shareId"])
    }
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "list_sheet_shares",
            "Lists all shares (users/groups with access) for a sheet",
            id_schema("sheetId", "The ID of the sheet"),
        ),
        tool(
            "get_sheet_share",
            "Gets a single share of a sheet",
            share_id_schema("sheetId", false),
        ),
        tool(
            "share_sheet",
            "Shares a sheet with users or groups and emails them",
            shares_schema("sheetId", "The ID of the sheet to share", true),
        ),
        tool(
            "update_sheet_share",
            "Updates the access level of an existing sheet share",
            share_id_schema("sheetId", true),
        ),
        destructive_tool(
            "delete_sheet_share",
            "Removes sharing access from a sheet",
            share_id_schema("sheetId", false),
        ),
        tool(
            "list_workspace_shares",
            "Lists all shares for a workspace",
            id_schema("workspaceId", "The ID of the workspace"),
        ),
        tool(
            "share_workspace",
            "Shares a workspace with users or groups",
            shares_schema("workspaceId", "The ID of the workspace to share", false),
        ),
        tool(
            "update_workspace_share",
            "Updates the access level of an existing workspace share",
            share_id_schema("workspaceId", true),
        ),
        destructive_tool(
            "delete_workspace_share",
            "Removes sharing access from a workspace",
            share_id_schema("workspaceId", false),
        ),
        tool(
            "list_report_shares",
            "Lists all shares for a report",
            id_schema("reportId", "The ID of the report"),
        ),
        tool(
            "share_report",
            "Shares a report with users or groups",
            shares_schema("reportId", "The ID of the report to share", false),
        ),
        tool(
            "list_folder_shares",
            "Lists all shares for a folder",
            id_schema("folderId", "The ID of the folder"),
        ),
        tool(
            "share_folder",
            "Shares a folder with users or groups",
            shares_schema("folderId", "The ID of the folder to share", false),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let shares = client.shares();

    match name {
        "list_sheet_shares" | "list_workspace_shares" | "list_report_shares" | "list_folder_shares" => {
            let args: ObjectArgs = parse(args)?;
            render(&shares.list(target(name, args.id)?).await?)
        }
        "get_sheet_share" => {
            let args: ShareIdArgs = parse(args)?;
            render(&shares.get(target(name, args.id)?, &args.share_id).await?)
        }
        "share_sheet" | "share_workspace" | "share_report" | "share_folder" => {
            let args: ShareArgs = parse(args)?;
            let send_email = (name == "share_sheet").then_some(true);
            render(
                &shares
                    .share(target(name, args.id)?, &args.shares, send_email)
                    .await?,
            )
        }
        "update_sheet_share" | "update_workspace_share" => {
            let args: UpdateArgs = parse(args)?;
            render(
                &shares
                    .update(target(name, args.id)?, &args.share_id, args.access_level)
                    .await?,
            )
        }
        "delete_sheet_share" | "delete_workspace_share" => {
            let args: ShareIdArgs = parse(args)?;
            shares.delete(target(name, args.id)?, &args.share_id).await?;
            Ok(format!("Successfully removed share {}", args.share_id))
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_follows_tool_name() {
        assert_eq!(target("share_folder", 3).unwrap(), ShareTarget::Folder(3));
        assert_eq!(
            target("delete_workspace_share", 4).unwrap(),
            ShareTarget::Workspace(4)
        );
        assert!(target("share", 1).is_err());
    }

    #[test]
    fn test_object_id_accepts_each_kind() {
        let args: ObjectArgs = parse(json!({ "reportId": 9 })).unwrap();
        assert_eq!(args.id, 9);
    }
}
