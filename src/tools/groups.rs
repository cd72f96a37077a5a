use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{
        groups::{GroupMember, GroupUpdate, NewGroup},
        Id,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupArgs {
    group_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    group_id: Id,
    #[serde(flatten)]
    update: GroupUpdate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembersArgs {
    group_id: Id,
    members: Vec<GroupMember>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveMemberArgs {
    group_id: Id,
    user_id: Id,
}

fn members_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "email": { "type": "string", "description": "Email of the member to add" }
            },
            "required": ["email"]
        },
        "description": "Members to add to the group"
    })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let group_id = || json!({ "groupId": { "type": "integer", "description": "The ID of the group" } });

    vec![
        tool(
            "list_groups",
            "Lists all groups in the organization",
            object_schema(json!({}), &[]),
        ),
        tool(
            "get_group",
            "Gets details of a specific group including its members",
            object_schema(group_id(), &["groupId"]),
        ),
        tool(
            "create_group",
            "Creates a new group",
            object_schema(
                json!({
                    "name": { "type": "string", "description": "Name for the group" },
                    "description": { "type": "string", "description": "Description for the group" },
                    "members": members_schema()
                }),
                &["name"],
            ),
        ),
        tool(
            "update_group",
            "Updates a group's name, description or owner",
            object_schema(
                json!({
                    "groupId": { "type": "integer", "description": "The ID of the group to update" },
                    "name": { "type": "string", "description": "New name for the group" },
                    "description": { "type": "string", "description": "New description for the group" },
                    "ownerId": { "type": "integer", "description": "ID of the new owner" }
                }),
                &["groupId"],
            ),
        ),
        destructive_tool(
            "delete_group",
            "Deletes a group",
            object_schema(group_id(), &["groupId"]),
        ),
        tool(
            "add_group_members",
            "Adds members to a group",
            object_schema(
                json!({
                    "groupId": { "type": "integer", "description": "The ID of the group" },
                    "members": members_schema()
                }),
                &["groupId", "members"],
            ),
        ),
        destructive_tool(
            "remove_group_member",
            "Removes a member from a group",
            object_schema(
                json!({
                    "groupId": { "type": "integer", "description": "The ID of the group" },
                    "userId": { "type": "integer", "description": "The ID of the user to remove" }
                }),
                &["groupId", "userId"],
            ),
        ),
        tool(
            "get_group_members",
            "Lists the members of a group",
            object_schema(group_id(), &["groupId"]),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let groups = client.groups();

    match name {
        "list_groups" => render(&groups.list().await?),
        "get_group" => {
            let args: GroupArgs = parse(args)?;
            render(&groups.get(args.group_id).await?)
        }
        "create_group" => {
            let group: NewGroup = parse(args)?;
            render(&groups.create(&group).await?)
        }
        "update_group" => {
            let args: UpdateArgs = parse(args)?;
            render(&groups.update(args.group_id, &args.update).await?)
        }
        "delete_group" => {
            let args: GroupArgs = parse(args)?;
            groups.delete(args.group_id).await?;
            Ok(format!("Successfully deleted group {}", args.group_id))
        }
        "add_group_members" => {
            let args: MembersArgs = parse(args)?;
            render(&groups.add_members(args.group_id, &args.members).await?)
        }
        "remove_group_member" => {
            let args: RemoveMemberArgs = parse(args)?;
            groups.remove_member(args.group_id, args.user_id).await?;
            Ok(format!(
                "Successfully removed user {} from group {}",
                args.user_id, args.group_id
            ))
        }
        "get_group_members" => {
            let args: GroupArgs = parse(args)?;
            render(&groups.members(args.group_id).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
