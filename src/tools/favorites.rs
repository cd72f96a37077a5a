use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{
        favorites::{Favorite, FavoriteType},
        Id,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddArgs {
    favorites: Vec<Favorite>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectArgs {
    object_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveArgs {
    #[serde(rename = "type")]
    favorite_type: FavoriteType,
    object_ids: Vec<Id>,
}

/// Shortcut tools adding a single object of a fixed type.
const SHORTCUTS: [(&str, FavoriteType, &str); 5] = [
    ("add_sheet_to_favorites", FavoriteType::Sheet, "Adds a sheet to favorites"),
    ("add_folder_to_favorites", FavoriteType::Folder, "Adds a folder to favorites"),
    ("add_workspace_to_favorites", FavoriteType::Workspace, "Adds a workspace to favorites"),
    ("add_report_to_favorites", FavoriteType::Report, "Adds a report to favorites"),
    ("add_dashboard_to_favorites", FavoriteType::Sight, "Adds a dashboard to favorites"),
];

fn type_schema() -> Value {
    json!({
        "type": "string",
        "enum": ["sheet", "folder", "report", "template", "workspace", "sight"],
        "description": "Type of the object ('sight' is a dashboard)"
    })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let mut definitions = vec![
        tool(
            "list_favorites",
            "Lists all favorite items of the current user",
            object_schema(json!({}), &[]),
        ),
        tool(
            "add_favorites",
            "Adds items to the current user's favorites",
            object_schema(
                json!({
                    "favorites": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "type": type_schema(),
                                "objectId": { "type": "integer", "description": "ID of the object" }
                            },
                            "required": ["type", "objectId"]
                        },
                        "description": "Items to add to favorites"
                    }
                }),
                &["favorites"],
            ),
        ),
    ];

    definitions.extend(SHORTCUTS.iter().map(|&(name, favorite_type, description)| {
        tool(
            name,
            description,
            object_schema(
                json!({
                    "objectId": {
                        "type": "integer",
                        "description": format!("ID of the {} to add", favorite_type)
                    }
                }),
                &["objectId"],
            ),
        )
    }));

    definitions.push(destructive_tool(
        "remove_favorites",
        "Removes items of one type from the current user's favorites",
        object_schema(
            json!({
                "type": type_schema(),
                "objectIds": {
                    "type": "array",
                    "items": { "type": "integer" },
                    "description": "IDs of the objects to remove"
                }
            }),
            &["type", "objectIds"],
        ),
    ));
    definitions.push(destructive_tool(
        "remove_sheet_from_favorites",
        "Removes a sheet from the current user's favorites",
        object_schema(
            json!({ "objectId": { "type": "integer", "description": "ID of the sheet to remove" } }),
            &["objectId"],
        ),
    ));

    definitions
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let favorites = client.favorites();

    if let Some(&(_, favorite_type, _)) = SHORTCUTS.iter().find(|(tool, _, _)| *tool == name) {
        let args: ObjectArgs = parse(args)?;
        return render(&favorites.add_one(favorite_type, args.object_id).await?);
    }

    match name {
        "list_favorites" => render(&favorites.list().await?),
        "add_favorites" => {
            let args: AddArgs = parse(args)?;
            render(&favorites.add(&args.favorites).await?)
        }
        "remove_favorites" => {
            let args: RemoveArgs = parse(args)?;
            favorites
                .remove(args.favorite_type, &args.object_ids)
                .await?;
            Ok(format!(
                "Successfully removed {} {} item(s) from favorites",
                args.object_ids.len(),
                args.favorite_type
            ))
        }
        "remove_sheet_from_favorites" => {
            let args: ObjectArgs = parse(args)?;
            favorites
                .remove(FavoriteType::Sheet, &[args.object_id])
                .await?;
            Ok(format!(
                "Successfully removed sheet {} from favorites",
                args.object_id
            ))
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
