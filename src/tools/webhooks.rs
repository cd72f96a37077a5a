use super::{destructive_tool, object_schema, parse, render, tool, ToolDefinition, ToolError, ToolResult};
use crate::{
    api::{
        webhooks::{NewWebhook, WebhookUpdate},
        Id,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookArgs {
    webhook_id: Id,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    webhook_id: Id,
    #[serde(flatten)]
    update: WebhookUpdate,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let webhook_id = || json!({ "webhookId": { "type": "integer", "description": "The ID of the webhook" } });

    vec![
        tool(
            "list_webhooks",
            "Lists all webhooks for the authenticated user",
            object_schema(json!({}), &[]),
        ),
        tool(
            "get_webhook",
            "Gets details of a specific webhook",
            object_schema(webhook_id(), &["webhookId"]),
        ),
        tool(
            "create_webhook",
            "Creates a new webhook to receive notifications when a sheet changes",
            object_schema(
                json!({
                    "name": { "type": "string", "description": "Name for the webhook" },
                    "callbackUrl": { "type": "string", "description": "URL to receive webhook callbacks" },
                    "scope": { "type": "string", "enum": ["sheet"], "description": "Scope of the webhook (currently only 'sheet' is supported)" },
                    "scopeObjectId": { "type": "integer", "description": "ID of the object to monitor (e.g., sheet ID)" },
                    "events": { "type": "array", "items": { "type": "string" }, "description": "Events to trigger the webhook (e.g., ['*.*'] for all events)" },
                    "version": { "type": "integer", "description": "API version for webhook callbacks (default: 1)" }
                }),
                &["name", "callbackUrl", "scope", "scopeObjectId", "events"],
            ),
        ),
        tool(
            "update_webhook",
            "Updates an existing webhook (enable/disable or change callback URL)",
            object_schema(
                json!({
                    "webhookId": { "type": "integer", "description": "The ID of the webhook to update" },
                    "enabled": { "type": "boolean", "description": "Whether the webhook is enabled" },
                    "callbackUrl": { "type": "string", "description": "New callback URL for the webhook" }
                }),
                &["webhookId"],
            ),
        ),
        destructive_tool(
            "delete_webhook",
            "Deletes a webhook",
            object_schema(webhook_id(), &["webhookId"]),
        ),
        tool(
            "reset_webhook_secret",
            "Resets the shared secret for a webhook",
            object_schema(webhook_id(), &["webhookId"]),
        ),
    ]
}

pub(super) async fn call(client: &Client, name: &str, args: Value) -> ToolResult {
    let webhooks = client.webhooks();

    match name {
        "list_webhooks" => render(&webhooks.list().await?),
        "get_webhook" => {
            let args: WebhookArgs = parse(args)?;
            render(&webhooks.get(args.webhook_id).await?)
        }
        "create_webhook" => {
            let webhook: NewWebhook = parse(args)?;
            render(&webhooks.create(&webhook).await?)
        }
        "update_webhook" => {
            let args: UpdateArgs = parse(args)?;
            render(&webhooks.update(args.webhook_id, &args.update).await?)
        }
        "delete_webhook" => {
            let args: WebhookArgs = parse(args)?;
            webhooks.delete(args.webhook_id).await?;
            Ok(format!("Successfully deleted webhook {}", args.webhook_id))
        }
        "reset_webhook_secret" => {
            let args: WebhookArgs = parse(args)?;
            render(&webhooks.reset_shared_secret(args.webhook_id).await?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
