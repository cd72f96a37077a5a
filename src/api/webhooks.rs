//! Webhooks.

use crate::{
    api::{ApiResult, Id, Page},
    metadata::RequestMetadata,
    Client, Result,
};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub callback_url: Option<String>,
    pub scope: Option<String>,
    pub scope_object_id: Option<Id>,
    pub events: Option<Vec<String>>,
    pub version: Option<u32>,
    pub status: Option<String>,
    pub enabled: Option<bool>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A webhook to create. `version` defaults to `1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWebhook {
    pub name: String,
    pub callback_url: String,
    /// Only `sheet` is accepted by the platform today
    pub scope: String,
    pub scope_object_id: Id,
    /// e.g. `["*.*"]` for all events
    pub events: Vec<String>,
    pub version: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedSecret {
    pub shared_secret: String,
}

/// Webhook endpoints; see [`Client::webhooks`].
pub struct Webhooks<'a> {
    client: &'a Client,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Webhooks owned by the current user.
    pub async fn list(&self) -> Result<Page<Webhook>> {
        self.client.get("/webhooks").await
    }

    pub async fn get(&self, webhook_id: Id) -> Result<Webhook> {
        self.client.get(format!("/webhooks/{}", webhook_id)).await
    }

    /// Creates a webhook. New webhooks start disabled until enabled with [`update`](Self::update).
    pub async fn create(&self, webhook: &NewWebhook) -> Result<ApiResult<Webhook>> {
        let body = NewWebhook {
            version: Some(webhook.version.unwrap_or(1)),
            ..webhook.clone()
        };
        self.client.post("/webhooks", &body).await
    }

    pub async fn update(&self, webhook_id: Id, update: &WebhookUpdate) -> Result<ApiResult<Webhook>> {
        self.client
            .put(format!("/webhooks/{}", webhook_id), update)
            .await
    }

    pub async fn delete(&self, webhook_id: Id) -> Result<ApiResult<Value>> {
        self.client.delete(format!("/webhooks/{}", webhook_id)).await
    }

    pub async fn reset_shared_secret(&self, webhook_id: Id) -> Result<ApiResult<SharedSecret>> {
        let metadata = RequestMetadata::new(
            Method::POST,
            format!("/webhooks/{}/resetsharedsecret", webhook_id),
        );
        self.client.fetch(metadata).await
    }
}
