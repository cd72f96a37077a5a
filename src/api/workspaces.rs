//! Workspaces.

use crate::{
    api::{ApiResult, Id, Page},
    Client, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub access_level: Option<String>,
    pub permalink: Option<String>,
    /// Contents (sheets, folders, reports...) when fetched individually
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Workspace endpoints, borrowed from a [`Client`].
pub struct Workspaces<'a> {
    client: &'a Client,
}

impl<'a> Workspaces<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Page<Workspace>> {
        self.client.get("/workspaces").await
    }

    pub async fn get(&self, workspace_id: Id) -> Result<Workspace> {
        self.client.get(format!("/workspaces/{}", workspace_id)).await
    }

    pub async fn create(&self, name: &str) -> Result<ApiResult<Workspace>> {
        self.client.post("/workspaces", &json!({ "name": name })).await
    }
}
