//! Folders.

use crate::{
    api::{ApiResult, Id},
    Client, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub permalink: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Folder endpoints, borrowed from a [`Client`].
pub struct Folders<'a> {
    client: &'a Client,
}

impl<'a> Folders<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// A folder with its contents.
    pub async fn get(&self, folder_id: Id) -> Result<Folder> {
        self.client.get(format!("/folders/{}", folder_id)).await
    }

    /// Creates a folder inside `parent_folder_id`.
    pub async fn create_subfolder(&self, parent_folder_id: Id, name: &str) -> Result<ApiResult<Folder>> {
        self.client
            .post(
                format!("/folders/{}/folders", parent_folder_id),
                &json!({ "name": name }),
            )
            .await
    }
}
