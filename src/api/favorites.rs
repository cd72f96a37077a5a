//! Favorites.

use crate::{
    api::{rows::join_ids, ApiResult, Id, Page},
    metadata::RequestMetadata,
    Client, Result,
};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kinds of objects that can be favorited. Dashboards are called `sight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteType {
    Sheet,
    Folder,
    Report,
    Template,
    Workspace,
    Sight,
}

impl FavoriteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteType::Sheet => "sheet",
            FavoriteType::Folder => "folder",
            FavoriteType::Report => "report",
            FavoriteType::Template => "template",
            FavoriteType::Workspace => "workspace",
            FavoriteType::Sight => "sight",
        }
    }
}

impl fmt::Display for FavoriteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(rename = "type")]
    pub favorite_type: FavoriteType,
    pub object_id: Id,
}

/// Favorites endpoints; see [`Client::favorites`].
pub struct Favorites<'a> {
    client: &'a Client,
}

impl<'a> Favorites<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Page<Favorite>> {
        self.client.get("/favorites").await
    }

    pub async fn add(&self, favorites: &[Favorite]) -> Result<ApiResult<Vec<Favorite>>> {
        self.client.post("/favorites", favorites).await
    }

    pub async fn add_one(
        &self,
        favorite_type: FavoriteType,
        object_id: Id,
    ) -> Result<ApiResult<Vec<Favorite>>> {
        self.add(&[Favorite {
            favorite_type,
            object_id,
        }])
        .await
    }

    /// Removes several favorites of one type.
    pub async fn remove(&self, favorite_type: FavoriteType, object_ids: &[Id]) -> Result<ApiResult<Value>> {
        let metadata = RequestMetadata::new(Method::DELETE, format!("/favorites/{}", favorite_type))
            .with_query_param("objectIds", join_ids(object_ids));
        self.client.fetch(metadata).await
    }
}
