//! Search.

use crate::{api::Id, metadata::RequestMetadata, Client, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub text: Option<String>,
    pub object_type: Option<String>,
    pub object_id: Option<Id>,
    pub parent_object_type: Option<String>,
    pub parent_object_id: Option<Id>,
    pub parent_object_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search endpoints; see [`Client::search`].
pub struct Search<'a> {
    client: &'a Client,
}

impl<'a> Search<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Searches everything the user can access.
    pub async fn everything(&self, query: &str) -> Result<SearchResults> {
        self.scoped(query, None).await
    }

    /// Searches inside a single sheet.
    pub async fn sheet(&self, sheet_id: Id, query: &str) -> Result<SearchResults> {
        let metadata = RequestMetadata::new(Method::GET, format!("/search/sheets/{}", sheet_id))
            .with_query_param("query", query);
        self.client.fetch(metadata).await
    }

    /// Searches folder names only.
    pub async fn folders(&self, query: &str) -> Result<SearchResults> {
        self.scoped(query, Some("folderNames")).await
    }

    /// Searches workspace names only.
    pub async fn workspaces(&self, query: &str) -> Result<SearchResults> {
        self.scoped(query, Some("workspaceNames")).await
    }

    async fn scoped(&self, query: &str, scope: Option<&str>) -> Result<SearchResults> {
        let metadata = RequestMetadata::new(Method::GET, "/search")
            .with_query_param("query", query)
            .with_optional_query_param("scopes", scope);
        self.client.fetch(metadata).await
    }
}
