//! Sheets, rows, cell history and discussions.

use crate::{
    api::{rows::join_ids, ApiResult, Container, Id, Page},
    metadata::RequestMetadata,
    Client, Result,
};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current version number of a sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetVersion {
    pub version: i64,
}

/// Where a sheet lives and who owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLocation {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub permalink: Option<String>,
    pub access_level: Option<String>,
    pub owner: Option<String>,
    pub owner_id: Option<Id>,
    /// Containing workspace, absent for sheets in "Sheets" / home folders
    pub workspace: Option<WorkspaceRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub id: Option<Id>,
    pub name: Option<String>,
}

/// Destination of a sheet copy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyDestination<'a> {
    destination_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_id: Option<Id>,
    new_name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveDestination {
    destination_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_id: Option<Id>,
}

/// Narrows a full sheet fetch. Empty lists and `None`s are left out of the query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetQuery {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub row_ids: Vec<Id>,
    #[serde(default)]
    pub column_ids: Vec<Id>,
    pub filter_id: Option<Id>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl SheetQuery {
    fn apply(&self, metadata: RequestMetadata) -> RequestMetadata {
        let joined = |items: &[String]| (!items.is_empty()).then(|| items.join(","));
        let ids = |ids: &[Id]| (!ids.is_empty()).then(|| join_ids(ids));

        metadata
            .with_optional_query_param("include", joined(&self.include))
            .with_optional_query_param("exclude", joined(&self.exclude))
            .with_optional_query_param("rowIds", ids(&self.row_ids))
            .with_optional_query_param("columnIds", ids(&self.column_ids))
            .with_optional_query_param("filterId", self.filter_id)
            .with_optional_query_param("pageSize", self.page_size)
            .with_optional_query_param("page", self.page)
    }
}

/// A sheet copy result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopiedSheet {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub permalink: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sheet endpoints; see [`Client::sheets`].
pub struct Sheets<'a> {
    client: &'a Client,
}

impl<'a> Sheets<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// The full sheet; `include` is a comma separated list such as `attachments,discussions`.
    pub async fn get(&self, sheet_id: Id, include: Option<&str>) -> Result<Value> {
        let metadata = RequestMetadata::new(Method::GET, format!("/sheets/{}", sheet_id))
            .with_optional_query_param("include", include);
        self.client.fetch(metadata).await
    }

    /// The full sheet narrowed by `query`.
    pub async fn get_filtered(&self, sheet_id: Id, query: &SheetQuery) -> Result<Value> {
        let metadata = query.apply(RequestMetadata::new(Method::GET, format!("/sheets/{}", sheet_id)));
        self.client.fetch(metadata).await
    }

    /// The sheet rendered as CSV text.
    pub async fn export_csv(&self, sheet_id: Id) -> Result<String> {
        let metadata = RequestMetadata::new(Method::GET, format!("/sheets/{}", sheet_id))
            .with_header("Accept", "text/csv")?;
        Ok(self.client.call_text(metadata).await?.into_data())
    }

    pub async fn version(&self, sheet_id: Id) -> Result<SheetVersion> {
        self.client.get(format!("/sheets/{}/version", sheet_id)).await
    }

    /// Owner and containing workspace of a sheet, fetched with a single row page.
    pub async fn location(&self, sheet_id: Id) -> Result<SheetLocation> {
        let metadata = RequestMetadata::new(Method::GET, format!("/sheets/{}", sheet_id))
            .with_query_param("include", "ownerInfo")
            .with_query_param("pageSize", 1);
        self.client.fetch(metadata).await
    }

    /// Copies a sheet into a folder, or into the caller's home when `folder_id` is `None`.
    pub async fn copy(
        &self,
        sheet_id: Id,
        new_name: &str,
        folder_id: Option<Id>,
    ) -> Result<ApiResult<CopiedSheet>> {
        let destination = CopyDestination {
            destination_type: if folder_id.is_some() { "folder" } else { "home" },
            destination_id: folder_id,
            new_name,
        };
        let metadata = RequestMetadata::new(Method::POST, format!("/sheets/{}/copy", sheet_id))
            .with_query_param("include", "all");
        self.client.request(metadata, Some(&destination)).await
    }

    /// Moves a sheet to another folder, workspace or the caller's home.
    pub async fn move_to(&self, sheet_id: Id, container: Container) -> Result<ApiResult<CopiedSheet>> {
        let destination = MoveDestination {
            destination_type: container.destination_type(),
            destination_id: container.id(),
        };
        self.client
            .post(format!("/sheets/{}/move", sheet_id), &destination)
            .await
    }

    pub async fn row(&self, sheet_id: Id, row_id: Id) -> Result<Value> {
        self.client
            .get(format!("/sheets/{}/rows/{}", sheet_id, row_id))
            .await
    }

    pub async fn cell_history(&self, sheet_id: Id, row_id: Id, column_id: Id) -> Result<Page<Value>> {
        self.client
            .get(format!(
                "/sheets/{}/rows/{}/columns/{}/history",
                sheet_id, row_id, column_id
            ))
            .await
    }

    pub async fn discussions(&self, sheet_id: Id) -> Result<Page<Value>> {
        let metadata = RequestMetadata::new(Method::GET, format!("/sheets/{}/discussions", sheet_id))
            .with_query_param("include", "comments");
        self.client.fetch(metadata).await
    }
}
