//! Columns.

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
pub struct Column {
    pub id: Option<Id>,
    pub index: Option<u32>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    pub primary: Option<bool>,
    pub options: Option<Vec<String>>,
    pub symbol: Option<String>,
    pub width: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A column to add.
///
/// `column_type` is one of `TEXT_NUMBER`, `DATE`, `DATETIME`, `CONTACT_LIST`,
/// `CHECKBOX`, `PICKLIST`, `DURATION`, `PREDECESSOR` or `ABSTRACT_DATETIME`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColumn {
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Changes to an existing column; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Column endpoints; see [`Client::columns`].
pub struct Columns<'a> {
    client: &'a Client,
}

impl<'a> Columns<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, sheet_id: Id, include: Option<&str>) -> Result<Page<Column>> {
        let metadata = RequestMetadata::new(Method::GET, format!("/sheets/{}/columns", sheet_id))
            .with_optional_query_param("include", include);
        self.client.fetch(metadata).await
    }

    pub async fn get(&self, sheet_id: Id, column_id: Id, include: Option<&str>) -> Result<Column> {
        let metadata = RequestMetadata::new(
            Method::GET,
            format!("/sheets/{}/columns/{}", sheet_id, column_id),
        )
        .with_optional_query_param("include", include);
        self.client.fetch(metadata).await
    }

    pub async fn add(&self, sheet_id: Id, column: &NewColumn) -> Result<ApiResult<Column>> {
        self.client
            .post(format!("/sheets/{}/columns", sheet_id), column)
            .await
    }

    pub async fn add_many(&self, sheet_id: Id, columns: &[NewColumn]) -> Result<ApiResult<Vec<Column>>> {
        self.client
            .post(format!("/sheets/{}/columns", sheet_id), columns)
            .await
    }

    pub async fn update(
        &self,
        sheet_id: Id,
        column_id: Id,
        update: &ColumnUpdate,
    ) -> Result<ApiResult<Column>> {
        self.client
            .put(format!("/sheets/{}/columns/{}", sheet_id, column_id), update)
            .await
    }

    pub async fn delete(&self, sheet_id: Id, column_id: Id) -> Result<ApiResult<Value>> {
        self.client
            .delete(format!("/sheets/{}/columns/{}", sheet_id, column_id))
            .await
    }
}
