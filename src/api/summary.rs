//! Sheet summary fields.

use crate::{
    api::{rows::join_ids, ApiResult, Id, Page},
    metadata::RequestMetadata,
    Client, Result,
};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryField {
    pub id: Option<Id>,
    pub index: Option<u32>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub formula: Option<String>,
    pub object_value: Option<Value>,
    pub display_value: Option<String>,
    pub locked: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A summary field to add; `field_type` takes the same values as a column type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSummaryField {
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFieldUpdate {
    pub id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

/// Summary field endpoints; see [`Client::summary`].
pub struct Summary<'a> {
    client: &'a Client,
}

impl<'a> Summary<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn fields(&self, sheet_id: Id) -> Result<Page<SummaryField>> {
        self.client
            .get(format!("/sheets/{}/summary/fields", sheet_id))
            .await
    }

    /// One field, looked up in the sheet's field list. `None` when the sheet has no such field.
    pub async fn field(&self, sheet_id: Id, field_id: Id) -> Result<Option<SummaryField>> {
        let page = self.fields(sheet_id).await?;
        Ok(page
            .data
            .into_iter()
            .find(|field| field.id == Some(field_id)))
    }

    pub async fn add_fields(
        &self,
        sheet_id: Id,
        fields: &[NewSummaryField],
    ) -> Result<ApiResult<Vec<SummaryField>>> {
        self.client
            .post(format!("/sheets/{}/summary/fields", sheet_id), fields)
            .await
    }

    pub async fn update_fields(
        &self,
        sheet_id: Id,
        fields: &[SummaryFieldUpdate],
    ) -> Result<ApiResult<Vec<SummaryField>>> {
        self.client
            .put(format!("/sheets/{}/summary/fields", sheet_id), fields)
            .await
    }

    pub async fn delete_fields(&self, sheet_id: Id, field_ids: &[Id]) -> Result<ApiResult<Vec<Id>>> {
        let metadata = RequestMetadata::new(
            Method::DELETE,
            format!("/sheets/{}/summary/fields", sheet_id),
        )
        .with_query_param("ids", join_ids(field_ids));
        self.client.fetch(metadata).await
    }
}
