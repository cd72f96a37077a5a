//! Attachments.
//!
//! Only URL attachments can be created; file uploads are not supported.

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
pub struct Attachment {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub attachment_type: Option<String>,
    pub mime_type: Option<String>,
    #[serde(rename = "sizeInKb")]
    pub size_in_kb: Option<u64>,
    pub url: Option<String>,
    pub parent_type: Option<String>,
    pub parent_id: Option<Id>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A link to attach.
///
/// `attachment_type` is one of `LINK`, `BOX_COM`, `DROPBOX`, `EGNYTE`,
/// `EVERNOTE`, `GOOGLE_DRIVE` or `ONEDRIVE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAttachment {
    pub name: String,
    pub url: String,
    pub attachment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UrlAttachment {
    /// A plain web link.
    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            attachment_type: "LINK".to_string(),
            attachment_sub_type: None,
            description: None,
        }
    }
}

/// Attachment endpoints; see [`Client::attachments`].
pub struct Attachments<'a> {
    client: &'a Client,
}

impl<'a> Attachments<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_for_sheet(
        &self,
        sheet_id: Id,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Page<Attachment>> {
        let metadata = RequestMetadata::new(Method::GET, format!("/sheets/{}/attachments", sheet_id))
            .with_optional_query_param("page", page)
            .with_optional_query_param("pageSize", page_size);
        self.client.fetch(metadata).await
    }

    pub async fn list_for_row(
        &self,
        sheet_id: Id,
        row_id: Id,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Page<Attachment>> {
        let metadata = RequestMetadata::new(
            Method::GET,
            format!("/sheets/{}/rows/{}/attachments", sheet_id, row_id),
        )
        .with_optional_query_param("page", page)
        .with_optional_query_param("pageSize", page_size);
        self.client.fetch(metadata).await
    }

    /// Attachment metadata including a temporary download `url`.
    pub async fn get(&self, sheet_id: Id, attachment_id: Id) -> Result<Attachment> {
        self.client
            .get(format!("/sheets/{}/attachments/{}", sheet_id, attachment_id))
            .await
    }

    pub async fn attach_url_to_sheet(
        &self,
        sheet_id: Id,
        attachment: &UrlAttachment,
    ) -> Result<ApiResult<Attachment>> {
        self.client
            .post(format!("/sheets/{}/attachments", sheet_id), attachment)
            .await
    }

    pub async fn attach_url_to_row(
        &self,
        sheet_id: Id,
        row_id: Id,
        attachment: &UrlAttachment,
    ) -> Result<ApiResult<Attachment>> {
        self.client
            .post(
                format!("/sheets/{}/rows/{}/attachments", sheet_id, row_id),
                attachment,
            )
            .await
    }

    pub async fn delete(&self, sheet_id: Id, attachment_id: Id) -> Result<ApiResult<Value>> {
        self.client
            .delete(format!("/sheets/{}/attachments/{}", sheet_id, attachment_id))
            .await
    }
}
