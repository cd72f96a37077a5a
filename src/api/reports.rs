//! Reports.

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
pub struct Report {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub access_level: Option<String>,
    pub permalink: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Publish settings of a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPublish {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_full_enabled: Option<bool>,
    /// `ALL` or `ORG`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_full_accessible_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_full_url: Option<String>,
}

/// An email delivery of a report.
///
/// `format` is `PDF`, `EXCEL` or `PDF_GANTT`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmail {
    pub send_to: Vec<Recipient>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
}

/// Report endpoints; see [`Client::reports`].
pub struct Reports<'a> {
    client: &'a Client,
}

impl<'a> Reports<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        page_size: Option<u32>,
        page: Option<u32>,
        include_all: Option<bool>,
    ) -> Result<Page<Report>> {
        let metadata = RequestMetadata::new(Method::GET, "/reports")
            .with_optional_query_param("pageSize", page_size)
            .with_optional_query_param("page", page)
            .with_optional_query_param("includeAll", include_all);
        self.client.fetch(metadata).await
    }

    /// A report with its rows; `include` is a comma separated list of extra elements.
    pub async fn get(
        &self,
        report_id: Id,
        page_size: Option<u32>,
        page: Option<u32>,
        include: Option<&str>,
    ) -> Result<Value> {
        let metadata = RequestMetadata::new(Method::GET, format!("/reports/{}", report_id))
            .with_optional_query_param("pageSize", page_size)
            .with_optional_query_param("page", page)
            .with_optional_query_param("include", include);
        self.client.fetch(metadata).await
    }

    pub async fn send(&self, report_id: Id, email: &ReportEmail) -> Result<ApiResult<Value>> {
        self.client
            .post(format!("/reports/{}/emails", report_id), email)
            .await
    }

    pub async fn publish_status(&self, report_id: Id) -> Result<ReportPublish> {
        self.client
            .get(format!("/reports/{}/publish", report_id))
            .await
    }

    pub async fn set_publish_status(
        &self,
        report_id: Id,
        publish: &ReportPublish,
    ) -> Result<ApiResult<ReportPublish>> {
        self.client
            .put(format!("/reports/{}/publish", report_id), publish)
            .await
    }
}
