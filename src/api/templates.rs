//! Templates and sheet creation from a template.

use crate::{
    api::{ApiResult, Container, Id, Page},
    Client, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub access_level: Option<String>,
    pub global_template: Option<bool>,
    pub blank: Option<bool>,
    /// `sheet` or `report`
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetFromTemplate<'a> {
    name: &'a str,
    from_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    include: Option<&'a [String]>,
}

/// Template endpoints; see [`Client::templates`].
pub struct Templates<'a> {
    client: &'a Client,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Templates published by Smartsheet.
    pub async fn public(&self) -> Result<Page<Template>> {
        self.client.get("/templates/public").await
    }

    /// Templates the caller created.
    pub async fn user(&self) -> Result<Page<Template>> {
        self.client.get("/templates").await
    }

    /// Creates a sheet from a template.
    ///
    /// `include` names template parts to carry over: `data`, `attachments`,
    /// `discussions`, `cellLinks` or `forms`.
    pub async fn create_sheet(
        &self,
        template_id: Id,
        name: &str,
        container: Container,
        include: &[String],
    ) -> Result<ApiResult<Value>> {
        let body = SheetFromTemplate {
            name,
            from_id: template_id,
            include: (!include.is_empty()).then_some(include),
        };
        self.client.post(container.sheets_path(), &body).await
    }
}
