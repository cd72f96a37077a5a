//! Users.

use crate::{api::Page, metadata::RequestMetadata, Client, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Smartsheet user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<u64>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub admin: Option<bool>,
    pub licensed_sheet_creator: Option<bool>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User endpoints, borrowed from a [`Client`].
pub struct Users<'a> {
    client: &'a Client,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// The user owning the access token.
    pub async fn current_user(&self) -> Result<User> {
        self.client.get("/users/me").await
    }

    /// All users of the organization (requires admin rights).
    pub async fn list(&self, email: Option<&str>) -> Result<Page<User>> {
        let metadata =
            RequestMetadata::new(Method::GET, "/users").with_optional_query_param("email", email);
        self.client.fetch(metadata).await
    }
}
