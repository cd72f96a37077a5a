//! Sharing of sheets, workspaces, reports and folders.
//!
//! The four object kinds expose the same share endpoints under their own
//! collection, selected with [`ShareTarget`].

use crate::{
    api::{ApiResult, Id, Page},
    metadata::RequestMetadata,
    Client, Result,
};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Permission granted by a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    Viewer,
    Editor,
    EditorShare,
    Admin,
    Owner,
}

/// The shared object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Sheet(Id),
    Workspace(Id),
    Report(Id),
    Folder(Id),
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareTarget::Sheet(id) => write!(f, "/sheets/{}/shares", id),
            ShareTarget::Workspace(id) => write!(f, "/workspaces/{}/shares", id),
            ShareTarget::Report(id) => write!(f, "/reports/{}/shares", id),
            ShareTarget::Folder(id) => write!(f, "/folders/{}/shares", id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Share ids are opaque strings, unlike object ids
    pub id: Option<String>,
    /// `USER` or `GROUP`
    #[serde(rename = "type")]
    pub share_type: Option<String>,
    pub user_id: Option<Id>,
    pub group_id: Option<Id>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub access_level: Option<AccessLevel>,
    pub scope: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user (by `email`) or group (by `group_id`) to share with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShare {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Id>,
    pub access_level: AccessLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_me: Option<bool>,
}

impl NewShare {
    pub fn user(email: impl Into<String>, access_level: AccessLevel) -> Self {
        Self {
            email: Some(email.into()),
            group_id: None,
            access_level,
            subject: None,
            message: None,
            cc_me: None,
        }
    }

    pub fn group(group_id: Id, access_level: AccessLevel) -> Self {
        Self {
            email: None,
            group_id: Some(group_id),
            ..Self::user("", access_level)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessLevelUpdate {
    access_level: AccessLevel,
}

/// Share endpoints; see [`Client::shares`].
pub struct Shares<'a> {
    client: &'a Client,
}

impl<'a> Shares<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, target: ShareTarget) -> Result<Page<Share>> {
        self.client.get(target.to_string()).await
    }

    pub async fn get(&self, target: ShareTarget, share_id: &str) -> Result<Share> {
        self.client.get(format!("{}/{}", target, share_id)).await
    }

    /// Shares with several recipients at once. `send_email` asks Smartsheet to
    /// notify them, using each share's `subject` and `message`.
    pub async fn share(
        &self,
        target: ShareTarget,
        shares: &[NewShare],
        send_email: Option<bool>,
    ) -> Result<ApiResult<Vec<Share>>> {
        let metadata = RequestMetadata::new(Method::POST, target.to_string())
            .with_optional_query_param("sendEmail", send_email);
        self.client.request(metadata, Some(shares)).await
    }

    pub async fn update(
        &self,
        target: ShareTarget,
        share_id: &str,
        access_level: AccessLevel,
    ) -> Result<ApiResult<Share>> {
        self.client
            .put(
                format!("{}/{}", target, share_id),
                &AccessLevelUpdate { access_level },
            )
            .await
    }

    pub async fn delete(&self, target: ShareTarget, share_id: &str) -> Result<ApiResult<Value>> {
        self.client.delete(format!("{}/{}", target, share_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_paths() {
        assert_eq!(ShareTarget::Sheet(1).to_string(), "/sheets/1/shares");
        assert_eq!(ShareTarget::Folder(7).to_string(), "/folders/7/shares");
    }

    #[test]
    fn test_group_share_omits_email() {
        let share = serde_json::to_value(NewShare::group(5, AccessLevel::EditorShare)).unwrap();
        assert_eq!(
            share,
            serde_json::json!({ "groupId": 5, "accessLevel": "EDITOR_SHARE" })
        );
    }
}
