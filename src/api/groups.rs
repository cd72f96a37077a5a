//! Groups.

use crate::{
    api::{ApiResult, Id, Page},
    Client, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub owner_id: Option<Id>,
    pub members: Option<Vec<GroupMember>>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GroupMember {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Transfers ownership; the new owner must be a group admin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Id>,
}

/// Group and group member endpoints; see [`Client::groups`].
pub struct Groups<'a> {
    client: &'a Client,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Groups of the organization.
    pub async fn list(&self) -> Result<Page<Group>> {
        self.client.get("/groups").await
    }

    /// A group including its members.
    pub async fn get(&self, group_id: Id) -> Result<Group> {
        self.client.get(format!("/groups/{}", group_id)).await
    }

    pub async fn create(&self, group: &NewGroup) -> Result<ApiResult<Group>> {
        self.client.post("/groups", group).await
    }

    pub async fn update(&self, group_id: Id, update: &GroupUpdate) -> Result<ApiResult<Group>> {
        self.client
            .put(format!("/groups/{}", group_id), update)
            .await
    }

    pub async fn delete(&self, group_id: Id) -> Result<ApiResult<Value>> {
        self.client.delete(format!("/groups/{}", group_id)).await
    }

    pub async fn add_members(
        &self,
        group_id: Id,
        members: &[GroupMember],
    ) -> Result<ApiResult<Vec<GroupMember>>> {
        self.client
            .post(format!("/groups/{}/members", group_id), members)
            .await
    }

    pub async fn remove_member(&self, group_id: Id, user_id: Id) -> Result<ApiResult<Value>> {
        self.client
            .delete(format!("/groups/{}/members/{}", group_id, user_id))
            .await
    }

    /// Members of a group; empty when the group has none.
    pub async fn members(&self, group_id: Id) -> Result<Vec<GroupMember>> {
        Ok(self.get(group_id).await?.members.unwrap_or_default())
    }
}
