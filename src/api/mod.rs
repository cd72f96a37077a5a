//! Typed wrappers over the Smartsheet resources.
//!
//! Each wrapper borrows the shared [`Client`] and only builds the request
//! (method, path, body, query); retries and error normalization happen in
//! [`Client::call`].

pub mod attachments;
pub mod columns;
pub mod cross_sheet;
pub mod events;
pub mod favorites;
pub mod folders;
pub mod groups;
pub mod reports;
pub mod rows;
pub mod search;
pub mod shares;
pub mod sheets;
pub mod summary;
pub mod templates;
pub mod users;
pub mod webhooks;
pub mod workspaces;

use crate::Client;
use serde::{Deserialize, Serialize};

/// Smartsheet object identifier.
pub type Id = u64;

/// A paginated list envelope (`GET` collection endpoints).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 1-based page number
    pub page_number: Option<u32>,
    /// Number of items per page
    pub page_size: Option<u32>,
    /// Total number of pages
    pub total_pages: Option<u32>,
    /// Total number of items across all pages
    pub total_count: Option<u64>,
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// The result envelope returned by create, update and delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    /// `"SUCCESS"` or `"PARTIAL_SUCCESS"`
    pub message: Option<String>,
    /// `0` on success, `3` on partial success
    pub result_code: Option<i64>,
    /// The created or updated object, absent for deletes
    pub result: Option<T>,
    /// New version of the containing sheet, when it changed
    pub version: Option<i64>,
}

/// Where a sheet is created or moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The caller's "Sheets" home
    Home,
    Folder(Id),
    Workspace(Id),
}

impl Container {
    /// Picks the folder over the workspace, and home when neither is given.
    pub fn from_ids(folder_id: Option<Id>, workspace_id: Option<Id>) -> Self {
        match (folder_id, workspace_id) {
            (Some(folder_id), _) => Self::Folder(folder_id),
            (None, Some(workspace_id)) => Self::Workspace(workspace_id),
            (None, None) => Self::Home,
        }
    }

    /// The `destinationType` value of move and copy bodies.
    pub fn destination_type(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Folder(_) => "folder",
            Self::Workspace(_) => "workspace",
        }
    }

    pub fn id(&self) -> Option<Id> {
        match self {
            Self::Home => None,
            Self::Folder(id) | Self::Workspace(id) => Some(*id),
        }
    }

    /// Collection path that creates a sheet inside this container.
    pub(crate) fn sheets_path(&self) -> String {
        match self {
            Self::Home => "/sheets".to_string(),
            Self::Folder(id) => format!("/folders/{}/sheets", id),
            Self::Workspace(id) => format!("/workspaces/{}/sheets", id),
        }
    }
}

impl Client {
    /// User endpoints.
    pub fn users(&self) -> users::Users<'_> {
        users::Users::new(self)
    }

    /// Workspace endpoints.
    pub fn workspaces(&self) -> workspaces::Workspaces<'_> {
        workspaces::Workspaces::new(self)
    }

    /// Folder endpoints.
    pub fn folders(&self) -> folders::Folders<'_> {
        folders::Folders::new(self)
    }

    /// Sheet, row, cell history and discussion endpoints.
    pub fn sheets(&self) -> sheets::Sheets<'_> {
        sheets::Sheets::new(self)
    }

    /// Search endpoints.
    pub fn search(&self) -> search::Search<'_> {
        search::Search::new(self)
    }

    /// Column endpoints.
    pub fn columns(&self) -> columns::Columns<'_> {
        columns::Columns::new(self)
    }

    /// Report endpoints.
    pub fn reports(&self) -> reports::Reports<'_> {
        reports::Reports::new(self)
    }

    /// Attachment endpoints.
    pub fn attachments(&self) -> attachments::Attachments<'_> {
        attachments::Attachments::new(self)
    }

    /// Webhook endpoints.
    pub fn webhooks(&self) -> webhooks::Webhooks<'_> {
        webhooks::Webhooks::new(self)
    }

    /// Group endpoints.
    pub fn groups(&self) -> groups::Groups<'_> {
        groups::Groups::new(self)
    }

    /// Favorites endpoints.
    pub fn favorites(&self) -> favorites::Favorites<'_> {
        favorites::Favorites::new(self)
    }

    /// Sharing of sheets, workspaces, reports and folders.
    pub fn shares(&self) -> shares::Shares<'_> {
        shares::Shares::new(self)
    }

    /// Bulk row endpoints.
    pub fn rows(&self) -> rows::Rows<'_> {
        rows::Rows::new(self)
    }

    /// Sheet summary fields.
    pub fn summary(&self) -> summary::Summary<'_> {
        summary::Summary::new(self)
    }

    pub fn templates(&self) -> templates::Templates<'_> {
        templates::Templates::new(self)
    }

    /// Cross-sheet references and cell links.
    pub fn cross_sheet(&self) -> cross_sheet::CrossSheet<'_> {
        cross_sheet::CrossSheet::new(self)
    }

    /// Event stream endpoints (requires system admin rights).
    pub fn events(&self) -> events::Events<'_> {
        events::Events::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_without_data_is_empty() {
        let page: Page<columns::Column> =
            serde_json::from_str(r#"{"pageNumber":1,"pageSize":100,"totalPages":0,"totalCount":0}"#)
                .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total_count, Some(0));
    }

    #[test]
    fn test_page_decodes_items() {
        let page: Page<workspaces::Workspace> =
            serde_json::from_str(r#"{"data":[{"id":1,"name":"Team"}]}"#).unwrap();

        assert_eq!(page.data[0].name.as_deref(), Some("Team"));
        assert_eq!(page.page_number, None);
    }

    #[test]
    fn test_container_prefers_folder() {
        assert_eq!(Container::from_ids(Some(1), Some(2)), Container::Folder(1));
        assert_eq!(Container::from_ids(None, Some(2)), Container::Workspace(2));
        assert_eq!(Container::from_ids(None, None), Container::Home);
        assert_eq!(Container::Home.id(), None);
        assert_eq!(Container::Workspace(2).sheets_path(), "/workspaces/2/sheets");
        assert_eq!(Container::Folder(1).destination_type(), "folder");
    }
}
