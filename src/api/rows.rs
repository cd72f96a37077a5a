//! Bulk row operations.

use crate::{
    api::{ApiResult, Id},
    metadata::RequestMetadata,
    Client, Result,
};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source cell of a cell link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub sheet_id: Id,
    pub row_id: Id,
    pub column_id: Id,
}

/// A cell value to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub column_id: Id,
    /// Always sent; a missing value clears the cell
    #[serde(default)]
    pub value: Value,
    /// `Some(None)` sends `null`, which removes an inbound link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_in_from_cell: Option<Option<CellRef>>,
}

impl Cell {
    pub fn new(column_id: Id, value: impl Into<Value>) -> Self {
        Self {
            column_id,
            value: value.into(),
            link_in_from_cell: None,
        }
    }
}

/// A row to add. At most one of the position fields should be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_top: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_bottom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling_id: Option<Id>,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowUpdate {
    pub id: Id,
    pub cells: Vec<Cell>,
}

/// Target sheet and position of moved or copied rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDestination {
    pub sheet_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_top: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_bottom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling_id: Option<Id>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RowTransfer<'a> {
    row_ids: &'a [Id],
    to: &'a RowDestination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMapping {
    pub from: Id,
    pub to: Id,
}

/// Old to new row ids after a move or copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowTransferResult {
    pub destination_sheet_id: Option<Id>,
    #[serde(default = "Vec::new")]
    pub row_mappings: Vec<RowMapping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCriterion {
    pub column_id: Id,
    pub direction: SortDirection,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SortSpecifier<'a> {
    sort_criteria: &'a [SortCriterion],
}

/// Row endpoints that act on several rows per request; see [`Client::rows`].
pub struct Rows<'a> {
    client: &'a Client,
}

impl<'a> Rows<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn add(&self, sheet_id: Id, rows: &[NewRow]) -> Result<ApiResult<Vec<Value>>> {
        self.client
            .post(format!("/sheets/{}/rows", sheet_id), rows)
            .await
    }

    pub async fn update(&self, sheet_id: Id, rows: &[RowUpdate]) -> Result<ApiResult<Vec<Value>>> {
        self.client
            .put(format!("/sheets/{}/rows", sheet_id), rows)
            .await
    }

    /// Deletes rows by id; the result lists the deleted ids.
    pub async fn delete(
        &self,
        sheet_id: Id,
        row_ids: &[Id],
        ignore_rows_not_found: bool,
    ) -> Result<ApiResult<Vec<Id>>> {
        let metadata = RequestMetadata::new(Method::DELETE, format!("/sheets/{}/rows", sheet_id))
            .with_query_param("ids", join_ids(row_ids))
            .with_optional_query_param(
                "ignoreRowsNotFound",
                ignore_rows_not_found.then_some(true),
            );
        self.client.fetch(metadata).await
    }

    pub async fn move_to(
        &self,
        sheet_id: Id,
        row_ids: &[Id],
        destination: &RowDestination,
    ) -> Result<RowTransferResult> {
        self.transfer(sheet_id, "move", row_ids, destination).await
    }

    pub async fn copy_to(
        &self,
        sheet_id: Id,
        row_ids: &[Id],
        destination: &RowDestination,
    ) -> Result<RowTransferResult> {
        self.transfer(sheet_id, "copy", row_ids, destination).await
    }

    /// Sorts the sheet's rows; criteria apply in order. Returns the sorted sheet.
    pub async fn sort(&self, sheet_id: Id, criteria: &[SortCriterion]) -> Result<Value> {
        self.client
            .post(
                format!("/sheets/{}/sort", sheet_id),
                &SortSpecifier {
                    sort_criteria: criteria,
                },
            )
            .await
    }

    async fn transfer(
        &self,
        sheet_id: Id,
        operation: &str,
        row_ids: &[Id],
        to: &RowDestination,
    ) -> Result<RowTransferResult> {
        self.client
            .post(
                format!("/sheets/{}/rows/{}", sheet_id, operation),
                &RowTransfer { row_ids, to },
            )
            .await
    }
}

pub(crate) fn join_ids(ids: &[Id]) -> String {
    ids.iter().map(Id::to_string).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_value_defaults_to_null() {
        let cell: Cell = serde_json::from_value(json!({ "columnId": 3 })).unwrap();
        assert_eq!(
            serde_json::to_value(&cell).unwrap(),
            json!({ "columnId": 3, "value": null })
        );
    }

    #[test]
    fn test_cleared_link_serializes_null() {
        let cell = Cell {
            link_in_from_cell: Some(None),
            ..Cell::new(3, Value::Null)
        };
        assert_eq!(
            serde_json::to_value(&cell).unwrap(),
            json!({ "columnId": 3, "value": null, "linkInFromCell": null })
        );
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[1, 22, 333]), "1,22,333");
        assert_eq!(join_ids(&[]), "");
    }
}
