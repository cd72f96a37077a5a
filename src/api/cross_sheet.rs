//! Cross-sheet references and cell links.
//!
//! Cell links have no endpoint of their own: they are written through a row
//! update whose cell carries `linkInFromCell`.

use crate::{
    api::{
        rows::{Cell, CellRef, RowUpdate},
        ApiResult, Id, Page,
    },
    Client, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named range of another sheet, usable in formulas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossSheetReference {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub source_sheet_id: Option<Id>,
    pub start_row_id: Option<Id>,
    pub end_row_id: Option<Id>,
    pub start_column_id: Option<Id>,
    pub end_column_id: Option<Id>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reference to create. Omitted bounds span the whole sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCrossSheetReference {
    pub name: String,
    pub source_sheet_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_row_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_row_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column_id: Option<Id>,
}

/// Cross-sheet endpoints; see [`Client::cross_sheet`].
pub struct CrossSheet<'a> {
    client: &'a Client,
}

impl<'a> CrossSheet<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn references(&self, sheet_id: Id) -> Result<Page<CrossSheetReference>> {
        self.client
            .get(format!("/sheets/{}/crosssheetreferences", sheet_id))
            .await
    }

    pub async fn reference(&self, sheet_id: Id, reference_id: Id) -> Result<CrossSheetReference> {
        self.client
            .get(format!(
                "/sheets/{}/crosssheetreferences/{}",
                sheet_id, reference_id
            ))
            .await
    }

    pub async fn create_reference(
        &self,
        sheet_id: Id,
        reference: &NewCrossSheetReference,
    ) -> Result<ApiResult<CrossSheetReference>> {
        self.client
            .post(format!("/sheets/{}/crosssheetreferences", sheet_id), reference)
            .await
    }

    /// Makes the cell at `row_id`/`column_id` mirror `source`.
    pub async fn link_cell(
        &self,
        sheet_id: Id,
        row_id: Id,
        column_id: Id,
        source: CellRef,
    ) -> Result<ApiResult<Vec<Value>>> {
        let cell = Cell {
            column_id,
            value: Value::Null,
            link_in_from_cell: Some(Some(source)),
        };
        self.write_cell(sheet_id, row_id, cell).await
    }

    /// Removes the inbound link and clears the cell.
    pub async fn unlink_cell(
        &self,
        sheet_id: Id,
        row_id: Id,
        column_id: Id,
    ) -> Result<ApiResult<Vec<Value>>> {
        let cell = Cell {
            column_id,
            value: Value::Null,
            link_in_from_cell: Some(None),
        };
        self.write_cell(sheet_id, row_id, cell).await
    }

    /// The sheet with `cellLinks` included on its cells.
    pub async fn cell_links(&self, sheet_id: Id) -> Result<Value> {
        self.client.sheets().get(sheet_id, Some("cellLinks")).await
    }

    async fn write_cell(&self, sheet_id: Id, row_id: Id, cell: Cell) -> Result<ApiResult<Vec<Value>>> {
        let update = RowUpdate {
            id: row_id,
            cells: vec![cell],
        };
        self.client
            .rows()
            .update(sheet_id, std::slice::from_ref(&update))
            .await
    }
}
