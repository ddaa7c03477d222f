//! Table types.

use super::{BoundingRegion, Span};
use serde::{Deserialize, Serialize};

/// A table detected by the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Number of rows
    pub row_count: u32,

    /// Number of columns
    pub column_count: u32,

    /// Cells in reading order
    #[serde(default)]
    pub cells: Vec<TableCell>,

    /// Regions the table appears on; the first one decides its page
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,

    /// Location of the table in the content buffer
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Table {
    /// Create an empty table on a page.
    pub fn new(row_count: u32, column_count: u32, page_number: u32) -> Self {
        Self {
            row_count,
            column_count,
            cells: Vec::new(),
            bounding_regions: vec![BoundingRegion::new(page_number)],
            spans: Vec::new(),
        }
    }

    /// Page the table belongs to (its first bounding region).
    pub fn page_number(&self) -> Option<u32> {
        self.bounding_regions.first().map(|region| region.page_number)
    }

    /// First span of the first cell that has content.
    ///
    /// Empty cells carry no spans and are skipped.
    pub fn first_content_span(&self) -> Option<Span> {
        self.cells.iter().find_map(|cell| cell.spans.first().copied())
    }

    /// First span of the last cell that has content.
    pub fn last_content_span(&self) -> Option<Span> {
        self.cells
            .iter()
            .rev()
            .find_map(|cell| cell.spans.first().copied())
    }

    /// Cells grouped by row, each row ordered by column.
    pub fn rows(&self) -> Vec<Vec<&TableCell>> {
        (0..self.row_count)
            .map(|row| {
                let mut cells: Vec<&TableCell> = self
                    .cells
                    .iter()
                    .filter(|cell| cell.row_index == row)
                    .collect();
                cells.sort_by_key(|cell| cell.column_index);
                cells
            })
            .collect()
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Row position (0-indexed)
    pub row_index: u32,

    /// Column position (0-indexed)
    pub column_index: u32,

    /// Number of rows this cell spans
    #[serde(default = "default_cell_span")]
    pub row_span: u32,

    /// Number of columns this cell spans
    #[serde(default = "default_cell_span")]
    pub column_span: u32,

    /// Semantic kind assigned by the analysis service
    #[serde(default)]
    pub kind: CellKind,

    /// Cell text
    #[serde(default)]
    pub content: String,

    /// Location of the cell text; empty for genuinely empty cells
    #[serde(default)]
    pub spans: Vec<Span>,
}

fn default_cell_span() -> u32 {
    1
}

impl TableCell {
    /// Create a data cell.
    pub fn new(row_index: u32, column_index: u32, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            row_span: 1,
            column_span: 1,
            kind: CellKind::Content,
            content: content.into(),
            spans: Vec::new(),
        }
    }

    /// Set the cell kind and return self.
    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the span in the content buffer and return self.
    pub fn span(mut self, span: Span) -> Self {
        self.spans = vec![span];
        self
    }

    /// Set rowspan and return self.
    pub fn row_span(mut self, span: u32) -> Self {
        self.row_span = span;
        self
    }

    /// Set colspan and return self.
    pub fn column_span(mut self, span: u32) -> Self {
        self.column_span = span;
        self
    }

    /// Check if the cell has no location in the content buffer.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Check if the cell renders as a header cell.
    pub fn is_header(&self) -> bool {
        matches!(self.kind, CellKind::ColumnHeader | CellKind::RowHeader)
    }
}

/// Kind of a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    /// Ordinary data cell
    #[default]
    Content,
    /// Column header
    ColumnHeader,
    /// Row header
    RowHeader,
    /// Top-left header cell
    StubHead,
    /// Description cell
    Description,
}
