//! Programmatic layout assembly.
//!
//! [`LayoutBuilder`] appends text to a content buffer and records the spans
//! the analysis service would have reported for it, which makes it possible
//! to feed layouts from other sources (or test fixtures) into the pipeline.
//!
//! ```
//! use unlayout::model::LayoutBuilder;
//!
//! let layout = LayoutBuilder::new()
//!     .page()
//!     .paragraph("Annual Report 2023")
//!     .table(&[&["Name", "Qty"], &["Apples", "3"]])
//!     .page()
//!     .paragraph("Annual Report 2023")
//!     .build();
//!
//! assert_eq!(layout.page_count(), 2);
//! assert_eq!(layout.tables.len(), 1);
//! ```

use super::{CellKind, DocumentLayout, Page, Paragraph, Span, Table, TableCell};

/// Builder for [`DocumentLayout`] values.
///
/// Each paragraph and non-empty table cell is followed by a newline in the
/// content buffer. Table cells are also emitted as paragraphs sharing the
/// cell's span, mirroring the analysis service.
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    content: String,
    length: usize,
    pages: Vec<Page>,
    paragraphs: Vec<Paragraph>,
    tables: Vec<Table>,
    page_start: Option<usize>,
}

impl LayoutBuilder {
    /// Create a new builder with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current page (if any) and start the next one.
    pub fn page(mut self) -> Self {
        self.close_page();
        self.page_start = Some(self.length);
        self
    }

    /// Append a paragraph to the current page.
    pub fn paragraph(mut self, text: &str) -> Self {
        let page_number = self.current_page();
        let span = self.append(text);
        self.paragraphs
            .push(Paragraph::new(text, span, page_number));
        self
    }

    /// Append a table of data cells; empty strings become empty cells.
    pub fn table(self, rows: &[&[&str]]) -> Self {
        self.push_table(rows, false)
    }

    /// Append a table whose first row holds column headers.
    pub fn header_table(self, rows: &[&[&str]]) -> Self {
        self.push_table(rows, true)
    }

    /// Finish the layout.
    pub fn build(mut self) -> DocumentLayout {
        self.close_page();
        DocumentLayout {
            content: self.content,
            pages: self.pages,
            paragraphs: self.paragraphs,
            tables: self.tables,
        }
    }

    fn push_table(mut self, rows: &[&[&str]], header_row: bool) -> Self {
        let page_number = self.current_page();
        let column_count = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut table = Table::new(rows.len() as u32, column_count as u32, page_number);
        let mut covered: Option<(usize, usize)> = None;

        for (row_index, row) in rows.iter().enumerate() {
            for (column_index, text) in row.iter().enumerate() {
                let mut cell = TableCell::new(row_index as u32, column_index as u32, *text);
                if header_row && row_index == 0 {
                    cell = cell.kind(CellKind::ColumnHeader);
                }
                if !text.is_empty() {
                    let span = self.append(text);
                    self.paragraphs
                        .push(Paragraph::new(*text, span, page_number));
                    covered = Some(match covered {
                        Some((start, _)) => (start, span.end()),
                        None => (span.offset, span.end()),
                    });
                    cell = cell.span(span);
                }
                table.cells.push(cell);
            }
        }

        if let Some((start, end)) = covered {
            table.spans.push(Span::new(start, end - start));
        }
        self.tables.push(table);
        self
    }

    fn current_page(&mut self) -> u32 {
        if self.page_start.is_none() {
            self.page_start = Some(self.length);
        }
        self.pages.len() as u32 + 1
    }

    fn append(&mut self, text: &str) -> Span {
        let offset = self.length;
        let length = text.chars().count();
        self.content.push_str(text);
        self.content.push('\n');
        self.length += length + 1;
        Span::new(offset, length)
    }

    fn close_page(&mut self) {
        if let Some(start) = self.page_start.take() {
            let number = self.pages.len() as u32 + 1;
            self.pages
                .push(Page::new(number, Span::new(start, self.length - start)));
        }
    }
}
