//! Document-level layout type.

use super::{Page, Paragraph, Table};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// The full output of the document-analysis service for one document.
///
/// Pages, paragraphs and tables are kept in their natural ascending order.
/// Every span of every element points into [`content`](Self::content).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLayout {
    /// Concatenated text of the whole document in reading order
    #[serde(default)]
    pub content: String,

    /// Pages in the document
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Paragraphs in reading order
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,

    /// Tables in reading order
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Analysis results are either bare or wrapped in an `analyzeResult` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutEnvelope {
    Wrapped {
        #[serde(rename = "analyzeResult")]
        analyze_result: DocumentLayout,
    },
    Bare(DocumentLayout),
}

impl DocumentLayout {
    /// Create a new empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a layout from the analysis service's JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let envelope: LayoutEnvelope = serde_json::from_str(json)?;
        Ok(envelope.into_layout())
    }

    /// Decode a layout from JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let envelope: LayoutEnvelope = serde_json::from_slice(data)?;
        Ok(envelope.into_layout())
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Length of the content buffer in characters.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Check if there is nothing to compose.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() || self.content.is_empty()
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|page| page.page_number == page_number)
    }

    /// Paragraphs appearing on a page, in reading order.
    pub fn paragraphs_on_page(&self, page_number: u32) -> Vec<&Paragraph> {
        paragraphs_on_page(&self.paragraphs, page_number)
    }

    /// Indices of the tables whose first bounding region is on a page.
    pub fn tables_on_page(&self, page_number: u32) -> Vec<usize> {
        self.tables
            .iter()
            .enumerate()
            .filter(|(_, table)| table.page_number() == Some(page_number))
            .map(|(index, _)| index)
            .collect()
    }

    /// Check the structural invariants the analysis relies on.
    ///
    /// Every page needs a span inside the content buffer, and every table
    /// must sit on a page the layout contains.
    pub fn validate(&self) -> Result<()> {
        let content_length = self.content_len();

        for page in &self.pages {
            let span = page
                .span()
                .ok_or_else(|| Error::MissingSpan(format!("page {}", page.page_number)))?;
            if span.end() > content_length {
                return Err(Error::SpanOutOfRange {
                    offset: span.offset,
                    length: span.length,
                    content_length,
                });
            }
        }

        for (index, table) in self.tables.iter().enumerate() {
            let page_number = table.page_number().ok_or_else(|| {
                Error::MalformedLayout(format!("table {} has no bounding region", index))
            })?;
            if self.get_page(page_number).is_none() {
                return Err(Error::PageNotFound(page_number));
            }
        }

        Ok(())
    }
}

impl LayoutEnvelope {
    fn into_layout(self) -> DocumentLayout {
        match self {
            LayoutEnvelope::Wrapped { analyze_result } => analyze_result,
            LayoutEnvelope::Bare(layout) => layout,
        }
    }
}

/// Paragraphs appearing on a page, in reading order.
pub fn paragraphs_on_page(paragraphs: &[Paragraph], page_number: u32) -> Vec<&Paragraph> {
    paragraphs
        .iter()
        .filter(|paragraph| paragraph.is_on_page(page_number))
        .collect()
}
