//! Paragraph type.

use super::{BoundingRegion, Span};
use serde::{Deserialize, Serialize};

/// A paragraph detected by the analysis service.
///
/// Table cells are reported as paragraphs too, sharing the cell's span.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Paragraph text in reading order
    pub content: String,

    /// Location of the paragraph in the content buffer
    #[serde(default)]
    pub spans: Vec<Span>,

    /// Regions (and therefore pages) the paragraph appears on
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl Paragraph {
    /// Create a paragraph on a single page.
    pub fn new(content: impl Into<String>, span: Span, page_number: u32) -> Self {
        Self {
            content: content.into(),
            spans: vec![span],
            bounding_regions: vec![BoundingRegion::new(page_number)],
        }
    }

    /// Check if the paragraph appears on the given page.
    pub fn is_on_page(&self, page_number: u32) -> bool {
        self.bounding_regions
            .iter()
            .any(|region| region.page_number == page_number)
    }

    /// Get the first span of the paragraph.
    pub fn first_span(&self) -> Option<Span> {
        self.spans.first().copied()
    }
}
