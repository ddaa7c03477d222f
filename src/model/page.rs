//! Page-level types.

use super::Span;
use serde::{Deserialize, Serialize};

/// A single page of the analyzed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Location of the page in the content buffer (exactly one span)
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Page {
    /// Create a new page covering the given span.
    pub fn new(page_number: u32, span: Span) -> Self {
        Self {
            page_number,
            spans: vec![span],
        }
    }

    /// Get the span describing the page's range, if any.
    pub fn span(&self) -> Option<Span> {
        self.spans.first().copied()
    }
}
