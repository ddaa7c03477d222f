//! Records produced by composition and chunking.

use serde::{Deserialize, Serialize};

/// Composed text of one page, or of a page plus the pages its trailing
/// table continues into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDetail {
    /// First page covered (1-indexed)
    pub from_page: u32,

    /// Last page covered, set only when a cross-page table was merged in
    pub to_page: Option<u32>,

    /// Offset of this text in the concatenation of all page texts
    pub offset: usize,

    /// Composed text, tables rendered as HTML
    pub text: String,
}

impl PageDetail {
    /// Create a new page record.
    pub fn new(from_page: u32, to_page: Option<u32>, offset: usize, text: String) -> Self {
        Self {
            from_page,
            to_page,
            offset,
            text,
        }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Offset one past the end of this record's text.
    pub fn end_offset(&self) -> usize {
        self.offset + self.char_len()
    }

    /// Last page covered by this record.
    pub fn last_page(&self) -> u32 {
        self.to_page.unwrap_or(self.from_page)
    }

    /// Name of the corpus blob holding this record's text.
    pub fn corpus_name(&self, blob_name: &str) -> String {
        crate::chunk::corpus_name(blob_name, self.from_page, self.last_page())
    }
}

/// An embedding-sized chunk of composed document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Index key, unique within one document
    pub id: String,

    /// Chunk text
    pub content: String,

    /// Blob name the chunk is cited under
    pub source_page: String,

    /// Blob name of the source document
    pub source_file: String,
}
