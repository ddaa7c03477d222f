//! # unlayout
//!
//! Structural analysis and chunking of analyzed document layouts.
//!
//! The input is the output of a document-analysis service: a content buffer
//! plus pages, paragraphs and tables pointing into it. `unlayout` infers the
//! repeating headers and footers of every page, detects tables that continue
//! across page breaks, composes per-page text with tables rendered as HTML,
//! and splits that text into overlapping sections sized for embedding.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unlayout::{parse_layout_file, Unlayout};
//!
//! fn main() -> unlayout::Result<()> {
//!     let layout = parse_layout_file("report.layout.json")?;
//!     let processed = Unlayout::new().process(&layout, "report.pdf")?;
//!
//!     for section in &processed.sections {
//!         println!("{} ({} chars)", section.id, section.content.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`analyze::infer`]: majority-vote header/footer paragraph counts
//! 2. [`analyze::merge_map`]: cross-page table runs
//! 3. [`render::compose`]: one [`PageDetail`] per page
//! 4. [`chunk::chunk`]: overlapping [`Section`]s
//!
//! Each stage is a pure function over borrowed input and can be called on
//! its own.

pub mod analyze;
pub mod chunk;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use analyze::{
    CrossPageMergeMap, FuzzyMatcher, HeaderFooterDetector, HeaderFooterProfile, ToleranceBands,
};
pub use chunk::{ChunkOptions, SectionChunker};
pub use error::{Error, Result};
pub use model::{
    BoundingRegion, CellKind, DocumentLayout, LayoutBuilder, Page, PageDetail, Paragraph, Section,
    Span, Table, TableCell,
};
pub use render::{ComposeOptions, JsonFormat, PageTextComposer};

use std::io::Read;
use std::path::Path;

use serde::Serialize;

/// Parse a layout from a JSON string.
///
/// Accepts the bare analyze result or one wrapped as `{"analyzeResult": ...}`.
///
/// # Example
///
/// ```
/// use unlayout::parse_layout_str;
///
/// let layout = parse_layout_str(r#"{
///     "content": "Hello",
///     "pages": [{"pageNumber": 1, "spans": [{"offset": 0, "length": 5}]}]
/// }"#).unwrap();
/// assert_eq!(layout.page_count(), 1);
/// ```
pub fn parse_layout_str(json: &str) -> Result<DocumentLayout> {
    DocumentLayout::from_json_str(json)
}

/// Parse a layout from JSON bytes.
pub fn parse_layout_slice(data: &[u8]) -> Result<DocumentLayout> {
    DocumentLayout::from_json_slice(data)
}

/// Parse a layout from a reader.
pub fn parse_layout_reader<R: Read>(mut reader: R) -> Result<DocumentLayout> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_layout_slice(&data)
}

/// Parse a layout from a JSON file.
///
/// # Example
///
/// ```no_run
/// use unlayout::parse_layout_file;
///
/// let layout = parse_layout_file("report.layout.json").unwrap();
/// println!("Pages: {}", layout.page_count());
/// ```
pub fn parse_layout_file<P: AsRef<Path>>(path: P) -> Result<DocumentLayout> {
    let data = std::fs::read(path)?;
    parse_layout_slice(&data)
}

/// Run the whole pipeline with default options.
pub fn process(layout: &DocumentLayout, blob_name: &str) -> Result<ProcessedDocument> {
    Unlayout::new().process(layout, blob_name)
}

/// Builder for the analysis, composition and chunking pipeline.
///
/// # Example
///
/// ```
/// use unlayout::{ChunkOptions, LayoutBuilder, Unlayout};
///
/// let layout = LayoutBuilder::new()
///     .page()
///     .paragraph("Quarterly figures are summarized below.")
///     .build();
///
/// let processed = Unlayout::new()
///     .with_chunk_options(ChunkOptions::new().with_max_section_length(500))
///     .strip_headers_footers(true)
///     .process(&layout, "q3.pdf")?;
/// assert_eq!(processed.pages.len(), 1);
/// # Ok::<(), unlayout::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unlayout {
    matcher: FuzzyMatcher,
    compose_options: ComposeOptions,
    chunk_options: ChunkOptions,
}

impl Unlayout {
    /// Create a new pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fuzzy-match tolerance bands used for header/footer inference.
    pub fn with_tolerance_bands(mut self, bands: ToleranceBands) -> Self {
        self.matcher = FuzzyMatcher::with_bands(bands);
        self
    }

    /// Set the composition options.
    pub fn with_compose_options(mut self, options: ComposeOptions) -> Self {
        self.compose_options = options;
        self
    }

    /// Set the chunk window sizes.
    pub fn with_chunk_options(mut self, options: ChunkOptions) -> Self {
        self.chunk_options = options;
        self
    }

    /// Enable or disable merging of cross-page tables.
    pub fn merge_cross_page_tables(mut self, merge: bool) -> Self {
        self.compose_options = self.compose_options.with_merge_cross_page_tables(merge);
        self
    }

    /// Enable or disable dropping inferred headers and footers from page text.
    pub fn strip_headers_footers(mut self, strip: bool) -> Self {
        self.compose_options = self.compose_options.with_strip_headers_footers(strip);
        self
    }

    /// Run the pipeline over one layout.
    pub fn process(&self, layout: &DocumentLayout, blob_name: &str) -> Result<ProcessedDocument> {
        self.chunk_options.validate()?;
        if layout.is_empty() {
            log::info!("Layout of '{}' is empty, nothing to process", blob_name);
            return Ok(ProcessedDocument::default());
        }
        layout.validate()?;

        let header_footer = if self.compose_options.needs_profile() {
            HeaderFooterDetector::with_matcher(self.matcher)
                .infer(&layout.paragraphs, layout.page_count())
        } else {
            HeaderFooterProfile::new()
        };

        let merge_map = if self.compose_options.merge_cross_page_tables {
            analyze::merge_map(&layout.tables, &layout.paragraphs, &header_footer)?
        } else {
            CrossPageMergeMap::new()
        };

        let pages =
            render::compose_with_options(layout, &merge_map, &header_footer, self.compose_options)?;
        let sections = chunk::chunk_with_options(&pages, blob_name, self.chunk_options)?;

        log::info!(
            "Processed '{}': {} page(s), {} cross-page table run(s), {} section(s)",
            blob_name,
            pages.len(),
            merge_map.len(),
            sections.len()
        );

        Ok(ProcessedDocument {
            pages,
            sections,
            header_footer,
            merge_map,
        })
    }

    /// Run the pipeline over independent documents in parallel.
    ///
    /// Each entry pairs a layout with its blob name; results keep the input
    /// order and one failing document does not affect the others.
    #[cfg(feature = "parallel")]
    pub fn process_batch(
        &self,
        documents: &[(&DocumentLayout, &str)],
    ) -> Vec<Result<ProcessedDocument>> {
        use rayon::prelude::*;

        documents
            .par_iter()
            .map(|(layout, blob_name)| self.process(layout, blob_name))
            .collect()
    }
}

/// Output of the pipeline for one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessedDocument {
    /// Composed page records
    pub pages: Vec<PageDetail>,

    /// Overlapping sections over the composed text
    pub sections: Vec<Section>,

    /// Inferred header/footer counts, empty when neither table merging nor
    /// header/footer stripping is enabled
    #[serde(skip)]
    pub header_footer: HeaderFooterProfile,

    /// Cross-page table runs
    #[serde(skip)]
    pub merge_map: CrossPageMergeMap,
}

impl ProcessedDocument {
    /// Convert pages and sections to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(self, format)
    }

    /// One section per page record instead of overlapping windows.
    pub fn page_sections(&self, blob_name: &str) -> Vec<Section> {
        chunk::page_sections(&self.pages, blob_name)
    }

    /// Full composed text.
    pub fn text(&self) -> String {
        self.pages.iter().map(|page| page.text.as_str()).collect()
    }
}
