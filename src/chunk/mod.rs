//! Splitting composed page text into index sections.
//!
//! [`chunk`] slides a window of about [`ChunkOptions::max_section_length`]
//! characters over the concatenated page text. Window edges snap to sentence
//! endings (`. ! ?`) or, failing that, to word breaks, and adjacent sections
//! share [`ChunkOptions::section_overlap`] characters. A section that ends
//! inside a rendered `<table>` makes the next section restart at that table.
//!
//! [`page_sections`] is the alternative one-section-per-page strategy.

mod naming;
mod options;
mod sections;

pub use naming::{corpus_name, page_blob_name, sanitize_id, section_id};
pub use options::ChunkOptions;
pub use sections::{chunk, chunk_with_options, find_page, SectionChunker, Sections};

use crate::model::{PageDetail, Section};

/// One section per composed page record.
///
/// A record that carries a merged cross-page table lists every page it
/// covers, comma-separated, in both `source_file` and `source_page`.
pub fn page_sections(pages: &[PageDetail], blob_name: &str) -> Vec<Section> {
    pages
        .iter()
        .map(|page| {
            let last_page = page.last_page();
            let names = (page.from_page..=last_page)
                .map(|number| page_blob_name(blob_name, number))
                .collect::<Vec<_>>()
                .join(",");
            Section {
                id: sanitize_id(&format!("{}-{}to{}", blob_name, page.from_page, last_page)),
                content: page.text.clone(),
                source_page: names.clone(),
                source_file: names,
            }
        })
        .collect()
}
