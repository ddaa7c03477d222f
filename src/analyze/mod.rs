//! Structural analysis of a layout.
//!
//! - [`fuzzy`]: approximate text equality used to compare page edges
//! - [`header_footer`]: majority-vote header/footer inference
//! - [`table_merge`]: detection of tables split across page breaks

pub mod fuzzy;
pub mod header_footer;
pub mod table_merge;

pub use fuzzy::{are_equivalent, normalize, FuzzyMatcher, ToleranceBands};
pub use header_footer::{
    infer, HeaderFooterDetector, HeaderFooterProfile, PageEdges, LARGE_DOCUMENT_PAGES,
};
pub use table_merge::{merge_map, CrossPageMergeMap, CrossPageTableMerger};
