//! Layout model types.
//!
//! The input side mirrors the output of the external document-analysis
//! service: a shared content buffer plus pages, paragraphs and tables that
//! point into it through [`Span`]s. The output side holds the composed
//! [`PageDetail`] records and the chunked [`Section`]s.

mod builder;
mod document;
mod output;
mod page;
mod paragraph;
mod span;
mod table;

pub use builder::LayoutBuilder;
pub use document::{paragraphs_on_page, DocumentLayout};
pub use output::{PageDetail, Section};
pub use page::Page;
pub use paragraph::Paragraph;
pub use span::{BoundingRegion, Span};
pub use table::{CellKind, Table, TableCell};
