//! Rendering of composed page text and pipeline output.

mod compose;
mod html;
mod json;
mod options;

pub use compose::{compose, compose_with_options, PageTextComposer};
pub use html::{escape_html, table_to_html};
pub use json::{to_json, JsonFormat};
pub use options::ComposeOptions;
