//! Per-page text composition.
//!
//! Each page's slice of the content buffer is copied character by character,
//! except that every range covered by a table is replaced by that table's
//! HTML rendering (emitted once, where the table starts). Tables that
//! continue onto later pages are appended to their anchor page and skipped on
//! their own page.

use std::collections::HashSet;

use super::html::table_to_html;
use super::ComposeOptions;
use crate::analyze::{CrossPageMergeMap, HeaderFooterProfile};
use crate::error::{Error, Result};
use crate::model::{DocumentLayout, Page, PageDetail, Span};

/// What a page character turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Copied verbatim
    Text,
    /// Replaced by the rendering of the table with this index
    Table(usize),
    /// Dropped
    Skip,
}

/// Composes the text of every page of a layout.
pub struct PageTextComposer<'a> {
    layout: &'a DocumentLayout,
    merge_map: &'a CrossPageMergeMap,
    header_footer: &'a HeaderFooterProfile,
    options: ComposeOptions,
}

impl<'a> PageTextComposer<'a> {
    /// Create a composer.
    pub fn new(
        layout: &'a DocumentLayout,
        merge_map: &'a CrossPageMergeMap,
        header_footer: &'a HeaderFooterProfile,
        options: ComposeOptions,
    ) -> Self {
        Self {
            layout,
            merge_map,
            header_footer,
            options,
        }
    }

    /// Compose all pages, in page order, with running offsets.
    pub fn compose(&self) -> Result<Vec<PageDetail>> {
        if self.layout.is_empty() {
            return Ok(Vec::new());
        }
        self.layout.validate()?;

        let content: Vec<char> = self.layout.content.chars().collect();
        let mut details = Vec::with_capacity(self.layout.pages.len());
        let mut offset = 0;

        for page in &self.layout.pages {
            let (text, to_page) = self.compose_page(page, &content)?;
            let length = text.chars().count();
            log::debug!(
                "Composed page {} ({} characters, merged through {:?})",
                page.page_number,
                length,
                to_page
            );
            details.push(PageDetail::new(page.page_number, to_page, offset, text));
            offset += length;
        }

        log::info!(
            "Composed {} page(s) into {} characters",
            details.len(),
            offset
        );
        Ok(details)
    }

    fn compose_page(&self, page: &Page, content: &[char]) -> Result<(String, Option<u32>)> {
        let page_span = page
            .span()
            .ok_or_else(|| Error::MissingSpan(format!("page {}", page.page_number)))?;
        let mut marks = vec![Mark::Text; page_span.length];

        if self.options.strip_headers_footers {
            self.mark_headers_footers(page.page_number, page_span, &mut marks)?;
        }

        let tables = self.layout.tables_on_page(page.page_number);
        for &index in &tables {
            let mark = if self.is_continuation(index) {
                Mark::Skip
            } else {
                Mark::Table(index)
            };
            for span in &self.layout.tables[index].spans {
                cover(&mut marks, page_span, *span, mark);
            }
        }

        let mut text = String::with_capacity(page_span.length);
        let mut rendered = HashSet::new();
        for (position, mark) in marks.iter().enumerate() {
            match *mark {
                Mark::Text => text.push(content[page_span.offset + position]),
                Mark::Table(index) => {
                    if rendered.insert(index) {
                        text.push_str(&table_to_html(&self.layout.tables[index]));
                    }
                }
                Mark::Skip => {}
            }
        }

        let mut to_page = None;
        for &index in &tables {
            let count = self.tables_to_merge(index);
            for continuation in index + 1..=index + count {
                let table = self.layout.tables.get(continuation).ok_or_else(|| {
                    Error::MalformedLayout(format!(
                        "table {} is merged with {} tables but the layout ends at table {}",
                        index,
                        count,
                        self.layout.tables.len().saturating_sub(1)
                    ))
                })?;
                text.push_str(&table_to_html(table));
                to_page = table.page_number();
            }
        }

        text.push(' ');
        Ok((text, to_page))
    }

    fn mark_headers_footers(&self, page_number: u32, page_span: Span, marks: &mut [Mark]) -> Result<()> {
        let edges = self
            .header_footer
            .get(page_number)
            .ok_or(Error::PageNotFound(page_number))?;
        let paragraphs = self.layout.paragraphs_on_page(page_number);

        let header = (edges.header_paragraphs as usize).min(paragraphs.len());
        let footer_start = paragraphs
            .len()
            .saturating_sub(edges.footer_paragraphs as usize);

        for paragraph in paragraphs[..header].iter().chain(&paragraphs[footer_start..]) {
            for span in &paragraph.spans {
                cover(marks, page_span, *span, Mark::Skip);
            }
        }
        Ok(())
    }

    fn tables_to_merge(&self, index: usize) -> usize {
        if self.options.merge_cross_page_tables {
            self.merge_map.tables_to_merge(index) as usize
        } else {
            0
        }
    }

    fn is_continuation(&self, index: usize) -> bool {
        self.options.merge_cross_page_tables && self.merge_map.is_continuation(index)
    }
}

/// Mark the part of `span` that falls inside the page.
fn cover(marks: &mut [Mark], page_span: Span, span: Span, mark: Mark) {
    let start = span.offset.max(page_span.offset);
    let end = span.end().min(page_span.end());
    for absolute in start..end {
        marks[absolute - page_span.offset] = mark;
    }
}

/// Compose page texts with default options.
pub fn compose(
    layout: &DocumentLayout,
    merge_map: &CrossPageMergeMap,
    header_footer: &HeaderFooterProfile,
) -> Result<Vec<PageDetail>> {
    compose_with_options(layout, merge_map, header_footer, ComposeOptions::default())
}

/// Compose page texts with custom options.
pub fn compose_with_options(
    layout: &DocumentLayout,
    merge_map: &CrossPageMergeMap,
    header_footer: &HeaderFooterProfile,
    options: ComposeOptions,
) -> Result<Vec<PageDetail>> {
    PageTextComposer::new(layout, merge_map, header_footer, options).compose()
}
