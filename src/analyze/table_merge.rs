//! Cross-page table detection.
//!
//! A table is a *candidate* when its last non-empty cell is the last body
//! paragraph of its page (nothing but the footer follows it). A following
//! table is a *continuation* when it has the same column count and its first
//! non-empty cell is the first body paragraph of its page (nothing but the
//! header precedes it).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::header_footer::HeaderFooterProfile;
use crate::error::{Error, Result};
use crate::model::{paragraphs_on_page, Paragraph, Span, Table};

/// Maps the index of a table that starts a cross-page run to the number of
/// following tables that continue it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossPageMergeMap {
    runs: BTreeMap<usize, u32>,
}

impl CrossPageMergeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a run.
    pub fn insert(&mut self, table_index: usize, tables_to_merge: u32) {
        self.runs.insert(table_index, tables_to_merge);
    }

    /// Number of tables merged into a table (0 if it starts no run).
    pub fn tables_to_merge(&self, table_index: usize) -> u32 {
        self.runs.get(&table_index).copied().unwrap_or(0)
    }

    /// Check if a table is absorbed into an earlier table's run.
    pub fn is_continuation(&self, table_index: usize) -> bool {
        self.runs.iter().any(|(&anchor, &count)| {
            table_index > anchor && table_index <= anchor + count as usize
        })
    }

    /// Iterate over `(anchor_index, tables_to_merge)` in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.runs.iter().map(|(index, count)| (*index, *count))
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if no cross-page tables were found.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Scanner state over the ordered table list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No open candidate
    Scanning,
    /// A candidate is collecting continuations
    Extending {
        candidate_index: usize,
        merge_count: u32,
    },
}

/// Detects tables split across page boundaries.
pub struct CrossPageTableMerger<'a> {
    tables: &'a [Table],
    paragraphs: &'a [Paragraph],
    profile: &'a HeaderFooterProfile,
}

impl<'a> CrossPageTableMerger<'a> {
    /// Create a merger over a layout's tables and paragraphs.
    pub fn new(
        tables: &'a [Table],
        paragraphs: &'a [Paragraph],
        profile: &'a HeaderFooterProfile,
    ) -> Self {
        Self {
            tables,
            paragraphs,
            profile,
        }
    }

    /// Build the merge map.
    pub fn merge_map(&self) -> Result<CrossPageMergeMap> {
        let mut map = CrossPageMergeMap::new();

        let final_state = self.tables.iter().enumerate().try_fold(
            ScanState::Scanning,
            |state, (index, table)| -> Result<ScanState> {
                if let ScanState::Extending {
                    candidate_index,
                    merge_count,
                } = state
                {
                    let candidate = &self.tables[candidate_index];
                    if candidate.column_count == table.column_count
                        && self.is_continuation(table)?
                    {
                        log::debug!(
                            "Table {} continues table {} across a page break",
                            index,
                            candidate_index
                        );
                        return Ok(ScanState::Extending {
                            candidate_index,
                            merge_count: merge_count + 1,
                        });
                    }
                    if merge_count > 0 {
                        map.insert(candidate_index, merge_count);
                    }
                }

                // The table that broke a run is re-tested as a new candidate
                self.open(index, table)
            },
        )?;

        if let ScanState::Extending {
            candidate_index,
            merge_count,
        } = final_state
        {
            if merge_count > 0 {
                map.insert(candidate_index, merge_count);
            }
        }

        Ok(map)
    }

    fn open(&self, index: usize, table: &Table) -> Result<ScanState> {
        if self.is_candidate(table)? {
            log::debug!("Table {} ends its page and may continue", index);
            Ok(ScanState::Extending {
                candidate_index: index,
                merge_count: 0,
            })
        } else {
            Ok(ScanState::Scanning)
        }
    }

    /// Check if a table's last non-empty cell is its page's last body paragraph.
    pub fn is_candidate(&self, table: &Table) -> Result<bool> {
        let page_number = table_page(table)?;
        let footer = self
            .profile
            .footer_count(page_number)
            .ok_or(Error::PageNotFound(page_number))? as usize;

        let Some(cell_span) = table.last_content_span() else {
            return Ok(false);
        };
        let page_paragraphs = paragraphs_on_page(self.paragraphs, page_number);
        let Some(index) = page_paragraphs.len().checked_sub(footer + 1) else {
            return Ok(false);
        };

        spans_align(cell_span, page_paragraphs[index], page_number)
    }

    /// Check if a table's first non-empty cell is its page's first body paragraph.
    pub fn is_continuation(&self, table: &Table) -> Result<bool> {
        let page_number = table_page(table)?;
        let header = self
            .profile
            .header_count(page_number)
            .ok_or(Error::PageNotFound(page_number))? as usize;

        let Some(cell_span) = table.first_content_span() else {
            return Ok(false);
        };
        let page_paragraphs = paragraphs_on_page(self.paragraphs, page_number);
        let Some(paragraph) = page_paragraphs.get(header) else {
            return Ok(false);
        };

        spans_align(cell_span, paragraph, page_number)
    }
}

fn table_page(table: &Table) -> Result<u32> {
    table
        .page_number()
        .ok_or_else(|| Error::MalformedLayout("table has no bounding region".to_string()))
}

fn spans_align(cell_span: Span, paragraph: &Paragraph, page_number: u32) -> Result<bool> {
    let paragraph_span = paragraph.first_span().ok_or_else(|| {
        Error::MissingSpan(format!(
            "paragraph '{}' on page {}",
            paragraph.content, page_number
        ))
    })?;
    Ok(paragraph_span == cell_span)
}

/// Build the cross-page merge map for a layout's tables.
pub fn merge_map(
    tables: &[Table],
    paragraphs: &[Paragraph],
    header_footer: &HeaderFooterProfile,
) -> Result<CrossPageMergeMap> {
    CrossPageTableMerger::new(tables, paragraphs, header_footer).merge_map()
}
