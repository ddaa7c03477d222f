//! Repeating header and footer detection.
//!
//! Every page is compared against every other page, growing a run of
//! matching paragraphs from the top (header) and from the bottom (footer).
//! Each comparison votes for how many header/footer paragraphs the compared
//! page has; the final count for a page is the most frequent vote over all
//! perspectives, so a single misaligned page pair cannot skew the result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fuzzy::{normalize, FuzzyMatcher};
use crate::model::{paragraphs_on_page, Paragraph};

/// Page count above which inference logs a warning. The pairwise
/// comparison is O(pages²) and is not capped.
pub const LARGE_DOCUMENT_PAGES: usize = 500;

/// Header and footer paragraph counts of one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEdges {
    /// Number of leading paragraphs forming the header
    pub header_paragraphs: u32,
    /// Number of trailing paragraphs forming the footer
    pub footer_paragraphs: u32,
}

/// Inferred header/footer paragraph counts, keyed by page number (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFooterProfile {
    pages: BTreeMap<u32, PageEdges>,
}

impl HeaderFooterProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the counts for a page.
    pub fn insert(&mut self, page_number: u32, header_paragraphs: u32, footer_paragraphs: u32) {
        self.pages.insert(
            page_number,
            PageEdges {
                header_paragraphs,
                footer_paragraphs,
            },
        );
    }

    /// Get the counts for a page.
    pub fn get(&self, page_number: u32) -> Option<PageEdges> {
        self.pages.get(&page_number).copied()
    }

    /// Number of header paragraphs on a page.
    pub fn header_count(&self, page_number: u32) -> Option<u32> {
        self.get(page_number).map(|edges| edges.header_paragraphs)
    }

    /// Number of footer paragraphs on a page.
    pub fn footer_count(&self, page_number: u32) -> Option<u32> {
        self.get(page_number).map(|edges| edges.footer_paragraphs)
    }

    /// Iterate over pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, PageEdges)> + '_ {
        self.pages.iter().map(|(page, edges)| (*page, *edges))
    }

    /// Number of pages in the profile.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the profile is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Which end of the page a run of paragraphs is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Header,
    Footer,
}

impl Edge {
    /// The paragraph `depth` positions in from this edge.
    fn at(self, paragraphs: &[String], depth: usize) -> Option<&str> {
        let index = match self {
            Edge::Header => depth,
            Edge::Footer => paragraphs.len().checked_sub(depth + 1)?,
        };
        paragraphs.get(index).map(String::as_str)
    }

    /// Join `inner` onto `outer` on the side facing the page body.
    fn extend(self, outer: &str, inner: &str) -> String {
        match self {
            Edge::Header => format!("{}{}", outer, inner),
            Edge::Footer => format!("{}{}", inner, outer),
        }
    }

    /// The `depth` outermost paragraphs, in document order.
    fn run(self, paragraphs: &[String], depth: usize) -> String {
        (0..depth)
            .filter_map(|d| self.at(paragraphs, d))
            .fold(String::new(), |acc, paragraph| self.extend(&acc, paragraph))
    }
}

/// Header or footer run found so far on the page being compared from.
#[derive(Debug, Clone, Default)]
struct Growth {
    count: usize,
    accumulated: String,
}

/// Paragraph counts attributed by one page-pair comparison.
#[derive(Debug, Clone, Copy, Default)]
struct Attribution {
    current: Option<usize>,
    other: Option<usize>,
}

/// Infers per-page header and footer paragraph counts.
#[derive(Debug, Clone, Default)]
pub struct HeaderFooterDetector {
    matcher: FuzzyMatcher,
}

impl HeaderFooterDetector {
    /// Create a detector using the default fuzzy matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector using a custom fuzzy matcher.
    pub fn with_matcher(matcher: FuzzyMatcher) -> Self {
        Self { matcher }
    }

    /// Infer header/footer counts for pages `1..=total_pages`.
    pub fn infer(&self, paragraphs: &[Paragraph], total_pages: usize) -> HeaderFooterProfile {
        let mut profile = HeaderFooterProfile::new();
        if total_pages == 0 {
            return profile;
        }
        if total_pages > LARGE_DOCUMENT_PAGES {
            log::warn!(
                "Header/footer inference over {} pages compares every page pair",
                total_pages
            );
        }

        let pages: Vec<Vec<String>> = (1..=total_pages as u32)
            .map(|number| {
                paragraphs_on_page(paragraphs, number)
                    .iter()
                    .map(|paragraph| normalize(&paragraph.content))
                    .collect()
            })
            .collect();

        // votes[p][q]: count attributed to page q when comparing from page p
        let header_votes: Vec<Vec<i32>> = (0..total_pages)
            .map(|p| self.votes_from(&pages, p, Edge::Header))
            .collect();
        let footer_votes: Vec<Vec<i32>> = (0..total_pages)
            .map(|p| self.votes_from(&pages, p, Edge::Footer))
            .collect();

        for q in 0..total_pages {
            let header = majority(header_votes.iter().map(|votes| votes[q]));
            let footer = majority(footer_votes.iter().map(|votes| votes[q]));
            log::debug!(
                "Page {}: {} header paragraph(s), {} footer paragraph(s)",
                q + 1,
                header,
                footer
            );
            profile.insert(q as u32 + 1, header, footer);
        }

        profile
    }

    /// Compare page `p` against every other page, starting just after it.
    fn votes_from(&self, pages: &[Vec<String>], p: usize, edge: Edge) -> Vec<i32> {
        let total = pages.len();
        let mut votes = vec![0; total];
        let mut growth = Growth::default();

        for k in 1..total {
            let q = (p + k) % total;
            let (next, attribution) = self.compare(&pages[p], &pages[q], edge, growth);
            growth = next;

            if let Some(count) = attribution.current {
                votes[p] = count as i32;
            }
            votes[q] = attribution.other.map_or(-1, |count| count as i32);
        }

        votes
    }

    fn compare(
        &self,
        current: &[String],
        other: &[String],
        edge: Edge,
        growth: Growth,
    ) -> (Growth, Attribution) {
        if growth.count > 0 {
            let other_count = self.match_known_run(&growth, other, edge);
            (
                growth,
                Attribution {
                    current: None,
                    other: other_count,
                },
            )
        } else {
            self.grow_run(current, other, edge, growth)
        }
    }

    /// Match a run already found on the current page against another page,
    /// allowing the other page's run to be one paragraph longer or shorter.
    fn match_known_run(&self, growth: &Growth, other: &[String], edge: Edge) -> Option<usize> {
        let count = growth.count;
        if other.len() < count {
            return None;
        }

        let run = edge.run(other, count);
        if self.matcher.are_equivalent_normalized(&growth.accumulated, &run) {
            return Some(count);
        }

        let (candidate, candidate_count) =
            if growth.accumulated.chars().count() > run.chars().count() {
                let extra = edge.at(other, count)?;
                (edge.extend(&run, extra), count + 1)
            } else {
                (edge.run(other, count - 1), count - 1)
            };

        self.matcher
            .are_equivalent_normalized(&growth.accumulated, &candidate)
            .then_some(candidate_count)
    }

    /// Grow a new run paragraph by paragraph while both pages keep matching.
    fn grow_run(
        &self,
        current: &[String],
        other: &[String],
        edge: Edge,
        mut growth: Growth,
    ) -> (Growth, Attribution) {
        let mut other_count = 0;

        loop {
            let (Some(mine), Some(theirs)) = (
                edge.at(current, growth.count),
                edge.at(other, other_count),
            ) else {
                break;
            };

            if self.matcher.are_equivalent_normalized(mine, theirs) {
                growth.accumulated = edge.extend(&growth.accumulated, mine);
                growth.count += 1;
                other_count += 1;
                continue;
            }

            // One side may have split a paragraph in two; widen the shorter side
            if mine.chars().count() > theirs.chars().count() {
                let Some(extra) = edge.at(other, other_count + 1) else {
                    break;
                };
                let widened = edge.extend(theirs, extra);
                if !self.matcher.are_equivalent_normalized(mine, &widened) {
                    break;
                }
                growth.accumulated = edge.extend(&growth.accumulated, mine);
                growth.count += 1;
                other_count += 2;
            } else {
                let Some(extra) = edge.at(current, growth.count + 1) else {
                    break;
                };
                let widened = edge.extend(mine, extra);
                if !self.matcher.are_equivalent_normalized(&widened, theirs) {
                    break;
                }
                growth.accumulated = edge.extend(&growth.accumulated, &widened);
                growth.count += 2;
                other_count += 1;
            }
        }

        let attribution = if growth.count > 0 && other_count > 0 {
            Attribution {
                current: Some(growth.count),
                other: Some(other_count),
            }
        } else {
            Attribution::default()
        };
        (growth, attribution)
    }
}

/// Most frequent non-negative vote; ties go to the value seen first.
fn majority(votes: impl Iterator<Item = i32>) -> u32 {
    let mut tally: Vec<(i32, usize)> = Vec::new();
    for vote in votes.filter(|vote| *vote >= 0) {
        match tally.iter_mut().find(|(value, _)| *value == vote) {
            Some(entry) => entry.1 += 1,
            None => tally.push((vote, 1)),
        }
    }

    let mut best: Option<(i32, usize)> = None;
    for (value, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map_or(0, |(value, _)| value as u32)
}

/// Infer header/footer counts with the default fuzzy matcher.
pub fn infer(paragraphs: &[Paragraph], total_pages: usize) -> HeaderFooterProfile {
    HeaderFooterDetector::new().infer(paragraphs, total_pages)
}
