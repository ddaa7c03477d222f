//! Integration tests for header/footer inference and cross-page table detection.

use unlayout::analyze::{are_equivalent, infer, merge_map, CrossPageTableMerger, HeaderFooterProfile};
use unlayout::{DocumentLayout, LayoutBuilder};

fn profile_with(pages: u32, header: u32, footer: u32) -> HeaderFooterProfile {
    let mut profile = HeaderFooterProfile::new();
    for page in 1..=pages {
        profile.insert(page, header, footer);
    }
    profile
}

fn merge(layout: &DocumentLayout, profile: &HeaderFooterProfile) -> unlayout::CrossPageMergeMap {
    merge_map(&layout.tables, &layout.paragraphs, profile).unwrap()
}

// ==================== Header/Footer Inference ====================

#[test]
fn test_identical_header_on_two_pages() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("Annual Report 2023")
        .paragraph("Revenue grew strongly")
        .page()
        .paragraph("Annual Report 2023")
        .paragraph("Costs were flat this year")
        .build();

    let profile = infer(&layout.paragraphs, layout.page_count());
    assert_eq!(profile.len(), 2);
    assert_eq!(profile.header_count(1), Some(1));
    assert_eq!(profile.header_count(2), Some(1));
    assert_eq!(profile.footer_count(1), Some(0));
    assert_eq!(profile.footer_count(2), Some(0));
}

#[test]
fn test_header_tolerates_ocr_noise() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("Annual Report 2023")
        .paragraph("Revenue grew strongly")
        .page()
        .paragraph("Annual  Rep0rt 2023")
        .paragraph("Costs were flat this year")
        .build();

    let profile = infer(&layout.paragraphs, layout.page_count());
    assert_eq!(profile.header_count(1), Some(1));
    assert_eq!(profile.header_count(2), Some(1));
}

#[test]
fn test_header_and_footer_on_every_page() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("ACME Corp")
        .paragraph("Overview of the quarterly results")
        .paragraph("Confidential")
        .page()
        .paragraph("ACME Corp")
        .paragraph("Regional breakdown follows")
        .paragraph("Confidential")
        .page()
        .paragraph("ACME Corp")
        .paragraph("Closing remarks for the quarter")
        .paragraph("Confidential")
        .build();

    let profile = infer(&layout.paragraphs, layout.page_count());
    for page in 1..=3 {
        assert_eq!(profile.header_count(page), Some(1), "header on page {}", page);
        assert_eq!(profile.footer_count(page), Some(1), "footer on page {}", page);
    }
}

#[test]
fn test_majority_vote_ignores_odd_page() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("ACME Corp")
        .paragraph("Sales in the northern region")
        .page()
        .paragraph("ACME Corp")
        .paragraph("Marketing spend was reduced")
        .page()
        .paragraph("ACME Corp")
        .paragraph("Hiring continued through summer")
        .page()
        .paragraph("Introduction")
        .paragraph("This page has no running header")
        .build();

    let profile = infer(&layout.paragraphs, layout.page_count());
    assert_eq!(profile.header_count(1), Some(1));
    assert_eq!(profile.header_count(2), Some(1));
    assert_eq!(profile.header_count(3), Some(1));
    assert_eq!(profile.header_count(4), Some(0));
}

#[test]
fn test_footer_split_across_two_paragraphs() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("ACME Corp")
        .paragraph("Summary of operations")
        .paragraph("Confidential Internal Use")
        .page()
        .paragraph("ACME Corp")
        .paragraph("Staffing levels rose sharply")
        .paragraph("Confidential")
        .paragraph("Internal Use")
        .page()
        .paragraph("ACME Corp")
        .paragraph("Outlook for next year")
        .paragraph("Confidential Internal Use")
        .build();

    let profile = infer(&layout.paragraphs, layout.page_count());
    assert_eq!(profile.footer_count(1), Some(1));
    assert_eq!(profile.footer_count(2), Some(2));
    assert_eq!(profile.footer_count(3), Some(1));
    for page in 1..=3 {
        assert_eq!(profile.header_count(page), Some(1), "header on page {}", page);
    }
}

#[test]
fn test_single_page_has_no_edges() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("Only page")
        .paragraph("Nothing to compare against")
        .build();

    let profile = infer(&layout.paragraphs, layout.page_count());
    assert_eq!(profile.len(), 1);
    assert_eq!(profile.header_count(1), Some(0));
    assert_eq!(profile.footer_count(1), Some(0));
}

#[test]
fn test_no_pages() {
    let profile = infer(&[], 0);
    assert!(profile.is_empty());
}

#[test]
fn test_fuzzy_match_is_whitespace_and_case_insensitive() {
    assert!(are_equivalent("ACME  Corp", "acme corp"));
    assert!(!are_equivalent("ACME Corp", "Globex Inc"));
}

// ==================== Cross-Page Tables ====================

#[test]
fn test_run_over_three_pages() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("ACME Corp")
        .paragraph("Intro text")
        .table(&[&["a1", "a2"], &["a3", "a4"]])
        .page()
        .paragraph("ACME Corp")
        .table(&[&["b1", "b2"]])
        .page()
        .paragraph("ACME Corp")
        .table(&[&["c1", "c2"]])
        .paragraph("Closing")
        .page()
        .paragraph("ACME Corp")
        .paragraph("Appendix")
        .table(&[&["d1", "d2"]])
        .build();
    let profile = profile_with(4, 1, 0);

    let map = merge(&layout, &profile);
    assert_eq!(map.len(), 1);
    assert_eq!(map.tables_to_merge(0), 2);
    assert!(map.is_continuation(1));
    assert!(map.is_continuation(2));
    assert!(!map.is_continuation(3));
    assert_eq!(map.tables_to_merge(3), 0);
}

#[test]
fn test_table_breaking_a_run_starts_a_new_one() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("ACME Corp")
        .paragraph("Intro")
        .table(&[&["a1", "a2"]])
        .page()
        .paragraph("ACME Corp")
        .table(&[&["b1", "b2", "b3"]])
        .page()
        .paragraph("ACME Corp")
        .table(&[&["c1", "c2", "c3"]])
        .paragraph("End")
        .build();
    let profile = profile_with(3, 1, 0);

    let map = merge(&layout, &profile);
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![(1, 1)]);
}

#[test]
fn test_empty_cells_are_skipped_at_row_boundaries() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("Header")
        .table(&[&["x1", "x2"], &["x3", ""]])
        .paragraph("Footer")
        .page()
        .paragraph("Header")
        .table(&[&["", "y2"], &["y3", "y4"]])
        .paragraph("Footer")
        .build();
    let profile = profile_with(2, 1, 1);

    let map = merge(&layout, &profile);
    assert_eq!(map.tables_to_merge(0), 1);
}

#[test]
fn test_tables_inside_page_body_are_not_merged() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("Header")
        .table(&[&["m1", "m2"]])
        .paragraph("Body after the table")
        .paragraph("Footer")
        .page()
        .paragraph("Header")
        .paragraph("Body before the table")
        .table(&[&["n1", "n2"]])
        .paragraph("More body")
        .paragraph("Footer")
        .build();
    let profile = profile_with(2, 1, 1);

    assert!(merge(&layout, &profile).is_empty());

    let merger = CrossPageTableMerger::new(&layout.tables, &layout.paragraphs, &profile);
    assert!(!merger.is_candidate(&layout.tables[0]).unwrap());
    assert!(!merger.is_continuation(&layout.tables[1]).unwrap());
}

#[test]
fn test_table_on_unprofiled_page_is_error() {
    let layout = LayoutBuilder::new()
        .page()
        .paragraph("Body")
        .page()
        .table(&[&["z1"]])
        .build();
    let profile = profile_with(1, 0, 0);

    let err = merge_map(&layout.tables, &layout.paragraphs, &profile).unwrap_err();
    assert!(err.is_malformed());
}
