//! Integration tests for section chunking.

use unlayout::chunk::{
    chunk, chunk_with_options, corpus_name, find_page, page_sections, ChunkOptions,
    SectionChunker,
};
use unlayout::PageDetail;

/// `len` characters of `x` with a space at every tenth position.
fn spaced_text(len: usize) -> Vec<char> {
    (0..len)
        .map(|i| if i % 10 == 9 { ' ' } else { 'x' })
        .collect()
}

fn section_start(id: &str) -> usize {
    id.rsplit('-').next().unwrap().parse().unwrap()
}

#[test]
fn test_first_section_ends_after_sentence() {
    let mut text = spaced_text(1050);
    text[1005] = '.';
    let pages = vec![PageDetail::new(1, None, 0, text.into_iter().collect())];

    let sections = chunk(&pages, "doc.pdf");
    let first = &sections[0];
    assert_eq!(first.content.chars().count(), 1006);
    assert!(first.content.ends_with('.'));
    assert_eq!(first.id, "doc_pdf-0");
}

#[test]
fn test_section_never_ends_inside_table() {
    // Page 1 is 900 characters of words with one sentence ending at 849;
    // page 2 opens with a table covering 900..1200
    let mut prefix: Vec<char> = "lorem ipsum ".repeat(80).chars().take(900).collect();
    prefix[849] = '.';
    let table = format!("<table><tr><td>{}</td></tr></table>", "z".repeat(267));
    assert_eq!(table.len(), 300);
    let page_two = format!("{}{}", table, "dolor sit ".repeat(20));

    let pages = vec![
        PageDetail::new(1, None, 0, prefix.into_iter().collect()),
        PageDetail::new(2, None, 900, page_two),
    ];

    let sections = chunk(&pages, "doc.pdf");
    assert_eq!(sections.len(), 2);

    let first = &sections[0];
    assert!(first.content.contains("<table"));
    assert!(!first.content.contains("</table"));

    let second = &sections[1];
    assert!(section_start(&second.id) <= 900);
    assert_eq!(second.id, "doc_pdf-850");
    assert!(second.content.contains(&table));
    assert_eq!(second.source_page, "doc.pdf");
    assert_eq!(second.source_file, "doc.pdf");
}

#[test]
fn test_sections_are_contiguous_and_overlapping() {
    let text: String = "The quick brown fox jumps over the lazy dog. ".repeat(120);
    let length = text.chars().count();
    let pages = vec![PageDetail::new(1, None, 0, text.clone())];

    let sections = chunk(&pages, "notes.txt");
    assert!(sections.len() > 3);
    assert_eq!(section_start(&sections[0].id), 0);

    let mut previous_end = 0;
    for (index, section) in sections.iter().enumerate() {
        let start = section_start(&section.id);
        let end = start + section.content.chars().count();
        if index > 0 {
            assert!(start <= previous_end, "gap before section {}", index);
            assert!(start > section_start(&sections[index - 1].id));
        }
        let expected: String = text.chars().skip(start).take(end - start).collect();
        assert_eq!(section.content, expected);
        previous_end = end;
    }
    assert_eq!(previous_end, length);
}

#[test]
fn test_source_page_matches_source_file() {
    let pages = vec![
        PageDetail::new(1, None, 0, "alpha beta. ".repeat(60)),
        PageDetail::new(2, Some(3), 720, "gamma delta. ".repeat(60)),
        PageDetail::new(4, None, 1500, "epsilon zeta. ".repeat(60)),
    ];
    let sections = chunk(&pages, "archive/manual-2.pdf");

    assert!(sections.len() > 2);
    let last_start = section_start(&sections.last().unwrap().id);
    assert_eq!(pages[find_page(&pages, last_start)].from_page, 4);
    for section in &sections {
        assert_eq!(section.source_page, "archive/manual-2.pdf");
        assert_eq!(section.source_file, "archive/manual-2.pdf");
        assert!(section.id.starts_with("archive_manual-2_pdf-"));
    }
}

#[test]
fn test_tiny_document_yields_nothing() {
    let pages = vec![PageDetail::new(1, None, 0, "Too short to index. ".to_string())];
    assert!(chunk(&pages, "doc.pdf").is_empty());
    assert!(chunk(&[], "doc.pdf").is_empty());
}

#[test]
fn test_consumer_can_stop_early() {
    let pages = vec![PageDetail::new(1, None, 0, "Lorem ipsum dolor. ".repeat(500))];
    let chunker = SectionChunker::new(&pages, "doc.pdf");

    let first_two: Vec<_> = chunker.iter().take(2).collect();
    let all = chunker.chunk();
    assert_eq!(first_two.len(), 2);
    assert_eq!(first_two[..], all[..2]);
}

#[test]
fn test_custom_window() {
    let pages = vec![PageDetail::new(1, None, 0, "one two three. ".repeat(100))];
    let options = ChunkOptions::new()
        .with_max_section_length(300)
        .with_sentence_search_limit(30)
        .with_section_overlap(30);

    let sections = chunk_with_options(&pages, "doc.pdf", options).unwrap();
    assert!(sections.len() >= 5);
    for section in &sections {
        assert!(section.content.chars().count() <= 300 + 3 * 30);
    }
}

#[test]
fn test_page_sections_and_corpus_names() {
    let pages = vec![
        PageDetail::new(1, None, 0, "first page ".to_string()),
        PageDetail::new(2, Some(4), 11, "merged pages ".to_string()),
    ];

    let sections = page_sections(&pages, "q3/report.pdf");
    assert_eq!(sections[0].id, "q3_report_pdf-1to1");
    assert_eq!(sections[0].source_file, "report-1.pdf");
    assert_eq!(sections[0].source_page, "report-1.pdf");
    assert_eq!(sections[1].id, "q3_report_pdf-2to4");
    assert_eq!(
        sections[1].source_file,
        "report-2.pdf,report-3.pdf,report-4.pdf"
    );
    assert_eq!(sections[1].source_page, sections[1].source_file);

    assert_eq!(pages[1].corpus_name("q3/report.pdf"), "report-2to4.txt");
    assert_eq!(corpus_name("report.pdf", 1, 1), "report-1to1.txt");
}
