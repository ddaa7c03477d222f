//! Overlapping section windows over composed page text.

use super::naming::section_id;
use super::ChunkOptions;
use crate::error::Result;
use crate::model::{PageDetail, Section};

const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];
const WORD_BREAKS: [char; 12] = [',', ';', ':', ' ', '(', ')', '[', ']', '{', '}', '\t', '\n'];

const TABLE_OPEN: &str = "<table";
const TABLE_CLOSE: &str = "</table";

fn is_sentence_end(c: char) -> bool {
    SENTENCE_ENDINGS.contains(&c)
}

fn is_word_break(c: char) -> bool {
    WORD_BREAKS.contains(&c)
}

/// Index of the page record whose offset range contains `offset`.
///
/// Offsets past the last record resolve to the last page; an empty page list
/// resolves to 0.
pub fn find_page(pages: &[PageDetail], offset: usize) -> usize {
    pages
        .windows(2)
        .position(|pair| offset >= pair[0].offset && offset < pair[1].offset)
        .unwrap_or_else(|| pages.len().saturating_sub(1))
}

/// Splits a document's composed pages into overlapping sections.
///
/// The chunker itself holds no cursor: every call to [`SectionChunker::iter`]
/// starts a fresh pass over the text.
#[derive(Debug, Clone)]
pub struct SectionChunker<'a> {
    pages: &'a [PageDetail],
    source_file: &'a str,
    options: ChunkOptions,
}

impl<'a> SectionChunker<'a> {
    /// Create a chunker with the default window sizes.
    pub fn new(pages: &'a [PageDetail], source_file: &'a str) -> Self {
        Self {
            pages,
            source_file,
            options: ChunkOptions::default(),
        }
    }

    /// Create a chunker with custom window sizes.
    pub fn with_options(
        pages: &'a [PageDetail],
        source_file: &'a str,
        options: ChunkOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            pages,
            source_file,
            options,
        })
    }

    /// Get the chunk options.
    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Lazily produce the sections.
    pub fn iter(&self) -> Sections<'a> {
        Sections::new(self.pages, self.source_file, self.options)
    }

    /// Produce all sections.
    pub fn chunk(&self) -> Vec<Section> {
        let sections: Vec<Section> = self.iter().collect();
        log::info!(
            "Split '{}' into {} section(s)",
            self.source_file,
            sections.len()
        );
        sections
    }
}

impl<'a> IntoIterator for &SectionChunker<'a> {
    type Item = Section;
    type IntoIter = Sections<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy sequence of sections; see [`SectionChunker`].
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    pages: &'a [PageDetail],
    source_file: &'a str,
    options: ChunkOptions,
    text: Vec<char>,
    /// Tentative start of the next section, before boundary snapping
    cursor: usize,
    /// End of the last emitted section
    end: usize,
    /// Start of the last emitted section
    previous_start: Option<usize>,
    finished: bool,
}

impl<'a> Sections<'a> {
    fn new(pages: &'a [PageDetail], source_file: &'a str, options: ChunkOptions) -> Self {
        let text: Vec<char> = pages.iter().flat_map(|page| page.text.chars()).collect();
        log::debug!(
            "Splitting '{}' ({} characters over {} page(s)) into sections",
            source_file,
            text.len(),
            pages.len()
        );
        let end = text.len();
        Self {
            pages,
            source_file,
            options,
            text,
            cursor: 0,
            end,
            previous_start: None,
            finished: false,
        }
    }

    /// Snap the nominal end forward to a sentence ending, else a word break.
    fn snap_end(&self, start: usize) -> usize {
        let length = self.text.len();
        let ChunkOptions {
            max_section_length,
            sentence_search_limit,
            ..
        } = self.options;

        let mut end = start + max_section_length;
        if end > length {
            return length;
        }

        let mut last_word = None;
        while end < length
            && end - start - max_section_length < sentence_search_limit
            && !is_sentence_end(self.text[end])
        {
            if is_word_break(self.text[end]) {
                last_word = Some(end);
            }
            end += 1;
        }
        if end < length && !is_sentence_end(self.text[end]) {
            if let Some(word) = last_word {
                end = word;
            }
        }

        // Keep the boundary character
        if end < length {
            end += 1;
        }
        end
    }

    /// Snap the start backward to just after a sentence ending, else a word
    /// break, never reaching the previous section's start.
    fn snap_start(&self, cursor: usize, end: usize) -> usize {
        let ChunkOptions {
            max_section_length,
            sentence_search_limit,
            ..
        } = self.options;

        let floor = end.saturating_sub(max_section_length + 2 * sentence_search_limit);
        let floor = self.previous_start.map_or(floor, |previous| floor.max(previous));

        let mut start = cursor;
        let mut last_word = None;
        while start > 0 && start > floor && !is_sentence_end(self.text[start]) {
            if is_word_break(self.text[start]) {
                last_word = Some(start);
            }
            start -= 1;
        }
        if !is_sentence_end(self.text[start]) {
            if let Some(word) = last_word {
                start = word;
            }
        }
        if start > 0 {
            start += 1;
        }

        match self.previous_start {
            Some(previous) => start.max(previous + 1),
            None => start,
        }
    }

    /// Offset of an unclosed table opening in `content`, if the next section
    /// has to restart there.
    fn unclosed_table(&self, content: &[char]) -> Option<usize> {
        let open = rfind(content, TABLE_OPEN)?;
        let closed = rfind(content, TABLE_CLOSE).is_some_and(|close| close > open);
        (open > 2 * self.options.sentence_search_limit && !closed).then_some(open)
    }

    fn section(&self, start: usize, end: usize) -> Section {
        Section {
            id: section_id(self.source_file, start),
            content: self.text[start..end].iter().collect(),
            source_page: self.source_file.to_string(),
            source_file: self.source_file.to_string(),
        }
    }
}

impl Iterator for Sections<'_> {
    type Item = Section;

    fn next(&mut self) -> Option<Section> {
        if self.finished {
            return None;
        }
        let overlap = self.options.section_overlap;

        if self.cursor + overlap < self.text.len() {
            let end = self.snap_end(self.cursor);
            let start = self.snap_start(self.cursor, end);
            let section = self.section(start, end);

            self.cursor = match self.unclosed_table(&self.text[start..end]) {
                Some(table_start) => {
                    log::warn!(
                        "Section of '{}' at offset {} (page {}) ends inside a table opened at {}; restarting there",
                        self.source_file,
                        start,
                        self.pages
                            .get(find_page(self.pages, start))
                            .map_or(0, |page| page.from_page),
                        table_start
                    );
                    (end - overlap).min(start + table_start)
                }
                None => end - overlap,
            };
            self.end = end;
            self.previous_start = Some(start);
            return Some(section);
        }

        self.finished = true;
        if self.cursor + overlap < self.end {
            return Some(self.section(self.cursor, self.end));
        }
        None
    }
}

fn rfind(haystack: &[char], needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle.as_slice())
}

/// Split composed pages into overlapping sections with the default options.
pub fn chunk(pages: &[PageDetail], source_file: &str) -> Vec<Section> {
    SectionChunker::new(pages, source_file).chunk()
}

/// Split composed pages into overlapping sections with custom options.
pub fn chunk_with_options(
    pages: &[PageDetail],
    source_file: &str,
    options: ChunkOptions,
) -> Result<Vec<Section>> {
    Ok(SectionChunker::with_options(pages, source_file, options)?.chunk())
}
