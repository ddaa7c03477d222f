//! Chunking options.

use crate::error::{Error, Result};

/// Window sizes used by the section chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Nominal section length in characters
    pub max_section_length: usize,

    /// How far past the nominal end (and before the start) to look for a
    /// sentence boundary
    pub sentence_search_limit: usize,

    /// Characters shared by adjacent sections
    pub section_overlap: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_section_length: 1000,
            sentence_search_limit: 100,
            section_overlap: 100,
        }
    }
}

impl ChunkOptions {
    /// Create options with the default window sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nominal section length.
    pub fn with_max_section_length(mut self, length: usize) -> Self {
        self.max_section_length = length;
        self
    }

    /// Set the sentence search limit.
    pub fn with_sentence_search_limit(mut self, limit: usize) -> Self {
        self.sentence_search_limit = limit;
        self
    }

    /// Set the overlap between adjacent sections.
    pub fn with_section_overlap(mut self, overlap: usize) -> Self {
        self.section_overlap = overlap;
        self
    }

    /// Check that the window always moves forward.
    pub fn validate(&self) -> Result<()> {
        if self.max_section_length == 0 {
            return Err(Error::InvalidOptions(
                "max_section_length must be greater than zero".to_string(),
            ));
        }
        if self.section_overlap >= self.max_section_length {
            return Err(Error::InvalidOptions(format!(
                "section_overlap ({}) must be smaller than max_section_length ({})",
                self.section_overlap, self.max_section_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ChunkOptions::default();
        assert_eq!(options.max_section_length, 1000);
        assert_eq!(options.sentence_search_limit, 100);
        assert_eq!(options.section_overlap, 100);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = ChunkOptions::new()
            .with_max_section_length(200)
            .with_sentence_search_limit(20)
            .with_section_overlap(10);
        assert_eq!(options.max_section_length, 200);
        assert_eq!(options.sentence_search_limit, 20);
        assert_eq!(options.section_overlap, 10);
    }

    #[test]
    fn test_invalid_options() {
        assert!(ChunkOptions::new()
            .with_max_section_length(0)
            .validate()
            .is_err());
        let err = ChunkOptions::new()
            .with_section_overlap(1000)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));
    }
}
