//! Composition options.

/// Options for composing page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Append tables that continue onto later pages to their anchor page
    pub merge_cross_page_tables: bool,

    /// Drop the inferred header and footer paragraphs from the page text
    pub strip_headers_footers: bool,
}

impl ComposeOptions {
    /// Create new compose options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable cross-page table merging.
    pub fn with_merge_cross_page_tables(mut self, merge: bool) -> Self {
        self.merge_cross_page_tables = merge;
        self
    }

    /// Enable or disable header/footer removal.
    pub fn with_strip_headers_footers(mut self, strip: bool) -> Self {
        self.strip_headers_footers = strip;
        self
    }

    /// Check if the header/footer profile is needed at all.
    pub fn needs_profile(&self) -> bool {
        self.merge_cross_page_tables || self.strip_headers_footers
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            merge_cross_page_tables: true,
            strip_headers_footers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_options_builder() {
        let options = ComposeOptions::new()
            .with_merge_cross_page_tables(false)
            .with_strip_headers_footers(true);

        assert!(!options.merge_cross_page_tables);
        assert!(options.strip_headers_footers);
        assert!(options.needs_profile());
    }

    #[test]
    fn test_compose_options_defaults() {
        let options = ComposeOptions::default();
        assert!(options.merge_cross_page_tables);
        assert!(!options.strip_headers_footers);
        assert!(!ComposeOptions::new()
            .with_merge_cross_page_tables(false)
            .needs_profile());
    }
}
