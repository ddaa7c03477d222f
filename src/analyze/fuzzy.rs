//! Approximate text equality with length-bucketed tolerance.

/// Maximum edit distance, as a percentage of the longer text, for each
/// length bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceBands {
    /// Longest text length (inclusive) of the short bucket
    pub short_len: usize,
    /// Tolerance for short texts
    pub short_percent: u32,
    /// Longest text length (inclusive) of the medium bucket
    pub medium_len: usize,
    /// Tolerance for medium texts
    pub medium_percent: u32,
    /// Tolerance for anything longer
    pub long_percent: u32,
}

impl Default for ToleranceBands {
    fn default() -> Self {
        Self {
            short_len: 25,
            short_percent: 20,
            medium_len: 75,
            medium_percent: 15,
            long_percent: 10,
        }
    }
}

impl ToleranceBands {
    /// Tolerance in percent for a text of the given length.
    pub fn tolerance_for(&self, longest: usize) -> u32 {
        if longest <= self.short_len {
            self.short_percent
        } else if longest <= self.medium_len {
            self.medium_percent
        } else {
            self.long_percent
        }
    }
}

/// Decides whether two text runs are the same up to OCR noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher {
    bands: ToleranceBands,
}

impl FuzzyMatcher {
    /// Create a matcher with the default tolerance bands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with custom tolerance bands.
    pub fn with_bands(bands: ToleranceBands) -> Self {
        Self { bands }
    }

    /// Get the tolerance bands.
    pub fn bands(&self) -> &ToleranceBands {
        &self.bands
    }

    /// Compare two texts after removing whitespace and lower-casing them.
    pub fn are_equivalent(&self, a: &str, b: &str) -> bool {
        self.are_equivalent_normalized(&normalize(a), &normalize(b))
    }

    /// Compare two texts that are already [`normalize`]d.
    pub fn are_equivalent_normalized(&self, a: &str, b: &str) -> bool {
        let distance = strsim::osa_distance(a, b);
        if distance == 0 {
            return true;
        }

        // distance / longest * 100 <= tolerance, kept in integers
        let longest = a.chars().count().max(b.chars().count());
        distance * 100 <= self.bands.tolerance_for(longest) as usize * longest
    }
}

/// Remove all whitespace and lower-case the text.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two texts with the default tolerance bands.
pub fn are_equivalent(a: &str, b: &str) -> bool {
    FuzzyMatcher::new().are_equivalent(a, b)
}
