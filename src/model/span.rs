//! Spans and bounding regions.

use serde::{Deserialize, Serialize};

/// A contiguous range of the document-wide content buffer.
///
/// Offsets and lengths count characters (Unicode scalar values) of
/// [`DocumentLayout::content`](super::DocumentLayout). This unit has to match
/// the string indexing of the service that produced the layout: a service
/// indexing UTF-16 code units reports different offsets once the content holds
/// characters outside the Basic Multilingual Plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start offset in the content buffer
    pub offset: usize,

    /// Number of characters covered
    pub length: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Offset one past the last covered character.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Check if the span covers the given offset.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.offset && offset < self.end()
    }

    /// Check if the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// The region of a page an element was found on.
///
/// Only the page number is used; polygons emitted by the analysis service
/// are ignored when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl BoundingRegion {
    /// Create a bounding region on a page.
    pub fn new(page_number: u32) -> Self {
        Self { page_number }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = Span::new(10, 5);
        assert_eq!(span.end(), 15);
        assert!(span.contains(10));
        assert!(span.contains(14));
        assert!(!span.contains(15));
        assert!(!span.is_empty());
        assert!(Span::new(3, 0).is_empty());
    }

    #[test]
    fn test_bounding_region_ignores_polygon() {
        let region: BoundingRegion =
            serde_json::from_str(r#"{"pageNumber": 3, "polygon": [0.1, 0.2, 0.3, 0.4]}"#).unwrap();
        assert_eq!(region.page_number, 3);
    }
}
