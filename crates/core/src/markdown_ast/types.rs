use std::ops::Range;

/// A heading found in a document, with byte offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSpan {
    /// The heading text content
    pub title: String,
    /// The heading level (1-6)
    pub level: u8,
    /// Byte offset of the start of the heading line
    pub start: usize,
    /// Byte offset just past the heading line (after newline)
    pub content_start: usize,
}

/// Where a heading-delimited slice stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceEnd<'a> {
    /// Before the next heading of the same or a higher level
    NextSection,
    /// Before the first later heading matching this title
    Heading(&'a str),
    /// At the end of the document
    EndOfDocument,
}

/// Byte ranges of a document that inline syntax must not look into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpaqueRanges {
    ranges: Vec<Range<usize>>,
}

impl OpaqueRanges {
    pub fn new(mut ranges: Vec<Range<usize>>) -> Self {
        ranges.sort_by_key(|r| r.start);
        Self { ranges }
    }

    /// True if `offset` falls inside any range.
    pub fn contains(&self, offset: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(&offset))
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}
