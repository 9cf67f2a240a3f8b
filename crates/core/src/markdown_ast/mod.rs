//! Markdown structure queries backed by comrak: heading slices for anchor
//! ranges and code regions that reference syntax must ignore.

pub mod comrak;
pub mod types;

pub use comrak::{find_headings, opaque_ranges, slice_by_headings, slugify};
pub use types::{HeadingSpan, OpaqueRanges, SliceEnd};
