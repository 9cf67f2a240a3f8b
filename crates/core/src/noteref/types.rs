//! Data structures for note references and parsed documents.

use serde::{Deserialize, Serialize};

use crate::markdown_ast::SliceEnd;

/// Output shape a document is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    /// Source form: references stay exactly as written.
    #[default]
    Native,
    /// Plain markdown with embedded portals.
    Markdown,
    /// Markdown headed for HTML rendering; portal links point at `.html`.
    Html,
    /// Editor preview; portals carry note identity attributes.
    EnhancedPreview,
}

impl Destination {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "native" => Some(Self::Native),
            "markdown" | "md" => Some(Self::Markdown),
            "html" => Some(Self::Html),
            "preview" | "enhanced-preview" => Some(Self::EnhancedPreview),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::EnhancedPreview => "enhanced-preview",
        }
    }
}

/// End marker of an anchor range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorEnd {
    /// `#start,#end` / `#start:#end`
    Heading(String),
    /// `#start:#*`
    EndOfBody,
}

/// Heading-delimited slice of a target note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRange {
    pub start: String,
    /// `None` selects the section under `start`.
    pub end: Option<AnchorEnd>,
}

impl AnchorRange {
    pub fn slice_end(&self) -> SliceEnd<'_> {
        match &self.end {
            None => SliceEnd::NextSection,
            Some(AnchorEnd::Heading(h)) => SliceEnd::Heading(h),
            Some(AnchorEnd::EndOfBody) => SliceEnd::EndOfDocument,
        }
    }
}

/// A parsed `((ref: [[...]]))` occurrence. Carries no lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRefDescriptor {
    /// Exact source text of the reference, e.g. `((ref: [[foo.md]]))`.
    pub raw: String,
    /// Target fname, or the fixed prefix for wildcard targets.
    pub target: String,
    /// Vault named with a `vault:` prefix.
    pub vault: Option<String>,
    /// Target ended in `*`: match exactly one further hierarchy segment.
    pub wildcard: bool,
    pub anchor: Option<AnchorRange>,
}

/// Piece of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    NoteRef(NoteRefDescriptor),
}

/// Output of the parse phase: text interleaved with placeholder references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefDocument {
    pub segments: Vec<Segment>,
}

impl RefDocument {
    pub fn note_refs(&self) -> impl Iterator<Item = &NoteRefDescriptor> {
        self.segments.iter().filter_map(|s| match s {
            Segment::NoteRef(r) => Some(r),
            Segment::Text(_) => None,
        })
    }
}
