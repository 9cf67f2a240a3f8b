use std::ops::Range;

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

use crate::markdown_ast::types::*;

/// Find all headings in the document, with byte offsets.
pub fn find_headings(input: &str) -> Vec<HeadingSpan> {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, input, &options);

    let mut headings = Vec::new();
    for node in root.descendants() {
        let data = node.data.borrow();
        if let NodeValue::Heading(ref heading) = data.value {
            headings.push(HeadingSpan {
                title: collect_text(node),
                level: heading.level,
                start: line_start_offset(input, data.sourcepos.start.line),
                content_start: line_end_offset(input, data.sourcepos.end.line),
            });
        }
    }
    headings
}

/// Slice the document from the heading matching `start` up to `end`.
///
/// Headings match on trimmed, case-insensitive title or on their slug, so
/// both `#Getting Started` and `#getting-started` find `## Getting Started`.
/// Returns `None` when a named heading does not exist.
pub fn slice_by_headings<'a>(input: &'a str, start: &str, end: SliceEnd<'_>) -> Option<&'a str> {
    let headings = find_headings(input);
    let (idx, first) =
        headings.iter().enumerate().find(|(_, h)| heading_matches(&h.title, start))?;
    let later = &headings[idx + 1..];

    let end_offset = match end {
        SliceEnd::NextSection => {
            later.iter().find(|h| h.level <= first.level).map_or(input.len(), |h| h.start)
        }
        SliceEnd::Heading(title) => later.iter().find(|h| heading_matches(&h.title, title))?.start,
        SliceEnd::EndOfDocument => input.len(),
    };

    Some(&input[first.start..end_offset])
}

/// Byte ranges covered by code blocks and inline code spans, delimiters
/// included.
pub fn opaque_ranges(input: &str) -> OpaqueRanges {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, input, &options);

    let ranges = root
        .descendants()
        .filter_map(|node| {
            let data = node.data.borrow();
            let pos = data.sourcepos;
            match data.value {
                NodeValue::CodeBlock(_) => Some(
                    line_start_offset(input, pos.start.line)..line_end_offset(input, pos.end.line),
                ),
                NodeValue::Code(_) if pos.start.line > 0 => {
                    let start = line_start_offset(input, pos.start.line) + pos.start.column.saturating_sub(1);
                    let end = line_start_offset(input, pos.end.line) + pos.end.column;
                    let span = start.min(input.len())..end.min(input.len());
                    Some(widen_over_backticks(input.as_bytes(), span))
                }
                _ => None,
            }
        })
        .collect();
    OpaqueRanges::new(ranges)
}

/// Anchor slug for a heading title: lowercase alphanumerics joined by `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }
    slug
}

// --- Internal helpers ---

fn heading_matches(heading_title: &str, anchor: &str) -> bool {
    let h = heading_title.trim();
    let a = anchor.trim();
    h.eq_ignore_ascii_case(a) || slugify(h) == slugify(a)
}

/// Code span positions cover the content only; extend them over the
/// surrounding backtick runs (and the padding space CommonMark strips).
fn widen_over_backticks(bytes: &[u8], span: Range<usize>) -> Range<usize> {
    let mut start = span.start;
    let padded = start > 0 && bytes[start - 1] == b' ';
    if padded && start > 1 && bytes[start - 2] == b'`' {
        start -= 1;
    }
    while start > 0 && bytes[start - 1] == b'`' {
        start -= 1;
    }

    let mut end = span.end;
    let padded = end < bytes.len() && bytes[end] == b' ';
    if padded && bytes.get(end + 1) == Some(&b'`') {
        end += 1;
    }
    while end < bytes.len() && bytes[end] == b'`' {
        end += 1;
    }
    start..end
}

/// Get the byte offset at the start of a line (1-based)
fn line_start_offset(input: &str, line_num: usize) -> usize {
    if line_num <= 1 {
        return 0;
    }
    input
        .match_indices('\n')
        .nth(line_num - 2)
        .map_or(input.len(), |(i, _)| i + 1)
}

/// Get the byte offset at the end of a line (after newline if present)
fn line_end_offset(input: &str, line_num: usize) -> usize {
    input
        .match_indices('\n')
        .nth(line_num.saturating_sub(1))
        .map_or(input.len(), |(i, _)| i + 1)
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    // GFM extensions so tables and task lists don't swallow code fences
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.parse.smart = false;
    options
}

fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants() {
        match child.data.borrow().value {
            NodeValue::Text(ref t) => text.push_str(t),
            NodeValue::Code(ref c) => text.push_str(&c.literal),
            _ => {}
        }
    }
    text
}
