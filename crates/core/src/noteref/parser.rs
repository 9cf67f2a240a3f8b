//! Parse phase: split a document into text and note reference placeholders.
//!
//! Parsing never fails and never consults the note graph.

use std::sync::LazyLock;

use regex::Regex;

use crate::markdown_ast::opaque_ranges;
use crate::noteref::types::{AnchorEnd, AnchorRange, NoteRefDescriptor, RefDocument, Segment};

/// Extension stripped from reference targets.
pub const NOTE_EXTENSION: &str = ".md";

static NOTE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    // ((ref: [[target]])) with an optional anchor after the closing brackets
    // Captures:
    // 1: everything inside [[ ]]
    // 2: trailing anchor (if present)
    Regex::new(r"\(\(ref:\s*\[\[([^\]]+)\]\](#[^\s)]*)?\s*\)\)").unwrap()
});

/// Parse a document into segments. References inside code spans and code
/// blocks are left as text.
pub fn parse(input: &str) -> RefDocument {
    let opaque = opaque_ranges(input);
    let mut segments = Vec::new();
    let mut last = 0;

    for cap in NOTE_REF_RE.captures_iter(input) {
        let Some(full) = cap.get(0) else { continue };
        if opaque.contains(full.start()) {
            continue;
        }
        if full.start() > last {
            segments.push(Segment::Text(input[last..full.start()].to_string()));
        }
        let inner = cap.get(1).map_or("", |m| m.as_str());
        let trailing_anchor = cap.get(2).map(|m| m.as_str());
        segments.push(Segment::NoteRef(parse_descriptor(full.as_str(), inner, trailing_anchor)));
        last = full.end();
    }

    if last < input.len() {
        segments.push(Segment::Text(input[last..].to_string()));
    }
    RefDocument { segments }
}

/// Build a descriptor from the text between `[[` and `]]`.
///
/// `inner` has the shape `vault:path*#start,#end` where every part except
/// the path is optional. An anchor written inside the brackets wins over one
/// written after them.
pub fn parse_descriptor(raw: &str, inner: &str, trailing_anchor: Option<&str>) -> NoteRefDescriptor {
    let inner = inner.trim();
    let (target, inner_anchor) = match inner.split_once('#') {
        Some((path, anchor)) => (path.trim(), Some(anchor)),
        None => (inner, None),
    };
    let anchor = inner_anchor
        .or_else(|| trailing_anchor.and_then(|a| a.strip_prefix('#')))
        .and_then(parse_anchor);

    let (vault, target) = match target.split_once(':') {
        Some((vault, path)) if !vault.trim().is_empty() => {
            (Some(vault.trim().to_string()), path.trim())
        }
        _ => (None, target),
    };

    let target = target.strip_suffix(NOTE_EXTENSION).unwrap_or(target);
    let (target, wildcard) = match target.strip_suffix('*') {
        Some(prefix) => (prefix, true),
        None => (target, false),
    };

    NoteRefDescriptor { raw: raw.to_string(), target: target.to_string(), vault, wildcard, anchor }
}

/// Parse the anchor text following the first `#`: `start`, `start,#end`,
/// `start:#end` or `start:#*`.
fn parse_anchor(spec: &str) -> Option<AnchorRange> {
    let spec = spec.trim();
    let separator = spec
        .match_indices([',', ':'])
        .map(|(i, _)| i)
        .find(|&i| spec[i + 1..].starts_with('#'));

    let (start, end) = match separator {
        Some(i) => {
            let end = spec[i + 2..].trim();
            let end = match end {
                "" => None,
                "*" => Some(AnchorEnd::EndOfBody),
                heading => Some(AnchorEnd::Heading(heading.to_string())),
            };
            (spec[..i].trim(), end)
        }
        None => (spec, None),
    };

    if start.is_empty() {
        return None;
    }
    Some(AnchorRange { start: start.to_string(), end })
}
