//! Frontmatter parsing from note files.

use super::types::{Frontmatter, ParsedDocument};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// id: foo
/// title: Foo
/// ---
/// # Document content
/// ```
/// A document without an opening delimiter, or whose block is never
/// closed, is returned as body only.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let trimmed = content.trim_start();
    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    };
    let after_open = strip_newline(after_open);

    let Some((yaml_end, body_start)) = find_closing_delimiter(after_open) else {
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    };

    let yaml = after_open[..yaml_end].trim();
    let frontmatter: Frontmatter =
        if yaml.is_empty() { Frontmatter::default() } else { serde_yaml::from_str(yaml)? };

    let body = strip_newline(&after_open[body_start..]).to_string();
    Ok(ParsedDocument { frontmatter: Some(frontmatter), body })
}

fn strip_newline(s: &str) -> &str {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n')).unwrap_or(s)
}

/// Byte offsets of the closing `---` line: where the YAML ends and where the
/// content after the delimiter starts.
fn find_closing_delimiter(content: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == "---" {
            let delimiter_end = offset + line.trim_end_matches(['\r', '\n']).len();
            return Some((offset, delimiter_end));
        }
        offset += line.len();
    }
    None
}
