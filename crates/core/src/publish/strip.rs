use std::sync::LazyLock;

use regex::Regex;

/// Marker for lines that must never leave the local workspace.
pub const LOCAL_ONLY_MARKER: &str = "<!--LOCAL_ONLY_LINE-->";

static LOCAL_ONLY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\n]*<!--LOCAL_ONLY_LINE-->[^\n]*(?:\n|$)").unwrap());

/// Remove every line carrying [`LOCAL_ONLY_MARKER`].
pub fn strip_local_only_tags(body: &str) -> String {
    if !body.contains(LOCAL_ONLY_MARKER) {
        return body.to_string();
    }
    LOCAL_ONLY_LINE_RE.replace_all(body, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_marked_lines_only() {
        let body = "keep\nsecret <!--LOCAL_ONLY_LINE-->\nalso keep\n";
        assert_eq!(strip_local_only_tags(body), "keep\nalso keep\n");
    }

    #[test]
    fn marked_last_line_without_newline() {
        assert_eq!(strip_local_only_tags("a\n<!--LOCAL_ONLY_LINE--> b"), "a\n");
    }

    #[test]
    fn untouched_without_marker() {
        assert_eq!(strip_local_only_tags("plain\r\ntext"), "plain\r\ntext");
    }
}
