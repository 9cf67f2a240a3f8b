//! Destination-specific rendering of embedded notes.

use crate::markdown_ast::slugify;
use crate::note::Note;
use crate::noteref::types::{AnchorRange, Destination};

/// Wrap compiled content of `note` in a portal container.
///
/// `context_vault` is the vault of the document doing the embedding; a
/// note from another vault gets its vault shown next to the title.
pub fn render_portal(
    dest: Destination,
    note: &Note,
    anchor: Option<&AnchorRange>,
    context_vault: Option<&str>,
    content: &str,
) -> String {
    let attrs = match dest {
        Destination::EnhancedPreview => format!(
            " data-note-id=\"{}\" data-vault=\"{}\"",
            escape_html(&note.id),
            escape_html(&note.vault)
        ),
        _ => String::new(),
    };
    let vault_label = match context_vault {
        Some(v) if v != note.vault => {
            format!(" <span class=\"portal-vault\">{}</span>", escape_html(&note.vault))
        }
        _ => String::new(),
    };

    format!(
        "<div class=\"portal-container\"{attrs}>\n\
         <div class=\"portal-head\">\n\
         <div class=\"portal-backlink\">\n\
         <div class=\"portal-title\">From <span class=\"portal-text-title\">{title}</span>{vault_label}</div>\n\
         <a href=\"{href}\" class=\"portal-arrow\">Go to text <span class=\"right-arrow\">→</span></a>\n\
         </div>\n\
         </div>\n\
         <div id=\"portal-parent-anchor\" class=\"portal-parent\" markdown=\"1\">\n\
         <div class=\"portal-parent-fader-top\"></div>\n\
         <div class=\"portal-parent-fader-bottom\"></div>\n\
         \n\
         {content}\n\
         \n\
         </div>\n\
         </div>",
        title = escape_html(&note.title),
        href = note_href(dest, note, anchor),
        content = content.trim_end_matches('\n'),
    )
}

/// Plain navigable link used instead of a portal when a note cannot be
/// expanded (cycle or depth limit).
pub fn render_link(dest: Destination, note: &Note) -> String {
    format!("[{}]({})", note.title, note_href(dest, note, None))
}

fn note_href(dest: Destination, note: &Note, anchor: Option<&AnchorRange>) -> String {
    let ext = match dest {
        Destination::Html => "html",
        _ => "md",
    };
    match anchor {
        Some(a) => format!("{}.{ext}#{}", note.fname, slugify(&a.start)),
        None => format!("{}.{ext}", note.fname),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_targets_destination_extension() {
        let note = Note::new("n", "foo.bar", "main").with_title("Bar");
        assert_eq!(render_link(Destination::Markdown, &note), "[Bar](foo.bar.md)");
        assert_eq!(render_link(Destination::Html, &note), "[Bar](foo.bar.html)");
    }

    #[test]
    fn portal_carries_anchor_and_preview_attributes() {
        let note = Note::new("n1", "foo", "main").with_title("Foo & Co");
        let anchor = AnchorRange { start: "Getting Started".into(), end: None };
        let out =
            render_portal(Destination::EnhancedPreview, &note, Some(&anchor), Some("main"), "body\n\n");
        assert!(out.starts_with("<div class=\"portal-container\" data-note-id=\"n1\" data-vault=\"main\">"));
        assert!(out.contains("href=\"foo.md#getting-started\""));
        assert!(out.contains("Foo &amp; Co"));
        assert!(out.contains("\n\nbody\n\n</div>"));
        assert!(!out.contains("portal-vault"));
    }

    #[test]
    fn cross_vault_portal_shows_vault() {
        let note = Note::new("n1", "foo", "other");
        let out = render_portal(Destination::Html, &note, None, Some("main"), "x");
        assert!(out.contains("<span class=\"portal-vault\">other</span>"));
    }
}
