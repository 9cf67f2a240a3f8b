//! Compile phase: replace reference placeholders for a render destination.

use tracing::{debug, warn};

use crate::markdown_ast::slice_by_headings;
use crate::note::{Note, NoteLookup};
use crate::noteref::parser::parse;
use crate::noteref::portal::{render_link, render_portal};
use crate::noteref::resolve::{Resolution, resolve};
use crate::noteref::types::{Destination, NoteRefDescriptor, RefDocument, Segment};

/// Maximum nesting of embedded notes before falling back to links.
pub const DEFAULT_MAX_REF_DEPTH: usize = 5;

#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub dest: Destination,
    /// Vault of the document being compiled.
    pub vault: Option<String>,
    pub max_depth: usize,
}

impl CompileOptions {
    pub fn new(dest: Destination) -> Self {
        Self { dest, vault: None, max_depth: DEFAULT_MAX_REF_DEPTH }
    }

    pub fn with_vault(mut self, vault: impl Into<String>) -> Self {
        self.vault = Some(vault.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Per-expansion recursion state: notes currently being expanded and the
/// remaining nesting budget.
#[derive(Debug, Clone)]
pub struct RefState {
    stack: Vec<String>,
    depth_left: usize,
}

impl RefState {
    pub fn new(max_depth: usize) -> Self {
        Self { stack: Vec::new(), depth_left: max_depth }
    }

    pub fn is_expanding(&self, id: &str) -> bool {
        self.stack.iter().any(|s| s == id)
    }

    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    fn enter(&mut self, id: &str) {
        self.stack.push(id.to_string());
        self.depth_left = self.depth_left.saturating_sub(1);
    }

    fn leave(&mut self) {
        self.stack.pop();
        self.depth_left += 1;
    }
}

/// Embeds referenced notes into documents. Reads the graph only.
pub struct NoteRefCompiler<'a> {
    lookup: &'a dyn NoteLookup,
    options: CompileOptions,
}

impl<'a> NoteRefCompiler<'a> {
    pub fn new(lookup: &'a dyn NoteLookup, options: CompileOptions) -> Self {
        Self { lookup, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Parse and compile a free-standing document.
    pub fn process(&self, input: &str) -> String {
        self.compile(&parse(input))
    }

    /// Compile the body of `note`. The note itself counts as being expanded,
    /// so a reference back to it renders as a link.
    pub fn process_note(&self, note: &Note) -> String {
        let mut state = RefState::new(self.options.max_depth);
        state.stack.push(note.id.clone());
        self.compile_with(&parse(&note.body), &mut state, Some(&note.vault))
    }

    pub fn compile(&self, doc: &RefDocument) -> String {
        let mut state = RefState::new(self.options.max_depth);
        self.compile_with(doc, &mut state, self.options.vault.as_deref())
    }

    pub fn compile_with(
        &self,
        doc: &RefDocument,
        state: &mut RefState,
        vault: Option<&str>,
    ) -> String {
        let mut out = String::new();
        for segment in &doc.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::NoteRef(desc) => out.push_str(&self.render_ref(desc, state, vault)),
            }
        }
        out
    }

    fn render_ref(
        &self,
        desc: &NoteRefDescriptor,
        state: &mut RefState,
        vault: Option<&str>,
    ) -> String {
        if self.options.dest == Destination::Native {
            return desc.raw.clone();
        }

        match resolve(self.lookup, desc) {
            Resolution::Broken => {
                warn!(reference = %desc.raw, "note reference target not found");
                desc.raw.clone()
            }
            Resolution::Notes(notes) => notes
                .into_iter()
                .map(|note| self.embed(desc, note, state, vault))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn embed(
        &self,
        desc: &NoteRefDescriptor,
        note: &Note,
        state: &mut RefState,
        vault: Option<&str>,
    ) -> String {
        let dest = self.options.dest;

        if state.is_expanding(&note.id) {
            debug!(note = %note.id, stack = ?state.stack, "reference cycle; rendering link");
            return render_link(dest, note);
        }
        if state.depth_left == 0 {
            warn!(
                note = %note.id,
                max_depth = self.options.max_depth,
                "too many nested note references; rendering link"
            );
            return render_link(dest, note);
        }

        let body = match &desc.anchor {
            Some(anchor) => slice_by_headings(&note.body, &anchor.start, anchor.slice_end())
                .unwrap_or_else(|| {
                    warn!(
                        reference = %desc.raw,
                        note = %note.id,
                        "anchor heading not found; embedding full body"
                    );
                    note.body.as_str()
                }),
            None => note.body.as_str(),
        };

        state.enter(&note.id);
        let content = self.compile_with(&parse(body), state, Some(&note.vault));
        state.leave();

        render_portal(dest, note, desc.anchor.as_ref(), vault, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{NoteGraph, Vault};

    fn graph(notes: Vec<Note>) -> NoteGraph {
        NoteGraph::from_notes(vec![Vault::new("main", "/m")], notes)
    }

    #[test]
    fn state_tracks_stack_and_depth() {
        let mut state = RefState::new(2);
        state.enter("a");
        assert!(state.is_expanding("a"));
        assert_eq!(state.depth_left, 1);
        state.leave();
        assert!(!state.is_expanding("a"));
        assert_eq!(state.depth_left, 2);
    }

    #[test]
    fn depth_limit_renders_link() {
        let g = graph(vec![
            Note::new("a", "a", "main").with_body("A ((ref: [[b]]))"),
            Note::new("b", "b", "main").with_title("Bee").with_body("B body"),
        ]);
        let compiler =
            NoteRefCompiler::new(&g, CompileOptions::new(Destination::Markdown).with_max_depth(1));
        let out = compiler.process("((ref: [[a]]))");
        assert!(out.contains("A [Bee](b.md)"));
        assert!(!out.contains("B body"));
    }

    #[test]
    fn process_note_treats_self_reference_as_cycle() {
        let note = Note::new("self", "self", "main").with_title("Self").with_body("x ((ref: [[self]]))");
        let g = graph(vec![note.clone()]);
        let compiler = NoteRefCompiler::new(&g, CompileOptions::new(Destination::Html));
        assert_eq!(compiler.process_note(&note), "x [Self](self.html)");
    }
}
