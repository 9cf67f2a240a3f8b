//! Resolve reference descriptors against the note graph.

use tracing::debug;

use crate::note::{Note, NoteLookup};
use crate::noteref::types::NoteRefDescriptor;

/// Outcome of resolving a descriptor. Resolution never fails: a target that
/// matches nothing is reported as `Broken`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Notes(Vec<&'a Note>),
    Broken,
}

impl Resolution<'_> {
    pub fn is_broken(&self) -> bool {
        matches!(self, Self::Broken)
    }
}

/// Resolve a descriptor.
///
/// - wildcard targets yield every note one segment below the prefix, ordered
///   by fname then vault order
/// - plain targets match by fname (within the hinted vault, if any), falling
///   back to an id match; when several vaults hold the fname, the first vault
///   in configured order wins
pub fn resolve<'a>(lookup: &'a dyn NoteLookup, desc: &NoteRefDescriptor) -> Resolution<'a> {
    let vault = desc.vault.as_deref();

    if desc.wildcard {
        let notes = lookup.notes_one_level_below(&desc.target, vault);
        return if notes.is_empty() { Resolution::Broken } else { Resolution::Notes(notes) };
    }

    if desc.target.is_empty() {
        return Resolution::Broken;
    }

    let matches = lookup.notes_by_fname(&desc.target, vault);
    if let Some(first) = matches.first() {
        if matches.len() > 1 {
            debug!(
                target_fname = %desc.target,
                candidates = matches.len(),
                picked_vault = %first.vault,
                "ambiguous note reference; using first vault"
            );
        }
        return Resolution::Notes(vec![*first]);
    }

    match lookup.note(&desc.target) {
        Some(note) if vault.is_none_or(|v| note.vault == v) => Resolution::Notes(vec![note]),
        _ => Resolution::Broken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{NoteGraph, Vault};
    use crate::noteref::parser::parse;

    fn graph() -> NoteGraph {
        NoteGraph::from_notes(
            vec![Vault::new("main", "/m"), Vault::new("other", "/o")],
            vec![
                Note::new("foo", "foo", "main"),
                Note::new("other-foo", "foo", "other"),
                Note::new("j2", "journal.2024", "main"),
                Note::new("j1", "journal.2023", "main"),
                Note::new("j1a", "journal.2023.01", "main"),
                Note::new("xyz", "bar", "other"),
            ],
        )
    }

    fn desc(input: &str) -> NoteRefDescriptor {
        parse(input).note_refs().next().cloned().unwrap()
    }

    fn ids(res: Resolution<'_>) -> Vec<String> {
        match res {
            Resolution::Notes(notes) => notes.iter().map(|n| n.id.clone()).collect(),
            Resolution::Broken => vec![],
        }
    }

    #[test]
    fn ambiguous_fname_picks_first_vault() {
        let g = graph();
        assert_eq!(ids(resolve(&g, &desc("((ref: [[foo]]))"))), vec!["foo"]);
    }

    #[test]
    fn vault_hint_selects_vault() {
        let g = graph();
        assert_eq!(ids(resolve(&g, &desc("((ref: [[other:foo]]))"))), vec!["other-foo"]);
    }

    #[test]
    fn wildcard_matches_one_level_sorted() {
        let g = graph();
        let first = ids(resolve(&g, &desc("((ref: [[journal.*]]))")));
        assert_eq!(first, vec!["j1", "j2"]);
        assert_eq!(ids(resolve(&g, &desc("((ref: [[journal.*]]))"))), first);
    }

    #[test]
    fn falls_back_to_id() {
        let g = graph();
        assert_eq!(ids(resolve(&g, &desc("((ref: [[xyz]]))"))), vec!["xyz"]);
        assert!(resolve(&g, &desc("((ref: [[main:xyz]]))")).is_broken());
    }

    #[test]
    fn unknown_target_is_broken() {
        let g = graph();
        assert!(resolve(&g, &desc("((ref: [[missing]]))")).is_broken());
        assert!(resolve(&g, &desc("((ref: [[missing.*]]))")).is_broken());
    }
}
