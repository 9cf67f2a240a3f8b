//! Read-only note graph snapshot and the lookup interface consumed by the
//! reference resolver and the publish filter.

use std::collections::HashMap;

use super::types::{HIERARCHY_DELIMITER, Note, Vault};

/// Lookup operations over a note graph.
///
/// Results that can contain several notes are returned in a deterministic
/// order: fname first, then the configured vault order.
pub trait NoteLookup {
    /// Vaults in configured iteration order.
    fn vaults(&self) -> &[Vault];

    fn note(&self, id: &str) -> Option<&Note>;

    /// Notes with exactly this fname, optionally restricted to one vault.
    fn notes_by_fname(&self, fname: &str, vault: Option<&str>) -> Vec<&Note>;

    /// Notes whose fname is `prefix` followed by exactly one more hierarchy
    /// segment (no further delimiter).
    fn notes_one_level_below(&self, prefix: &str, vault: Option<&str>) -> Vec<&Note>;
}

/// In-memory graph keyed by note id.
#[derive(Debug, Clone, Default)]
pub struct NoteGraph {
    vaults: Vec<Vault>,
    notes: HashMap<String, Note>,
}

impl NoteGraph {
    pub fn new(vaults: Vec<Vault>) -> Self {
        Self { vaults, notes: HashMap::new() }
    }

    pub fn from_notes(vaults: Vec<Vault>, notes: impl IntoIterator<Item = Note>) -> Self {
        let mut graph = Self::new(vaults);
        for note in notes {
            graph.insert(note);
        }
        graph
    }

    /// Insert a note, returning the previous note with the same id.
    pub fn insert(&mut self, note: Note) -> Option<Note> {
        self.notes.insert(note.id.clone(), note)
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn vault_rank(&self, name: &str) -> usize {
        self.vaults.iter().position(|v| v.name == name).unwrap_or(usize::MAX)
    }

    fn sorted<'a>(&self, mut notes: Vec<&'a Note>) -> Vec<&'a Note> {
        notes.sort_by(|a, b| {
            a.fname
                .cmp(&b.fname)
                .then_with(|| self.vault_rank(&a.vault).cmp(&self.vault_rank(&b.vault)))
                .then_with(|| a.id.cmp(&b.id))
        });
        notes
    }
}

impl NoteLookup for NoteGraph {
    fn vaults(&self) -> &[Vault] {
        &self.vaults
    }

    fn note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    fn notes_by_fname(&self, fname: &str, vault: Option<&str>) -> Vec<&Note> {
        let matches = self
            .notes
            .values()
            .filter(|n| n.fname == fname)
            .filter(|n| vault.is_none_or(|v| n.vault == v))
            .collect();
        self.sorted(matches)
    }

    fn notes_one_level_below(&self, prefix: &str, vault: Option<&str>) -> Vec<&Note> {
        let matches = self
            .notes
            .values()
            .filter(|n| {
                n.fname.strip_prefix(prefix).is_some_and(|rest| {
                    !rest.is_empty() && !rest.contains(HIERARCHY_DELIMITER)
                })
            })
            .filter(|n| vault.is_none_or(|v| n.vault == v))
            .collect();
        self.sorted(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> NoteGraph {
        NoteGraph::from_notes(
            vec![Vault::new("main", "/v/main"), Vault::new("other", "/v/other")],
            vec![
                Note::new("o-foo", "foo", "other"),
                Note::new("foo", "foo", "main"),
                Note::new("foo.two", "foo.two", "main"),
                Note::new("foo.one", "foo.one", "main"),
                Note::new("foo.one.deep", "foo.one.deep", "main"),
                Note::new("o-foo.three", "foo.three", "other"),
            ],
        )
    }

    #[test]
    fn fname_lookup_follows_vault_order() {
        let g = graph();
        let ids: Vec<_> = g.notes_by_fname("foo", None).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["foo", "o-foo"]);

        let ids: Vec<_> =
            g.notes_by_fname("foo", Some("other")).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["o-foo"]);
    }

    #[test]
    fn one_level_below_excludes_deeper_notes() {
        let g = graph();
        let fnames: Vec<_> =
            g.notes_one_level_below("foo.", None).iter().map(|n| n.fname.as_str()).collect();
        assert_eq!(fnames, vec!["foo.one", "foo.three", "foo.two"]);
    }

    #[test]
    fn one_level_below_respects_vault() {
        let g = graph();
        let fnames: Vec<_> = g
            .notes_one_level_below("foo.", Some("other"))
            .iter()
            .map(|n| n.fname.as_str())
            .collect();
        assert_eq!(fnames, vec!["foo.three"]);
    }
}
