//! Builds parent/child links from fnames.
//!
//! Every vault gets a `root` note. A note's parent is its nearest ancestor
//! fname in the same vault; missing intermediate ancestors are created as
//! stubs so that the tree has no gaps.

use std::collections::{BTreeMap, HashMap};

use super::types::{Note, ROOT_FNAME, Vault, parent_fname};

/// Id assigned to a note that has none: the bare fname in the first vault,
/// `<vault>-<fname>` everywhere else.
pub fn default_note_id(vaults: &[Vault], vault: &str, fname: &str) -> String {
    match vaults.first() {
        Some(first) if first.name == vault => fname.to_string(),
        _ => format!("{vault}-{fname}"),
    }
}

/// Link notes into per-vault trees, creating roots and stubs as needed.
///
/// Parent and children fields on the input are overwritten. Children are
/// ordered by fname.
pub fn link_hierarchy(vaults: &[Vault], notes: Vec<Note>) -> Vec<Note> {
    // (vault, fname) -> note
    let mut by_key: BTreeMap<(String, String), Note> = notes
        .into_iter()
        .map(|mut n| {
            n.parent = None;
            n.children.clear();
            ((n.vault.clone(), n.fname.clone()), n)
        })
        .collect();

    for vault in vaults {
        let key = (vault.name.clone(), ROOT_FNAME.to_string());
        by_key.entry(key).or_insert_with(|| {
            Note::new(default_note_id(vaults, &vault.name, ROOT_FNAME), ROOT_FNAME, &vault.name)
                .with_stub(true)
        });
    }

    let keys: Vec<_> = by_key.keys().cloned().collect();
    for (vault, fname) in keys {
        let mut current = fname;
        while let Some(parent) = parent_fname(&current) {
            let parent_key = (vault.clone(), parent.to_string());
            if by_key.contains_key(&parent_key) {
                break;
            }
            let stub =
                Note::new(default_note_id(vaults, &vault, parent), parent, &vault).with_stub(true);
            by_key.insert(parent_key, stub);
            current = parent.to_string();
        }
    }

    let ids: HashMap<(String, String), String> =
        by_key.iter().map(|(k, n)| (k.clone(), n.id.clone())).collect();

    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for ((vault, fname), note) in by_key.iter_mut() {
        if fname == ROOT_FNAME {
            continue;
        }
        let parent_name = parent_fname(fname).unwrap_or(ROOT_FNAME);
        if let Some(parent_id) = ids.get(&(vault.clone(), parent_name.to_string())) {
            note.parent = Some(parent_id.clone());
            // BTreeMap iteration keeps fname order within a vault
            children.entry(parent_id.clone()).or_default().push(note.id.clone());
        }
    }

    by_key
        .into_values()
        .map(|mut note| {
            if let Some(kids) = children.remove(&note.id) {
                note.children = kids;
            }
            note
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(notes: &'a [Note], fname: &str) -> &'a Note {
        notes.iter().find(|n| n.fname == fname).unwrap()
    }

    #[test]
    fn creates_root_and_missing_ancestors() {
        let vaults = vec![Vault::new("main", "/v")];
        let notes = link_hierarchy(&vaults, vec![Note::new("c", "a.b.c", "main")]);

        let root = find(&notes, "root");
        assert!(root.stub);
        assert_eq!(root.parent, None);
        assert_eq!(root.children, vec!["a"]);

        let a = find(&notes, "a");
        assert!(a.stub);
        assert_eq!(a.parent.as_deref(), Some("root"));
        assert_eq!(a.children, vec!["a.b"]);

        let c = find(&notes, "a.b.c");
        assert!(!c.stub);
        assert_eq!(c.parent.as_deref(), Some("a.b"));
    }

    #[test]
    fn children_sorted_by_fname() {
        let vaults = vec![Vault::new("main", "/v")];
        let notes = link_hierarchy(
            &vaults,
            vec![
                Note::new("z", "foo.zeta", "main"),
                Note::new("f", "foo", "main"),
                Note::new("a", "foo.alpha", "main"),
            ],
        );
        assert_eq!(find(&notes, "foo").children, vec!["a", "z"]);
    }

    #[test]
    fn vaults_get_separate_trees() {
        let vaults = vec![Vault::new("main", "/m"), Vault::new("other", "/o")];
        let notes = link_hierarchy(
            &vaults,
            vec![Note::new("foo", "foo", "main"), Note::new("other-foo", "foo", "other")],
        );
        let other_root = notes.iter().find(|n| n.id == "other-root").unwrap();
        assert_eq!(other_root.children, vec!["other-foo"]);
        let main_root = notes.iter().find(|n| n.id == "root").unwrap();
        assert_eq!(main_root.children, vec!["foo"]);
    }
}
