//! Build a [`NoteGraph`] from the note files of configured vaults.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

use super::walker::{NoteFile, VaultWalker, VaultWalkerError};
use crate::frontmatter::{self, FrontmatterParseError};
use crate::note::{CustomFields, Note, NoteGraph, Vault, default_note_id, link_hierarchy};

/// Frontmatter keys mapped onto [`Note`] fields instead of custom fields.
const STRUCTURAL_KEYS: [&str; 3] = ["id", "title", "stub"];

#[derive(Debug, Error)]
pub enum VaultLoadError {
    #[error("vault '{vault}': {source}")]
    Walk {
        vault: String,
        #[source]
        source: VaultWalkerError,
    },

    #[error("failed to read note {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterParseError,
    },

    #[error("note fname '{fname}' appears twice in vault '{vault}'")]
    DuplicateFname { vault: String, fname: String },

    #[error("note id '{0}' is used by more than one note")]
    DuplicateId(String),
}

/// Loads every vault into one graph.
#[derive(Debug, Clone)]
pub struct VaultLoader {
    vaults: Vec<Vault>,
    /// Folders skipped in every vault, relative to the vault root.
    excluded: Vec<PathBuf>,
}

impl VaultLoader {
    pub fn new(vaults: Vec<Vault>) -> Self {
        Self { vaults, excluded: Vec::new() }
    }

    pub fn with_exclusions(mut self, excluded: Vec<PathBuf>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Read all notes, link the hierarchy (adding roots and stubs) and check
    /// that ids are unique.
    pub fn load(&self) -> Result<NoteGraph, VaultLoadError> {
        let mut notes = Vec::new();
        for vault in &self.vaults {
            notes.extend(self.load_vault(vault)?);
        }

        let linked = link_hierarchy(&self.vaults, notes);
        let mut graph = NoteGraph::new(self.vaults.clone());
        for note in linked {
            let id = note.id.clone();
            if graph.insert(note).is_some() {
                return Err(VaultLoadError::DuplicateId(id));
            }
        }

        debug!(notes = graph.len(), vaults = self.vaults.len(), "loaded note graph");
        Ok(graph)
    }

    fn load_vault(&self, vault: &Vault) -> Result<Vec<Note>, VaultLoadError> {
        let walker = VaultWalker::with_exclusions(&vault.path, self.excluded.clone())
            .map_err(|source| VaultLoadError::Walk { vault: vault.name.clone(), source })?;
        let files = walker
            .walk()
            .map_err(|source| VaultLoadError::Walk { vault: vault.name.clone(), source })?;

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut notes = Vec::with_capacity(files.len());
        for file in files {
            if seen.insert(file.fname.clone(), file.relative_path.clone()).is_some() {
                return Err(VaultLoadError::DuplicateFname {
                    vault: vault.name.clone(),
                    fname: file.fname,
                });
            }
            notes.push(read_note(&self.vaults, vault, &file)?);
        }
        Ok(notes)
    }
}

/// Convenience wrapper for [`VaultLoader::load`] without exclusions.
pub fn load_vaults(vaults: &[Vault]) -> Result<NoteGraph, VaultLoadError> {
    VaultLoader::new(vaults.to_vec()).load()
}

fn read_note(vaults: &[Vault], vault: &Vault, file: &NoteFile) -> Result<Note, VaultLoadError> {
    let content = fs::read_to_string(&file.absolute_path)
        .map_err(|source| VaultLoadError::Read { path: file.absolute_path.clone(), source })?;
    let doc = frontmatter::parse(&content).map_err(|source| VaultLoadError::Frontmatter {
        path: file.absolute_path.clone(),
        source,
    })?;

    let fm = doc.frontmatter.unwrap_or_default();
    let id = fm
        .get_str("id")
        .map_or_else(|| default_note_id(vaults, &vault.name, &file.fname), str::to_string);

    let mut note = Note::new(id, &file.fname, &vault.name)
        .with_body(doc.body)
        .with_stub(fm.get_bool("stub").unwrap_or(false));
    if let Some(title) = fm.get_str("title") {
        note.title = title.to_string();
    }
    note.custom = custom_fields(fm.fields);
    Ok(note)
}

fn custom_fields(fields: HashMap<String, Value>) -> CustomFields {
    fields.into_iter().filter(|(k, _)| !STRUCTURAL_KEYS.contains(&k.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteLookup;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_identity_and_custom_fields() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("foo.md"),
            "---\nid: foo-id\ntitle: The Foo\npublished: false\n---\n# Foo\n",
        )
        .unwrap();
        fs::write(dir.path().join("foo.bar.md"), "plain body").unwrap();

        let graph = load_vaults(&[Vault::new("main", dir.path())]).unwrap();

        let foo = graph.note("foo-id").unwrap();
        assert_eq!(foo.title, "The Foo");
        assert_eq!(foo.body, "# Foo\n");
        assert_eq!(foo.custom_bool("published"), Some(false));
        assert!(!foo.custom.contains_key("id"));
        assert_eq!(foo.parent.as_deref(), Some("root"));

        let bar = graph.note("foo.bar").unwrap();
        assert_eq!(bar.title, "Bar");
        assert_eq!(bar.parent.as_deref(), Some("foo-id"));
        assert!(graph.note("root").unwrap().stub);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "---\nid: same\n---\n").unwrap();
        fs::write(dir.path().join("b.md"), "---\nid: same\n---\n").unwrap();

        let err = load_vaults(&[Vault::new("main", dir.path())]).unwrap_err();
        assert!(matches!(err, VaultLoadError::DuplicateId(id) if id == "same"));
    }

    #[test]
    fn missing_vault_directory() {
        let err = load_vaults(&[Vault::new("gone", "/nonexistent/vault")]).unwrap_err();
        assert!(matches!(err, VaultLoadError::Walk { vault, .. } if vault == "gone"));
    }
}
