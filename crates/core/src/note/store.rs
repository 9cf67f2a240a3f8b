//! Note persistence. The publish filter only ever asks a store to write a
//! note whose stub flag was cleared.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_yaml::Value;
use thiserror::Error;

use super::types::{Note, Vault};
use crate::frontmatter::{self, Frontmatter, ParsedDocument};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vault '{0}' is not known to this store")]
    UnknownVault(String),

    #[error("failed to write note {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

/// Persists notes on behalf of the engine.
pub trait NoteStore {
    fn write_note(&self, note: &Note) -> Result<(), StoreError>;
}

/// Store that keeps written notes in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    writes: Mutex<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every note written so far, in write order.
    pub fn writes(&self) -> Vec<Note> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl NoteStore for MemoryStore {
    fn write_note(&self, note: &Note) -> Result<(), StoreError> {
        let mut writes = self.writes.lock().map_err(|_| StoreError::Poisoned)?;
        writes.push(note.clone());
        Ok(())
    }
}

/// Store that writes notes as `<vault>/<fname>.md` with YAML frontmatter.
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    vaults: Vec<Vault>,
}

impl FsNoteStore {
    pub fn new(vaults: Vec<Vault>) -> Self {
        Self { vaults }
    }

    pub fn note_path(&self, note: &Note) -> Result<PathBuf, StoreError> {
        let vault = self
            .vaults
            .iter()
            .find(|v| v.name == note.vault)
            .ok_or_else(|| StoreError::UnknownVault(note.vault.clone()))?;
        Ok(vault.path.join(format!("{}.md", note.fname)))
    }
}

impl NoteStore for FsNoteStore {
    fn write_note(&self, note: &Note) -> Result<(), StoreError> {
        let path = self.note_path(note)?;
        let content = render_note_file(note);
        fs::write(&path, content).map_err(|e| StoreError::WriteError { path, source: e })
    }
}

/// Serialize a note the way it is stored on disk: identity fields first,
/// then custom frontmatter, then the body.
pub fn render_note_file(note: &Note) -> String {
    let mut fm = Frontmatter::default();
    fm.fields.insert("id".into(), Value::String(note.id.clone()));
    fm.fields.insert("title".into(), Value::String(note.title.clone()));
    if note.stub {
        fm.fields.insert("stub".into(), Value::Bool(true));
    }
    for (key, value) in &note.custom {
        fm.fields.entry(key.clone()).or_insert_with(|| value.clone());
    }

    let doc = ParsedDocument { frontmatter: Some(fm), body: note.body.clone() };
    let order = ["id".to_string(), "title".to_string(), "stub".to_string()];
    frontmatter::serialize_with_order(&doc, Some(&order[..]))
}
