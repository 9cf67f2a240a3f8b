//! Vault directory walker.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::noteref::NOTE_EXTENSION;

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk vault directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// A note file found in a vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    pub absolute_path: PathBuf,
    /// Path relative to the vault root.
    pub relative_path: PathBuf,
    /// File name without the `.md` extension.
    pub fname: String,
}

/// Finds note files under a vault root.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
    /// Relative to `root`.
    excluded_folders: Vec<PathBuf>,
}

impl VaultWalker {
    pub fn new(root: &Path) -> Result<Self, VaultWalkerError> {
        Self::with_exclusions(root, Vec::new())
    }

    /// Walker that skips the given folders. Absolute paths inside the vault
    /// are made relative to it.
    pub fn with_exclusions(
        root: &Path,
        excluded_folders: Vec<PathBuf>,
    ) -> Result<Self, VaultWalkerError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultWalkerError::MissingRoot(root.display().to_string()))?;

        let excluded_folders = excluded_folders
            .into_iter()
            .map(|p| match p.strip_prefix(&root) {
                Ok(rel) if p.is_absolute() => rel.to_path_buf(),
                _ => p,
            })
            .collect();

        Ok(Self { root, excluded_folders })
    }

    /// All note files, sorted by relative path.
    pub fn walk(&self) -> Result<Vec<NoteFile>, VaultWalkerError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e))
        {
            let entry = entry
                .map_err(|e| VaultWalkerError::WalkError(self.root.display().to_string(), e))?;

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(fname) = note_fname(path) else {
                continue;
            };

            files.push(NoteFile {
                absolute_path: path.to_path_buf(),
                relative_path: path.strip_prefix(&self.root).unwrap_or(path).to_path_buf(),
                fname,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return true;
        }
        if matches!(name.as_ref(), "node_modules" | "target" | "__pycache__" | "venv") {
            return true;
        }

        entry
            .path()
            .strip_prefix(&self.root)
            .is_ok_and(|rel| self.excluded_folders.iter().any(|ex| rel.starts_with(ex)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn note_fname(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(NOTE_EXTENSION)?;
    (!stem.is_empty()).then(|| stem.to_string())
}
