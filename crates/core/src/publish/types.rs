//! Publish filter results and errors.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::note::{Note, NoteGraph, Vault};

/// Fatal publish errors. Any of these aborts the whole pass.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(
        "{count} notes found for domain '{domain}'; set duplicateNoteBehavior to pick a vault"
    )]
    AmbiguousDomain { domain: String, count: usize },
}

/// Recoverable problems reported alongside a successful pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishWarning {
    #[error("no publishable note for domain '{domain}'; skipped")]
    MissingDomain { domain: String },

    #[error("domain '{domain}' has no note in pinned vault '{vault}'; skipped")]
    PinnedVaultMissing { domain: String, vault: String },

    #[error("failed to persist cleared stub '{id}': {message}")]
    StubPersistFailed { id: String, message: String },
}

/// Filtered notes of a single domain.
#[derive(Debug, Clone)]
pub struct HierarchyOutcome {
    /// Kept notes keyed by id, domain note included.
    pub notes: BTreeMap<String, Note>,
    /// The normalized domain note, with its children limited to survivors.
    pub domain: Note,
}

/// Result of filtering every configured domain.
#[derive(Debug, Clone, Default)]
pub struct PublishOutput {
    pub notes: BTreeMap<String, Note>,
    /// Navigation order for the site.
    pub domains: Vec<Note>,
    pub warnings: Vec<PublishWarning>,
}

impl PublishOutput {
    /// Graph holding only the published notes. Compiling site pages against
    /// it keeps unpublished notes out of embedded portals.
    pub fn published_graph(&self, vaults: &[Vault]) -> NoteGraph {
        NoteGraph::from_notes(vaults.to_vec(), self.notes.values().cloned())
    }
}
