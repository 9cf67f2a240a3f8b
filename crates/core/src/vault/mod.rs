//! Vault discovery: walk vault folders and load their notes into a graph.

pub mod loader;
pub mod walker;

pub use loader::{VaultLoadError, VaultLoader, load_vaults};
pub use walker::{NoteFile, VaultWalker, VaultWalkerError};
