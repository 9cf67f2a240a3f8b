//! Note graph model: notes, vaults, hierarchy linking, lookup and
//! persistence interfaces.

pub mod graph;
pub mod hierarchy;
pub mod store;
pub mod types;

pub use graph::{NoteGraph, NoteLookup};
pub use hierarchy::{default_note_id, link_hierarchy};
pub use store::{FsNoteStore, MemoryStore, NoteStore, StoreError, render_note_file};
pub use types::{
    CustomFields, HIERARCHY_DELIMITER, Note, ROOT_FNAME, Vault, domain_name, parent_fname,
    title_from_fname,
};
