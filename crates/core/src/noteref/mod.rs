//! Note reference embedding.
//!
//! `((ref: [[target]]))` transcludes another note (or a heading-delimited
//! slice of it) when a document is compiled. Processing is two-phase:
//! [`parse`] turns a document into text and placeholder segments without
//! touching the graph, and [`NoteRefCompiler`] replaces the placeholders for
//! one [`Destination`]. Compiling to [`Destination::Native`] reproduces the
//! source text exactly.

pub mod compiler;
pub mod parser;
pub mod portal;
pub mod resolve;
pub mod types;

pub use compiler::{CompileOptions, DEFAULT_MAX_REF_DEPTH, NoteRefCompiler, RefState};
pub use parser::{NOTE_EXTENSION, parse, parse_descriptor};
pub use portal::{render_link, render_portal};
pub use resolve::{Resolution, resolve};
pub use types::{AnchorEnd, AnchorRange, Destination, NoteRefDescriptor, RefDocument, Segment};
