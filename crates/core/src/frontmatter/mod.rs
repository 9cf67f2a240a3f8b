//! Frontmatter parsing and serialization for note files.
//!
//! Notes on disk carry their identity (`id`, `title`, `stub`) and any custom
//! publishing fields in a YAML block delimited by `---`.

pub mod parser;
pub mod serializer;
pub mod types;

pub use parser::{FrontmatterParseError, parse};
pub use serializer::{serialize, serialize_with_order};
pub use types::{Frontmatter, ParsedDocument};
