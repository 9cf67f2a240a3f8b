//! Note and vault records.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Delimiter between hierarchy segments of a note fname.
pub const HIERARCHY_DELIMITER: char = '.';

/// Fname of the per-vault root note.
pub const ROOT_FNAME: &str = "root";

/// Custom frontmatter attached to a note (everything besides the
/// structural keys the engine owns).
pub type CustomFields = BTreeMap<String, Value>;

/// A root content collection. Notes belong to exactly one vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub name: String,
    pub path: PathBuf,
}

impl Vault {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// A single note in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique across the whole graph.
    pub id: String,
    /// Hierarchical path, e.g. `foo.bar.baz`.
    pub fname: String,
    /// Name of the owning vault.
    pub vault: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub custom: CustomFields,
    #[serde(default)]
    pub children: Vec<String>,
    pub parent: Option<String>,
    /// Placeholder note without authored content.
    #[serde(default)]
    pub stub: bool,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        fname: impl Into<String>,
        vault: impl Into<String>,
    ) -> Self {
        let fname = fname.into();
        Self {
            id: id.into(),
            title: title_from_fname(&fname),
            fname,
            vault: vault.into(),
            body: String::new(),
            custom: CustomFields::new(),
            children: Vec::new(),
            parent: None,
            stub: false,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    pub fn with_stub(mut self, stub: bool) -> Self {
        self.stub = stub;
        self
    }

    /// First hierarchy segment of the fname.
    pub fn domain_name(&self) -> &str {
        domain_name(&self.fname)
    }

    /// Read a boolean custom field, ignoring values of other types.
    pub fn custom_bool(&self, key: &str) -> Option<bool> {
        self.custom.get(key).and_then(Value::as_bool)
    }
}

/// First hierarchy segment of an fname (`foo.bar` -> `foo`).
pub fn domain_name(fname: &str) -> &str {
    fname.split(HIERARCHY_DELIMITER).next().unwrap_or(fname)
}

/// Fname of the hierarchical parent, or `None` for a top-level fname.
pub fn parent_fname(fname: &str) -> Option<&str> {
    fname.rsplit_once(HIERARCHY_DELIMITER).map(|(parent, _)| parent)
}

/// Default display title: the last segment with its first letter uppercased.
pub fn title_from_fname(fname: &str) -> String {
    let last = fname.rsplit(HIERARCHY_DELIMITER).next().unwrap_or(fname);
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
