//! Frontmatter serialization back to markdown.

use super::types::ParsedDocument;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// Serialize a parsed document back to markdown string.
pub fn serialize(doc: &ParsedDocument) -> String {
    serialize_with_order(doc, None)
}

/// Serialize a parsed document, emitting the keys in `order` first and the
/// remaining keys alphabetically.
pub fn serialize_with_order(doc: &ParsedDocument, order: Option<&[String]>) -> String {
    match &doc.frontmatter {
        Some(fm) if !fm.fields.is_empty() => {
            format!("---\n{}---\n{}", frontmatter_yaml(&fm.fields, order), doc.body)
        }
        _ => doc.body.clone(),
    }
}

fn frontmatter_yaml(fields: &HashMap<String, Value>, order: Option<&[String]>) -> String {
    let leading = order.unwrap_or_default();
    let mut mapping = Mapping::new();

    for key in leading {
        if let Some(value) = fields.get(key) {
            mapping.insert(Value::String(key.clone()), value.clone());
        }
    }

    let mut remaining: Vec<_> = fields.keys().filter(|k| !leading.contains(*k)).collect();
    remaining.sort();
    for key in remaining {
        mapping.insert(Value::String(key.clone()), fields[key].clone());
    }

    serde_yaml::to_string(&mapping).unwrap_or_default()
}
