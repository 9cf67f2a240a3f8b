//! Navigation domain list for a filtered note set.

use std::collections::BTreeMap;

use serde_yaml::Value;

use super::filter::NAV_ORDER_KEY;
use crate::config::SiteConfig;
use crate::note::Note;

/// Top-level navigation entries.
///
/// With one configured hierarchy: its domain note followed by the domain's
/// published children. Otherwise every note without a parent, ordered by
/// navigation order and then fname.
pub fn get_domains<'a>(notes: &'a BTreeMap<String, Note>, site: &SiteConfig) -> Vec<&'a Note> {
    if let [hierarchy] = site.site_hierarchies.as_slice() {
        let Some(domain) =
            notes.values().find(|n| n.fname == *hierarchy && n.parent.is_none())
        else {
            return Vec::new();
        };
        return std::iter::once(domain)
            .chain(domain.children.iter().filter_map(|id| notes.get(id)))
            .collect();
    }

    let mut roots: Vec<&Note> = notes.values().filter(|n| n.parent.is_none()).collect();
    roots.sort_by(|a, b| nav_order(a).cmp(&nav_order(b)).then_with(|| a.fname.cmp(&b.fname)));
    roots
}

fn nav_order(note: &Note) -> u64 {
    note.custom.get(NAV_ORDER_KEY).and_then(Value::as_u64).unwrap_or(u64::MAX)
}
