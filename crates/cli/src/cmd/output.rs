//! Shared output formatting for publish results.

use notepub_core::note::Note;
use notepub_core::publish::{NAV_ORDER_KEY, PERMALINK_KEY};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

/// Navigation entry, as written to `nav.json` and printed by `domains --json`.
#[derive(Debug, Serialize)]
pub struct DomainEntry {
    pub id: String,
    pub fname: String,
    pub title: String,
    pub vault: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_order: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

impl From<&Note> for DomainEntry {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            fname: note.fname.clone(),
            title: note.title.clone(),
            vault: note.vault.clone(),
            nav_order: note.custom.get(NAV_ORDER_KEY).and_then(|v| v.as_u64()),
            permalink: note.custom.get(PERMALINK_KEY).and_then(|v| v.as_str()).map(String::from),
        }
    }
}

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Fname")]
    fname: String,
    #[tabled(rename = "Vault")]
    vault: String,
}

pub fn print_domains_table(domains: &[DomainEntry]) {
    if domains.is_empty() {
        println!("(no domains published)");
        return;
    }

    let rows: Vec<DomainRow> = domains
        .iter()
        .enumerate()
        .map(|(i, d)| DomainRow {
            position: i + 1,
            id: d.id.clone(),
            title: d.title.clone(),
            fname: d.fname.clone(),
            vault: d.vault.clone(),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("\nTotal: {} domains", rows.len());
}

pub fn domains_json(domains: &[DomainEntry]) -> String {
    serde_json::to_string_pretty(domains).unwrap_or_default()
}
