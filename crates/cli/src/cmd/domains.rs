use notepub_core::note::MemoryStore;
use notepub_core::publish::PublishFilter;
use std::path::Path;

use crate::DomainsArgs;
use crate::cmd::load_workspace;
use crate::cmd::output::{DomainEntry, domains_json, print_domains_table};

/// Runs the filter without persisting anything and prints the domain list.
pub fn run(config: Option<&Path>, args: &DomainsArgs) {
    let (rc, graph) = load_workspace(config, "domains");

    let store = MemoryStore::new();
    let output = match PublishFilter::new(&graph, &store, &rc.site).filter_by_config() {
        Ok(output) => output,
        Err(e) => {
            println!("FAIL npub domains");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let entries: Vec<DomainEntry> = output.domains.iter().map(DomainEntry::from).collect();
    if args.json {
        println!("{}", domains_json(&entries));
    } else {
        print_domains_table(&entries);
    }
}
