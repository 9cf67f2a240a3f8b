use notepub_core::config::default_config_path;
use notepub_core::doctor_stub;
use std::path::Path;

use crate::cmd::load_workspace;

pub fn run(config: Option<&Path>) {
    let (rc, graph) = load_workspace(config, "doctor");

    println!("OK   npub doctor");
    println!("{}", doctor_stub());
    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("ws_root: {}", rc.ws_root.display());
    for vault in &rc.vaults {
        println!("vault: {} -> {}", vault.name, vault.path.display());
    }
    println!("site.hierarchies: {}", rc.site.site_hierarchies.join(", "));
    println!("site.index: {}", rc.site.site_index.as_deref().unwrap_or("-"));
    println!("site.write_stubs: {}", rc.site.write_stubs);
    println!("site.duplicate_vault: {}", rc.site.duplicate_vault().unwrap_or("-"));
    println!("notes: {}", graph.len());
}
