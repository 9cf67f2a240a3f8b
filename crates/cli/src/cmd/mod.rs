pub mod compile;
pub mod doctor;
pub mod domains;
pub mod output;
pub mod publish;

use notepub_core::config::{ConfigLoader, ResolvedConfig, default_config_path};
use notepub_core::note::NoteGraph;
use notepub_core::noteref::Destination;
use notepub_core::publish::VAULT_ASSETS_DIR;
use notepub_core::vault::VaultLoader;
use std::path::{Path, PathBuf};

use crate::logging;

/// Load config and vaults for `command`, installing logging on the way.
/// Prints a FAIL line and exits on error.
pub fn load_workspace(config: Option<&Path>, command: &str) -> (ResolvedConfig, NoteGraph) {
    let rc = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL npub {command}");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    logging::init(&rc.logging);

    let graph = match vault_loader(&rc).load() {
        Ok(graph) => graph,
        Err(e) => {
            println!("FAIL npub {command}");
            println!("{e}");
            std::process::exit(1);
        }
    };

    (rc, graph)
}

/// Loader for the configured vaults. Asset folders never hold notes.
fn vault_loader(rc: &ResolvedConfig) -> VaultLoader {
    VaultLoader::new(rc.vaults.clone()).with_exclusions(vec![PathBuf::from(VAULT_ASSETS_DIR)])
}

pub fn parse_destination(value: &str) -> Destination {
    Destination::from_name(value).unwrap_or_else(|| {
        eprintln!("unknown destination '{value}' (expected native, markdown, html or preview)");
        std::process::exit(2);
    })
}
