use notepub_core::config::ResolvedConfig;
use notepub_core::note::{FsNoteStore, MemoryStore, Note, NoteStore, render_note_file};
use notepub_core::noteref::{CompileOptions, Destination, NoteRefCompiler};
use notepub_core::publish::{
    PublishFilter, PublishOutput, copy_assets, site_only_notes, strip_local_only_tags,
};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::PublishArgs;
use crate::cmd::output::{DomainEntry, domains_json};
use crate::cmd::{load_workspace, parse_destination};

pub fn run(config: Option<&Path>, args: &PublishArgs) {
    let dest = parse_destination(&args.dest);
    let (rc, graph) = load_workspace(config, "publish");

    let memory = MemoryStore::new();
    let disk = FsNoteStore::new(rc.vaults.clone());
    let store: &dyn NoteStore = if args.dry_run { &memory } else { &disk };

    let output = match PublishFilter::new(&graph, store, &rc.site).filter_by_config() {
        Ok(output) => output,
        Err(e) => {
            println!("FAIL npub publish");
            println!("{e}");
            std::process::exit(1);
        }
    };

    for warning in &output.warnings {
        println!("warning: {warning}");
    }

    if args.dry_run {
        println!("OK   npub publish (dry run)");
        println!("notes: {}", output.notes.len());
        println!("domains: {}", output.domains.len());
        println!("stubs to write: {}", memory.writes().len());
        return;
    }

    if let Err(e) = write_site(&rc, &output, dest, &args.out) {
        println!("FAIL npub publish");
        println!("{e}");
        std::process::exit(1);
    }

    println!("OK   npub publish");
    println!("out: {}", args.out.display());
    println!("notes: {}", output.notes.len());
    println!("domains: {}", output.domains.len());
}

/// Write `notes/<id>.md` for every published and site-only note, the
/// navigation file, and the vault assets. Embeds resolve against published
/// notes only.
fn write_site(
    rc: &ResolvedConfig,
    output: &PublishOutput,
    dest: Destination,
    out: &Path,
) -> Result<(), String> {
    let notes_dir = out.join("notes");
    fs::create_dir_all(&notes_dir)
        .map_err(|e| format!("failed to create {}: {e}", notes_dir.display()))?;

    let published = output.published_graph(&rc.vaults);
    let extra = site_only_notes(&rc.vaults);
    for note in output.notes.values().chain(extra.iter()) {
        let compiler = NoteRefCompiler::new(
            &published,
            CompileOptions::new(dest).with_vault(note.vault.clone()),
        );
        let body = strip_local_only_tags(&compiler.process_note(note));
        let page = Note { body, ..note.clone() };

        let path = notes_dir.join(format!("{}.md", page.id));
        fs::write(&path, render_note_file(&page))
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    }

    let entries: Vec<DomainEntry> = output.domains.iter().map(DomainEntry::from).collect();
    let nav_path = out.join("nav.json");
    fs::write(&nav_path, domains_json(&entries))
        .map_err(|e| format!("failed to write {}: {e}", nav_path.display()))?;

    if rc.site.copy_assets {
        let assets_dir = out.join(&rc.site.site_assets_dir);
        for vault in &rc.vaults {
            match copy_assets(vault, &assets_dir) {
                Ok(true) => info!(vault = %vault.name, "copied assets"),
                Ok(false) => {}
                Err(e) => return Err(e.to_string()),
            }
        }
    }

    Ok(())
}
