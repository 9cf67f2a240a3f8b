use notepub_core::note::NoteLookup;
use notepub_core::noteref::{CompileOptions, NoteRefCompiler};
use std::path::Path;

use crate::CompileArgs;
use crate::cmd::{load_workspace, parse_destination};

pub fn run(config: Option<&Path>, args: &CompileArgs) {
    let dest = parse_destination(&args.dest);
    let (_rc, graph) = load_workspace(config, "compile");

    let matches = graph.notes_by_fname(&args.fname, args.vault.as_deref());
    let Some(note) = matches.first() else {
        println!("FAIL npub compile");
        match &args.vault {
            Some(vault) => println!("note '{}' not found in vault '{vault}'", args.fname),
            None => println!("note '{}' not found", args.fname),
        }
        std::process::exit(1);
    };

    let options = CompileOptions::new(dest).with_vault(note.vault.clone());
    let compiler = NoteRefCompiler::new(&graph, options);
    print!("{}", compiler.process_note(note));
}
