mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "npub", version, about = "Compile note references and publish note hierarchies")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved vaults and site settings
    Doctor,

    /// Compile the references of one note and print the result
    Compile(CompileArgs),

    /// Filter the configured hierarchies and write the site
    Publish(PublishArgs),

    /// List the navigation domains of the published site
    Domains(DomainsArgs),
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Note fname (e.g. "projects.alpha")
    pub fname: String,

    /// Vault holding the note when the fname exists in several vaults
    #[arg(long)]
    pub vault: Option<String>,

    /// native, markdown, html or preview
    #[arg(long, default_value = "html")]
    pub dest: String,
}

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Output directory for notes, nav.json and assets
    #[arg(long)]
    pub out: PathBuf,

    /// Destination used to compile note bodies
    #[arg(long, default_value = "html")]
    pub dest: String,

    /// Run the filter without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct DomainsArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config),
        Commands::Compile(args) => cmd::compile::run(config, &args),
        Commands::Publish(args) => cmd::publish::run(config, &args),
        Commands::Domains(args) => cmd::domains::run(config, &args),
    }
}
