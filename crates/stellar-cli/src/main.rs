mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stellar", about = "Deep-sky frame library and master renaming tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a pipeline stage event (rename masters, store frame counts)
    Hook(commands::hook::HookArgs),
    /// Move raw captures into the consolidated library
    Consolidate(commands::consolidate::ConsolidateArgs),
    /// Assemble nights and calibration frames for one object
    Organize(commands::organize::OrganizeArgs),
    /// Print or save a default config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = commands::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Hook(args) => commands::hook::run(args, &config),
        Commands::Consolidate(args) => commands::consolidate::run(args, &config),
        Commands::Organize(args) => commands::organize::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
