use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::Style;
use stellar_core::config::StellarConfig;
use stellar_core::library::consolidate;

use super::{apply_plan, with_base_dir};

#[derive(Args)]
pub struct ConsolidateArgs {
    /// Directory holding raw *.fit captures (searched recursively)
    #[arg(long)]
    pub src: PathBuf,

    /// Library base directory (defaults to the config, then ~/stellar)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Print the planned moves without touching any file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &ConsolidateArgs, config: &StellarConfig) -> Result<()> {
    let config = with_base_dir(config, args.base_dir.as_ref());
    let actions = consolidate(&args.src, &config.library)?;
    apply_plan(&actions, args.dry_run)?;
    println!("{}", Style::new().green().apply_to("Consolidation Complete."));
    Ok(())
}
