use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::Style;
use stellar_core::config::StellarConfig;
use stellar_core::consts::ORGANIZED_DIR;
use stellar_core::library::organize;

use super::{apply_plan, with_base_dir};

#[derive(Args)]
pub struct OrganizeArgs {
    /// Object name as used in the consolidated library (e.g. M42)
    #[arg(long)]
    pub object: String,

    /// Library base directory (defaults to the config, then ~/stellar)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Print the planned copies without touching any file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &OrganizeArgs, config: &StellarConfig) -> Result<()> {
    let config = with_base_dir(config, args.base_dir.as_ref());
    let actions = organize(&args.object, &config.library)?;
    if actions.is_empty() {
        println!(
            "{}",
            Style::new().red().apply_to(format!(
                "No observation dates found for object '{}'.",
                args.object
            ))
        );
        return Ok(());
    }
    apply_plan(&actions, args.dry_run)?;

    let output = config.library.base_dir.join(ORGANIZED_DIR).join(&args.object);
    println!(
        "{}",
        Style::new().green().apply_to(format!(
            "Organizing complete for {}. Output: {}",
            args.object,
            output.display()
        ))
    );
    Ok(())
}
