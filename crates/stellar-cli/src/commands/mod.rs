pub mod config;
pub mod consolidate;
pub mod hook;
pub mod organize;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use stellar_core::config::StellarConfig;
use stellar_core::library::{execute, FileAction};

/// Read the config file, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<StellarConfig> {
    let Some(path) = path else {
        return Ok(StellarConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).context("Invalid stellar config")
}

/// `--base-dir` overrides the configured library location.
pub fn with_base_dir(config: &StellarConfig, base_dir: Option<&PathBuf>) -> StellarConfig {
    let mut config = config.clone();
    if let Some(dir) = base_dir {
        config.library.base_dir = dir.clone();
    }
    config
}

/// Print a plan on a dry run, otherwise apply it behind a progress bar.
pub fn apply_plan(actions: &[FileAction], dry_run: bool) -> Result<()> {
    if dry_run {
        let tag = Style::new().yellow().apply_to("[DRY RUN]");
        for action in actions {
            println!("{tag} {action}");
        }
        return Ok(());
    }

    let pb = ProgressBar::new(actions.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Applying [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    execute(actions, |done, _total| pb.set_position(done as u64))?;
    pb.finish();
    Ok(())
}
