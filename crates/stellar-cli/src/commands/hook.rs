use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use stellar_core::config::StellarConfig;
use stellar_core::group::GroupRecord;
use stellar_core::stage::{StageCoordinator, StageEvent};
use tracing::debug;

use crate::summary::print_effect;

#[derive(Args)]
pub struct HookArgs {
    /// Stage name reported by the pipeline (e.g. "Integration")
    #[arg(long)]
    pub stage: String,

    /// Stage outcome; only "done" is acted upon
    #[arg(long, default_value = "done")]
    pub event: String,

    /// Pipeline output directory
    #[arg(long)]
    pub output_dir: PathBuf,

    /// TOML file listing the current processing groups ([[group]] tables)
    #[arg(long)]
    pub groups: Option<PathBuf>,

    /// Filter of the group this event refers to
    #[arg(long)]
    pub filter: Option<String>,

    /// Active frame count of the group this event refers to
    #[arg(long)]
    pub active: Option<u32>,

    /// Total exposure in seconds of the group this event refers to
    #[arg(long, default_value = "0")]
    pub exposure: f64,

    /// Textual group description, e.g. "filter = R (12 active)"
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct GroupsFile {
    #[serde(default)]
    group: Vec<GroupRecord>,
}

pub fn run(args: &HookArgs, config: &StellarConfig) -> Result<()> {
    let groups = match args.groups {
        Some(ref path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read groups {}", path.display()))?;
            let file: GroupsFile = toml::from_str(&contents).context("Invalid groups file")?;
            file.group
        }
        None => Vec::new(),
    };
    debug!(groups = groups.len(), "Loaded processing groups");

    let event_group = event_group(args);
    let mut event = StageEvent::new(&args.stage, &args.event);
    if let Some(ref group) = event_group {
        event = event.with_group(group);
    }

    let coordinator = StageCoordinator::new(&args.output_dir, config.rename.clone());
    let effect = coordinator.handle(&event, &groups)?;
    print_effect(&args.stage, &effect);
    Ok(())
}

fn event_group(args: &HookArgs) -> Option<GroupRecord> {
    if args.filter.is_none() && args.active.is_none() && args.description.is_none() {
        return None;
    }
    Some(GroupRecord {
        filter: args.filter.clone(),
        active_frames: args.active,
        total_exposure: args.exposure,
        description: args.description.clone(),
        ..Default::default()
    })
}
