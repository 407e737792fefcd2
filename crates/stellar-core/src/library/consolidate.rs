use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::LibraryConfig;
use crate::consts::CONSOLIDATED_DIR;
use crate::error::{Result, StellarError};

use super::naming::{FrameKind, FrameName};
use super::{file_name, files_recursive, FileAction};

/// Plan moving every `*.fit` capture below `src` into
/// `consolidated/<object>/<filter>/<night>/<exposure>` (darks:
/// `consolidated/Dark/<gain>/<exposure>`).
///
/// Malformed names and lights/flats with an unlisted filter are left in place.
pub fn consolidate(src: &Path, config: &LibraryConfig) -> Result<Vec<FileAction>> {
    if !src.is_dir() {
        return Err(StellarError::MissingDirectory(src.to_path_buf()));
    }
    let root = config.base_dir.join(CONSOLIDATED_DIR);

    let mut created = BTreeSet::new();
    let mut actions = Vec::new();
    let mut skipped = 0usize;

    for file in files_recursive(src)? {
        if file.extension().and_then(|e| e.to_str()) != Some("fit") {
            continue;
        }
        let Some(frame) = file
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(FrameName::parse)
        else {
            skipped += 1;
            continue;
        };
        if frame.kind != FrameKind::Dark && !config.filters.contains(&frame.filter) {
            debug!(filter = %frame.filter, path = %file.display(), "unlisted filter, skipping");
            skipped += 1;
            continue;
        }

        let target_dir = target_dir(&root, &frame);
        if created.insert(target_dir.clone()) {
            actions.push(FileAction::CreateDir(target_dir.clone()));
        }
        actions.push(FileAction::Move {
            to: target_dir.join(file_name(&file)),
            from: file,
        });
    }

    info!(
        planned = actions.len(),
        skipped,
        "Consolidation planned"
    );
    Ok(actions)
}

fn target_dir(root: &Path, frame: &FrameName) -> PathBuf {
    match frame.kind {
        FrameKind::Dark => root
            .join(FrameKind::Dark.to_string())
            .join(&frame.gain)
            .join(frame.exposure_dir()),
        _ => root
            .join(&frame.object)
            .join(&frame.filter)
            .join(frame.night().format("%Y%m%d").to_string())
            .join(frame.exposure_dir()),
    }
}
