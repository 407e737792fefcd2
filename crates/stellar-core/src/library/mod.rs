//! Raw frame library: consolidating captures into an object/filter/night
//! tree and assembling per-object working sets with matching calibration.
//!
//! Both operations only plan; [`execute`] applies a plan.

mod consolidate;
pub mod naming;
mod organize;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

pub use consolidate::consolidate;
pub use organize::{closest_temperature, organize};

/// One filesystem step of a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    CreateDir(PathBuf),
    Move { from: PathBuf, to: PathBuf },
    Copy { from: PathBuf, to: PathBuf },
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir(dir) => write!(f, "mkdir -p {}", dir.display()),
            Self::Move { from, to } => write!(f, "mv {} -> {}", from.display(), to.display()),
            Self::Copy { from, to } => write!(f, "copy {} -> {}", from.display(), to.display()),
        }
    }
}

/// Apply a plan in order. `progress` is called with `(actions_done, total)`.
pub fn execute(actions: &[FileAction], mut progress: impl FnMut(usize, usize)) -> Result<()> {
    let total = actions.len();
    for (i, action) in actions.iter().enumerate() {
        debug!("{action}");
        match action {
            FileAction::CreateDir(dir) => fs::create_dir_all(dir)?,
            FileAction::Move { from, to } => move_file(from, to)?,
            FileAction::Copy { from, to } => {
                fs::copy(from, to)?;
            }
        }
        progress(i + 1, total);
    }
    Ok(())
}

/// Rename, falling back to copy + remove across filesystems.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

/// Regular files directly in `dir`, sorted by name. Missing dir -> empty.
fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Subdirectories of `dir`, sorted by name. Missing dir -> empty.
fn subdirs_of(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// All regular files below `dir`, recursively, sorted by path.
fn files_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = files_in(dir)?;
    for sub in subdirs_of(dir)? {
        files.extend(files_recursive(&sub)?);
    }
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn file_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
