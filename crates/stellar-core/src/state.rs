//! Per-filter integer handoff between stage invocations that share no
//! process state.
//!
//! One small text file per filter (`<dir>/<filter>.txt`). Writers and readers
//! rely on the host running stages one at a time; nothing here locks.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::consts::{RENAME_LOG_PREFIX, STATE_FILE_EXTENSION};
use crate::error::Result;
use crate::filter::Filter;

#[derive(Clone, Debug)]
pub struct StageStateStore {
    dir: PathBuf,
}

impl StageStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, filter: &Filter) -> PathBuf {
        self.dir
            .join(format!("{}.{STATE_FILE_EXTENSION}", filter.as_str()))
    }

    /// Store `value` for `filter`, replacing any previous value.
    pub fn put(&self, filter: &Filter, value: u32) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(filter);
        fs::write(&path, value.to_string())?;
        debug!(%filter, value, path = %path.display(), "{RENAME_LOG_PREFIX} stored frame count");
        Ok(())
    }

    /// Stored value for `filter`. Missing, empty, unparsable and zero values
    /// all read as `None`.
    pub fn get(&self, filter: &Filter) -> Option<u32> {
        let path = self.path_for(filter);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%filter, "{RENAME_LOG_PREFIX} no stored frame count");
                return None;
            }
            Err(e) => {
                warn!(%filter, "{RENAME_LOG_PREFIX} cannot read {}: {e}", path.display());
                return None;
            }
        };

        match text.trim().parse::<u32>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                warn!(%filter, "{RENAME_LOG_PREFIX} invalid stored frame count {:?} in {}", text.trim(), path.display());
                None
            }
        }
    }
}
