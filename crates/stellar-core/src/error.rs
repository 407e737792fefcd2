use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StellarError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to rename {} -> {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filter token: {0:?}")]
    InvalidFilter(String),

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, StellarError>;
