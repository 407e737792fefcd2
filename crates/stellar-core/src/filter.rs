use std::fmt;

use crate::consts::KNOWN_FILTERS;
use crate::error::{Result, StellarError};

/// Acquisition filter identifier (`L`, `R`, `Ha`, ...).
///
/// Kept as an open string: filters outside [`KNOWN_FILTERS`] are accepted so
/// an unusual channel never aborts a pass. The token is restricted to word
/// characters because it names a state file on disk.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Filter(String);

impl Filter {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let valid = !token.is_empty()
            && token.chars().all(|c| c.is_alphanumeric() || c == '_');
        if valid {
            Ok(Self(token))
        } else {
            Err(StellarError::InvalidFilter(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the filters the library layout expects.
    pub fn is_known(&self) -> bool {
        KNOWN_FILTERS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Filter {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
