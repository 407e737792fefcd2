use regex::Regex;

use crate::error::{Result, StellarError};

/// Compile a filename glob (`*` and `?` wildcards) into an anchored regex.
pub fn glob_to_regex(glob: &str) -> Result<Regex> {
    let mut source = String::with_capacity(glob.len() + 8);
    source.push('^');
    for c in glob.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
        }
    }
    source.push('$');
    Regex::new(&source).map_err(|source| StellarError::InvalidPattern {
        pattern: glob.to_string(),
        source,
    })
}
