//! Program image loading.
//!
//! Programs are flat hex listings: one 8-hex-digit instruction word per
//! line, in text order, loaded at the text base. Blank lines and lines
//! starting with `#` are skipped.

use crate::common::LoadError;
use std::fs;
use std::path::Path;

/// Reads a hex listing into instruction words.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read and
/// [`LoadError::BadWord`] (with a 1-based line number) for any line that is
/// not a 32-bit hexadecimal word.
pub fn load_hex_file(path: &Path) -> Result<Vec<u32>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_hex(&text)
}

/// Parses a hex listing from a string. See [`load_hex_file`].
///
/// # Errors
///
/// Returns [`LoadError::BadWord`] for malformed lines.
pub fn parse_hex(text: &str) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let word = u32::from_str_radix(line, 16).map_err(|_| LoadError::BadWord {
            line: i + 1,
            word: line.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}
