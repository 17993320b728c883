//! Line-oriented input parsing helpers shared by every loader.
//!
//! All input files in this system are simple whitespace-delimited text;
//! the only shared concerns are: open-with-context, iterate non-blank
//! non-comment lines with a 1-based line number, and split off the first
//! whitespace-delimited token from a free-form remainder.

use crate::error::{ConfigError, ParseError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Opens `path` for buffered line reading, mapping a missing/unreadable
/// file to a [`ConfigError`] tagged with `flag` (the CLI flag that named
/// this path), per §7's Configuration-error kind.
pub fn open_flagged(flag: &'static str, path: &str) -> Result<BufReader<File>, ConfigError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|_| ConfigError::FileNotFound {
            flag,
            path: path.to_string(),
        })
}

/// Iterates the non-blank, non-`#`-prefixed lines of `reader`, yielding
/// `(1-based line number, line content)`. Matches the vertex/edge file
/// convention in §6.
pub fn significant_lines(
    reader: BufReader<File>,
) -> impl Iterator<Item = std::io::Result<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(l) if l.is_empty() || l.starts_with('#') => None,
            Ok(l) => Some(Ok((idx + 1, l))),
            Err(e) => Some(Err(e)),
        })
}

/// Splits `line` into its first whitespace-delimited token and the
/// trimmed remainder of the line (used for `<id> <label remainder>` and
/// `<src> <dst> <label remainder>` formats).
pub fn split_first_token(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    let idx = line.find(char::is_whitespace)?;
    let (head, rest) = line.split_at(idx);
    Some((head, rest.trim()))
}

pub fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

pub fn parse_error(path: &str, line: usize, message: impl Into<String>) -> ParseError {
    ParseError::new(file_name(path), line, message)
}
