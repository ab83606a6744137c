use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod exclude;
pub mod mirbase;
pub mod predictions;
pub mod resources;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Field separator and header handling shared by the delimited readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub sep: char,
    pub header: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            sep: '\t',
            header: false,
        }
    }
}

/// Accepts a literal character or the escapes `\t` / `tab` used on command lines.
pub fn parse_separator(raw: &str) -> Result<char, String> {
    match raw {
        "\\t" | "tab" | "\t" => Ok('\t'),
        "comma" => Ok(','),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!("separator must be a single character, got {other:?}")),
            }
        }
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Strips the line terminator only; surrounding whitespace can be significant
/// in positional columns.
pub(crate) fn trim_line_end(buf: &str) -> &str {
    buf.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
