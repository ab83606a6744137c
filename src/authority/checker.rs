use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use crate::authority::{AuthorityError, csv_error, require_column};
use crate::input::{InputError, open_maybe_gz};

const INPUT_COLUMN: &str = "Input";
const MATCH_TYPE_COLUMN: &str = "Match type";
const APPROVED_COLUMN: &str = "Approved symbol";

const MATCH_PREVIOUS: &str = "Previous symbol";
const MATCH_WITHDRAWN: &str = "Entry withdrawn";

/// Results of the HGNC multi-symbol checker.
#[derive(Debug, Clone, Default)]
pub struct SymbolChecker {
    pub renamed: HashMap<String, String>,
    pub withdrawn: HashSet<String>,
}

/// Reads the checker CSV export. Its first line is a banner, the second the
/// header.
pub fn load_symbol_checker(path: &Path) -> Result<SymbolChecker, AuthorityError> {
    let mut input = open_maybe_gz(path)?;
    let mut banner = String::new();
    if input.read_line(&mut banner).map_err(InputError::from)? == 0 {
        return Err(AuthorityError::Malformed {
            path: path.display().to_string(),
            msg: "checker export is empty".to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let input_col = require_column(&headers, INPUT_COLUMN, path)?;
    let match_col = require_column(&headers, MATCH_TYPE_COLUMN, path)?;
    let approved_col = require_column(&headers, APPROVED_COLUMN, path)?;

    let mut checker = SymbolChecker::default();
    for record in reader.records() {
        let record = record.map_err(csv_error(path))?;
        let get = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");
        let queried = get(input_col);
        if queried.is_empty() {
            continue;
        }
        match get(match_col) {
            MATCH_PREVIOUS => {
                let approved = get(approved_col);
                if !approved.is_empty() {
                    checker
                        .renamed
                        .insert(queried.to_string(), approved.to_string());
                }
            }
            MATCH_WITHDRAWN => {
                checker.withdrawn.insert(queried.to_string());
            }
            _ => {}
        }
    }

    tracing::info!(
        "symbol checker: {} previous symbols, {} withdrawn entries",
        checker.renamed.len(),
        checker.withdrawn.len()
    );
    Ok(checker)
}
