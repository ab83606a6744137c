use std::path::Path;

use crate::authority::{
    AuthorityError, AuthorityRow, AuthorityTable, GeneNamespace, csv_error, find_column,
    require_column,
};
use crate::input::open_maybe_gz;

/// Loads `hgnc_complete_set.txt`. Only the `symbol` column is required;
/// absent namespace columns stay empty.
pub fn load_hgnc_table(path: &Path) -> Result<AuthorityTable, AuthorityError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(open_maybe_gz(path)?);
    let headers = reader.headers().map_err(csv_error(path))?.clone();

    require_column(&headers, GeneNamespace::Symbol.column_name(), path)?;
    let mut ns_cols: [Option<usize>; 7] = [None; 7];
    for ns in GeneNamespace::ALL {
        ns_cols[ns as usize] = find_column(&headers, ns.column_name());
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record.map_err(csv_error(path))?;
        let mut row = AuthorityRow::default();
        for ns in GeneNamespace::ALL {
            if let Some(col) = ns_cols[ns as usize] {
                row.ids[ns as usize] = split_multi(record.get(col).unwrap_or(""));
            }
        }
        let Some(symbol) = row.values(GeneNamespace::Symbol).first().cloned() else {
            skipped += 1;
            continue;
        };
        row.symbol = symbol;
        rows.push(row);
    }

    if skipped > 0 {
        tracing::warn!("skipped {} authority rows without a symbol", skipped);
    }
    tracing::info!("loaded {} authority rows from {}", rows.len(), path.display());
    Ok(AuthorityTable { rows })
}

pub fn split_multi(cell: &str) -> Vec<String> {
    cell.split('|')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
