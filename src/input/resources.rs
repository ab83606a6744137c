use std::io::BufRead;
use std::path::Path;

use crate::input::predictions::parse_finite;
use crate::input::{InputError, TableFormat, open_maybe_gz, trim_line_end};
use crate::model::records::ResourceRow;

#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    pub rows: Vec<ResourceRow>,
    pub malformed: usize,
}

/// Reads a cleaned seven-column resource file.
pub fn read_resource_rows(path: &Path, format: TableFormat) -> Result<ResourceTable, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut table = ResourceTable::default();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        if format.header && line_no == 1 {
            continue;
        }
        let line = trim_line_end(&buf);
        if line.trim().is_empty() {
            continue;
        }
        match parse_resource_line(line, format.sep) {
            Some(row) => table.rows.push(row),
            None => {
                table.malformed += 1;
                tracing::debug!(line = line_no, "dropping malformed resource row");
            }
        }
    }

    if table.malformed > 0 {
        tracing::warn!(
            "dropped {} malformed rows from {}",
            table.malformed,
            path.display()
        );
    }
    Ok(table)
}

pub fn parse_resource_line(line: &str, sep: char) -> Option<ResourceRow> {
    let cols: Vec<&str> = line.split(sep).collect();
    if cols.len() < 7 {
        return None;
    }
    let symbol = cols[0].trim();
    let mirna_id = cols[1].trim();
    if symbol.is_empty() || mirna_id.is_empty() {
        return None;
    }
    Some(ResourceRow {
        symbol: symbol.to_string(),
        mirna_id: mirna_id.to_string(),
        raw_score: parse_finite(cols[2])?,
        normalized_score: parse_finite(cols[3])?,
        data_source: cols[4].trim().to_string(),
        original_gene_symbol: cols[5].trim().to_string(),
        original_mirna_id: cols[6].trim().to_string(),
    })
}
