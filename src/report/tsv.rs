use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::records::ResourceRow;
use crate::report::format_score;

/// Writes rows in the seven-column tab-separated cleaned format, no header.
pub fn write_resource_rows(path: &Path, rows: &[ResourceRow]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    for row in rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.symbol,
            row.mirna_id,
            format_score(row.raw_score),
            format_score(row.normalized_score),
            row.data_source,
            row.original_gene_symbol,
            row.original_mirna_id,
        )?;
    }
    w.flush()
}
