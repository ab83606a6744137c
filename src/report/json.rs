use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<T: Serialize> {
    pub tool: &'static str,
    pub version: &'static str,
    pub command: &'static str,
    pub inputs: Vec<InputEntry>,
    pub counts: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputEntry {
    pub role: &'static str,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegrateSummary {
    pub max_threshold: f64,
    pub top_k: usize,
    pub orientation: String,
    pub data_source: String,
    pub rows_read: usize,
    pub malformed_rows: usize,
    pub failed_threshold: usize,
    pub excluded: usize,
    pub empty_after_cleaning: usize,
    pub unmapped: usize,
    pub ambiguous_mappings: usize,
    pub duplicates_removed: usize,
    pub pairs_written: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateIdsSummary {
    pub rows_read: usize,
    pub malformed_rows: usize,
    pub mirnas_renamed: usize,
    pub mirna_rows_dropped: usize,
    pub genes_renamed: usize,
    pub gene_rows_dropped: usize,
    pub rows_written: usize,
}

pub fn write_summary_json<T: Serialize>(path: &Path, summary: &RunSummary<T>) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, summary)?;
    w.write_all(b"\n")?;
    w.flush()
}
