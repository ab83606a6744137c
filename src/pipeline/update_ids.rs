use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::authority::checker::load_symbol_checker;
use crate::input::TableFormat;
use crate::input::mirbase::{MirbaseUpdates, sibling_path};
use crate::input::resources::read_resource_rows;
use crate::model::records::{ResourceColumn, ResourceRow};
use crate::pipeline::PipelineError;
use crate::report::json::UpdateIdsSummary;
use crate::report::tsv::write_resource_rows;

#[derive(Debug, Clone)]
pub struct UpdateIdsParams {
    pub path: PathBuf,
    pub checker: PathBuf,
    pub outpath: PathBuf,
    pub format: TableFormat,
    pub mirna_col: ResourceColumn,
    pub gene_col: ResourceColumn,
    pub dead_ext: String,
    pub changed_ext: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdUpdateStats {
    pub renamed: usize,
    pub dropped: usize,
}

/// Records the current value of `column` in `original`, renames it through
/// `renames`, then drops rows whose (renamed) value is in `dead`.
pub fn apply_id_updates(
    rows: Vec<ResourceRow>,
    column: ResourceColumn,
    original: ResourceColumn,
    renames: &HashMap<String, String>,
    dead: &HashSet<String>,
) -> Result<(Vec<ResourceRow>, IdUpdateStats), PipelineError> {
    for col in [column, original] {
        if !col.is_text() {
            return Err(PipelineError::InvalidColumn(col.name().to_string()));
        }
    }
    let mut stats = IdUpdateStats::default();
    let mut out = Vec::with_capacity(rows.len());
    for mut row in rows {
        let current = row.text(column).unwrap_or_default().to_string();
        if let Some(slot) = row.text_mut(original) {
            slot.clone_from(&current);
        }
        let updated = match renames.get(&current) {
            Some(new_id) => {
                stats.renamed += 1;
                new_id.clone()
            }
            None => current,
        };
        if dead.contains(&updated) {
            stats.dropped += 1;
            continue;
        }
        if let Some(slot) = row.text_mut(column) {
            *slot = updated;
        }
        out.push(row);
    }
    Ok((out, stats))
}

pub fn run_update_ids(params: &UpdateIdsParams) -> Result<UpdateIdsSummary, PipelineError> {
    let table = read_resource_rows(&params.path, params.format)?;
    let rows_read = table.rows.len() + table.malformed;
    tracing::info!("read {} resource rows from {}", rows_read, params.path.display());

    let mirbase = MirbaseUpdates::load(
        &sibling_path(&params.path, &params.dead_ext),
        &sibling_path(&params.path, &params.changed_ext),
        params.format.sep,
    )?;
    let (rows, mirna_stats) = apply_id_updates(
        table.rows,
        params.mirna_col,
        ResourceColumn::OriginalMirnaId,
        &mirbase.changed,
        &mirbase.dead,
    )?;
    tracing::info!(
        "microRNA ids: {} renamed, {} rows dropped as dead",
        mirna_stats.renamed,
        mirna_stats.dropped
    );

    let checker = load_symbol_checker(&params.checker)?;
    let (rows, gene_stats) = apply_id_updates(
        rows,
        params.gene_col,
        ResourceColumn::OriginalGeneSymbol,
        &checker.renamed,
        &checker.withdrawn,
    )?;
    tracing::info!(
        "gene symbols: {} renamed, {} rows dropped as withdrawn",
        gene_stats.renamed,
        gene_stats.dropped
    );

    write_resource_rows(&params.outpath, &rows)?;
    tracing::info!("wrote {} rows to {}", rows.len(), params.outpath.display());

    Ok(UpdateIdsSummary {
        rows_read,
        malformed_rows: table.malformed,
        mirnas_renamed: mirna_stats.renamed,
        mirna_rows_dropped: mirna_stats.dropped,
        genes_renamed: gene_stats.renamed,
        gene_rows_dropped: gene_stats.dropped,
        rows_written: rows.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/update_ids.rs"]
mod tests;
