use std::collections::HashSet;

use crate::model::records::PredictionRecord;

#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<PredictionRecord>,
    pub failed_threshold: usize,
    pub excluded: usize,
}

/// Keeps records with `raw_score <= max_threshold` whose gene identifier is
/// not in `exclude`. A record failing both checks counts as failed threshold.
pub fn filter(
    records: &[PredictionRecord],
    max_threshold: f64,
    exclude: &HashSet<String>,
) -> FilterOutcome {
    let mut out = FilterOutcome::default();
    for record in records {
        if record.raw_score > max_threshold {
            out.failed_threshold += 1;
        } else if exclude.contains(&record.gene_id) {
            out.excluded += 1;
        } else {
            out.kept.push(record.clone());
        }
    }
    out
}

/// Drops the `|` suffix of gene identifiers and the space-separated suffix of
/// microRNA identifiers. Records left with an empty identifier are removed;
/// the count of those is returned alongside.
pub fn clean_identifiers(records: Vec<PredictionRecord>) -> (Vec<PredictionRecord>, usize) {
    let mut dropped = 0usize;
    let cleaned = records
        .into_iter()
        .filter_map(|mut record| {
            record.gene_id = strip_gene_suffix(&record.gene_id).to_string();
            record.mirna_id = strip_mirna_suffix(&record.mirna_id).to_string();
            if record.gene_id.is_empty() || record.mirna_id.is_empty() {
                dropped += 1;
                None
            } else {
                Some(record)
            }
        })
        .collect();
    (cleaned, dropped)
}

pub fn strip_gene_suffix(raw: &str) -> &str {
    raw.split('|').next().unwrap_or("").trim()
}

pub fn strip_mirna_suffix(raw: &str) -> &str {
    raw.split(' ').next().unwrap_or("").trim()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_filter.rs"]
mod tests;
