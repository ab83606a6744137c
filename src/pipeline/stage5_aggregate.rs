use std::collections::HashMap;

use crate::model::records::{AggregatedPair, ResourceRow};

pub const DEFAULT_TOP_K: usize = 3;

/// Collapses rows sharing `(symbol, mirna_id)`. Pairs come out in order of
/// first appearance; carried text fields are taken from the first row of each
/// group.
pub fn aggregate(rows: &[ResourceRow], top_k: usize) -> Vec<AggregatedPair> {
    let mut group_of: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<Vec<&ResourceRow>> = Vec::new();

    for row in rows {
        let key = (row.symbol.as_str(), row.mirna_id.as_str());
        let idx = *group_of.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[idx].push(row);
    }

    groups
        .into_iter()
        .filter_map(|members| {
            let first = *members.first()?;
            let raw: Vec<f64> = members.iter().map(|r| r.raw_score).collect();
            let norm: Vec<f64> = members.iter().map(|r| r.normalized_score).collect();
            Some(AggregatedPair {
                symbol: first.symbol.clone(),
                mirna_id: first.mirna_id.clone(),
                raw_score: median(&raw)?,
                combined_score: top_k_product(&norm, top_k),
                n_merged: members.len(),
                data_source: first.data_source.clone(),
                original_gene_symbol: first.original_gene_symbol.clone(),
                original_mirna_id: first.original_mirna_id.clone(),
            })
        })
        .collect()
}

/// Median with the even-length case averaged over the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Product of the `k` smallest values; all values when fewer than `k`.
pub fn top_k_product(values: &[f64], k: usize) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.iter().take(k).product()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_aggregate.rs"]
mod tests;
