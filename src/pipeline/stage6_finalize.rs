use crate::model::config::{Orientation, ZeroVariancePolicy};
use crate::model::records::{AggregatedPair, ResourceRow};
use crate::pipeline::stage3_normalize::{NormalizeError, rescale};

/// Re-normalizes the combined scores across all pairs and orders the result
/// ascending by the final score. Ties keep their aggregation order. Empty
/// original-identifier columns take the final symbol and microRNA.
pub fn rescale_and_finalize(
    pairs: Vec<AggregatedPair>,
    orientation: Orientation,
    policy: ZeroVariancePolicy,
) -> Result<Vec<ResourceRow>, NormalizeError> {
    if pairs.is_empty() {
        return Ok(Vec::new());
    }
    let combined: Vec<f64> = pairs.iter().map(|p| p.combined_score).collect();
    let scores = rescale(&combined, orientation, policy)?;

    let mut rows: Vec<ResourceRow> = pairs
        .into_iter()
        .zip(scores)
        .map(|(pair, normalized_score)| ResourceRow {
            original_gene_symbol: or_current(pair.original_gene_symbol, &pair.symbol),
            original_mirna_id: or_current(pair.original_mirna_id, &pair.mirna_id),
            symbol: pair.symbol,
            mirna_id: pair.mirna_id,
            raw_score: pair.raw_score,
            normalized_score,
            data_source: pair.data_source,
        })
        .collect();
    rows.sort_by(|a, b| a.normalized_score.total_cmp(&b.normalized_score));
    Ok(rows)
}

fn or_current(original: String, current: &str) -> String {
    if original.is_empty() {
        current.to_string()
    } else {
        original
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_finalize.rs"]
mod tests;
