use std::path::PathBuf;

use thiserror::Error;

use crate::authority::AuthorityError;
use crate::authority::biomart::load_biomart;
use crate::authority::hgnc::load_hgnc_table;
use crate::input::predictions::read_predictions;
use crate::input::{InputError, TableFormat};
use crate::model::config::IntegratorConfig;
use crate::model::records::{AggregatedPair, NormalizedRecord, PredictionRecord, ResourceRow};
use crate::report::json::IntegrateSummary;
use crate::report::tsv::write_resource_rows;

pub mod stage2_filter;
pub mod stage3_normalize;
pub mod stage4_map;
pub mod stage5_aggregate;
pub mod stage6_finalize;
pub mod update_ids;

use stage2_filter::{FilterOutcome, clean_identifiers};
use stage3_normalize::NormalizeError;
use stage4_map::{GeneMapper, dedup_rows, map_to_symbols};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Authority(#[from] AuthorityError),
    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("column {0:?} does not hold identifiers")]
    InvalidColumn(String),
    #[error("IO error writing output: {0}")]
    Output(#[from] std::io::Error),
}

/// Filters, rescales and combines one batch of scored predictions.
#[derive(Debug, Clone)]
pub struct ScoreIntegrator {
    config: IntegratorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct IntegrationOutput {
    pub rows: Vec<ResourceRow>,
    pub failed_threshold: usize,
    pub excluded: usize,
    pub empty_after_cleaning: usize,
    pub unmapped: usize,
    pub ambiguous: usize,
    pub duplicates_removed: usize,
}

impl ScoreIntegrator {
    pub fn new(config: IntegratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    pub fn filter(&self, records: &[PredictionRecord]) -> FilterOutcome {
        stage2_filter::filter(records, self.config.max_threshold, &self.config.exclude)
    }

    pub fn normalize(
        &self,
        records: Vec<PredictionRecord>,
    ) -> Result<Vec<NormalizedRecord>, NormalizeError> {
        stage3_normalize::normalize(records, self.config.orientation, self.config.zero_variance)
    }

    pub fn aggregate(&self, rows: &[ResourceRow]) -> Vec<AggregatedPair> {
        stage5_aggregate::aggregate(rows, self.config.top_k)
    }

    pub fn rescale_and_finalize(
        &self,
        pairs: Vec<AggregatedPair>,
    ) -> Result<Vec<ResourceRow>, NormalizeError> {
        stage6_finalize::rescale_and_finalize(
            pairs,
            self.config.orientation,
            self.config.zero_variance,
        )
    }

    /// Runs the whole batch: filter, identifier cleanup, normalization,
    /// symbol mapping, de-duplication, aggregation and the final rescale.
    pub fn integrate(
        &self,
        records: &[PredictionRecord],
        mapper: &GeneMapper<'_>,
    ) -> Result<IntegrationOutput, PipelineError> {
        let filtered = self.filter(records);
        tracing::info!(
            "filter: kept {} of {} (threshold {}, {} above threshold, {} excluded)",
            filtered.kept.len(),
            records.len(),
            self.config.max_threshold,
            filtered.failed_threshold,
            filtered.excluded
        );
        let (cleaned, empty_after_cleaning) = clean_identifiers(filtered.kept);
        if empty_after_cleaning > 0 {
            tracing::warn!(
                "dropped {} records with empty identifiers after suffix removal",
                empty_after_cleaning
            );
        }

        let mut out = IntegrationOutput {
            failed_threshold: filtered.failed_threshold,
            excluded: filtered.excluded,
            empty_after_cleaning,
            ..IntegrationOutput::default()
        };
        if cleaned.is_empty() {
            tracing::warn!("no records left after filtering; output will be empty");
            return Ok(out);
        }

        let normalized = self.normalize(cleaned)?;
        let mapped = map_to_symbols(normalized, mapper);
        out.unmapped = mapped.unmapped;
        out.ambiguous = mapped.ambiguous;

        let (rows, duplicates_removed) = dedup_rows(mapped.rows);
        out.duplicates_removed = duplicates_removed;

        let pairs = self.aggregate(&rows);
        let merged = pairs.iter().filter(|p| p.n_merged > 1).count();
        tracing::info!(
            "aggregate: {} rows collapsed into {} pairs, {} from duplicates (top {})",
            rows.len(),
            pairs.len(),
            merged,
            self.config.top_k
        );
        out.rows = self.rescale_and_finalize(pairs)?;
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct IntegratePaths {
    pub input: PathBuf,
    pub hgnc: PathBuf,
    pub biomart: Option<PathBuf>,
    pub out: PathBuf,
}

pub fn run_integrate(
    integrator: &ScoreIntegrator,
    paths: &IntegratePaths,
    format: TableFormat,
) -> Result<IntegrateSummary, PipelineError> {
    let config = integrator.config();
    let batch = read_predictions(&paths.input, format, &config.layout, &config.data_source)?;
    tracing::info!(
        "read {} prediction rows from {}",
        batch.rows_read,
        paths.input.display()
    );

    let table = load_hgnc_table(&paths.hgnc)?;
    let biomart = paths.biomart.as_deref().map(load_biomart).transpose()?;
    let mapper = GeneMapper::new(
        &table,
        config.gene_namespace,
        &config.fallback_namespaces,
        biomart.as_ref(),
    );

    let output = integrator.integrate(&batch.records, &mapper)?;
    write_resource_rows(&paths.out, &output.rows)?;
    tracing::info!("wrote {} pairs to {}", output.rows.len(), paths.out.display());

    Ok(IntegrateSummary {
        max_threshold: config.max_threshold,
        top_k: config.top_k,
        orientation: format!("{:?}", config.orientation),
        data_source: config.data_source.clone(),
        rows_read: batch.rows_read,
        malformed_rows: batch.malformed,
        failed_threshold: output.failed_threshold,
        excluded: output.excluded,
        empty_after_cleaning: output.empty_after_cleaning,
        unmapped: output.unmapped,
        ambiguous_mappings: output.ambiguous,
        duplicates_removed: output.duplicates_removed,
        pairs_written: output.rows.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
