use std::collections::HashSet;

use crate::authority::GeneNamespace;
use crate::pipeline::stage5_aggregate::DEFAULT_TOP_K;

/// Direction of min-max rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Orientation {
    ValueIsScore,
    AscendingIsStrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ZeroVariancePolicy {
    Midpoint,
    Fail,
}

pub const ZERO_VARIANCE_MIDPOINT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionLayout {
    pub gene_col: usize,
    pub mirna_col: usize,
    pub score_col: usize,
}

impl Default for PredictionLayout {
    fn default() -> Self {
        Self {
            gene_col: 0,
            mirna_col: 1,
            score_col: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntegratorConfig {
    pub max_threshold: f64,
    pub exclude: HashSet<String>,
    pub orientation: Orientation,
    pub zero_variance: ZeroVariancePolicy,
    pub top_k: usize,
    pub data_source: String,
    pub layout: PredictionLayout,
    pub gene_namespace: GeneNamespace,
    pub fallback_namespaces: Vec<GeneNamespace>,
}

impl IntegratorConfig {
    /// The May 2021 PITA run: free-energy cutoff of -13 kcal/mol, Ensembl gene IDs.
    pub fn pita_v1() -> Self {
        Self {
            max_threshold: -13.0,
            exclude: HashSet::new(),
            orientation: Orientation::ValueIsScore,
            zero_variance: ZeroVariancePolicy::Midpoint,
            top_k: DEFAULT_TOP_K,
            data_source: "PITA_May_2021".to_string(),
            layout: PredictionLayout::default(),
            gene_namespace: GeneNamespace::EnsemblGeneId,
            fallback_namespaces: Vec::new(),
        }
    }

    pub fn with_exclude(mut self, exclude: HashSet<String>) -> Self {
        self.exclude = exclude;
        self
    }
}
