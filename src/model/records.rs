/// One row of a raw prediction batch after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub gene_id: String,
    pub mirna_id: String,
    pub raw_score: f64,
    pub data_source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub record: PredictionRecord,
    pub normalized_score: f64,
}

/// The seven-column cleaned resource row. Mapped records take this shape
/// before aggregation, and finalized pairs are written in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRow {
    pub symbol: String,
    pub mirna_id: String,
    pub raw_score: f64,
    pub normalized_score: f64,
    pub data_source: String,
    pub original_gene_symbol: String,
    pub original_mirna_id: String,
}

impl ResourceRow {
    pub fn text(&self, column: ResourceColumn) -> Option<&str> {
        match column {
            ResourceColumn::Symbol => Some(&self.symbol),
            ResourceColumn::MirnaId => Some(&self.mirna_id),
            ResourceColumn::DataSource => Some(&self.data_source),
            ResourceColumn::OriginalGeneSymbol => Some(&self.original_gene_symbol),
            ResourceColumn::OriginalMirnaId => Some(&self.original_mirna_id),
            ResourceColumn::RawScore | ResourceColumn::NormalizedScore => None,
        }
    }

    pub fn text_mut(&mut self, column: ResourceColumn) -> Option<&mut String> {
        match column {
            ResourceColumn::Symbol => Some(&mut self.symbol),
            ResourceColumn::MirnaId => Some(&mut self.mirna_id),
            ResourceColumn::DataSource => Some(&mut self.data_source),
            ResourceColumn::OriginalGeneSymbol => Some(&mut self.original_gene_symbol),
            ResourceColumn::OriginalMirnaId => Some(&mut self.original_mirna_id),
            ResourceColumn::RawScore | ResourceColumn::NormalizedScore => None,
        }
    }

    /// Exact identity of a row, floats compared bitwise.
    pub fn dedup_key(&self) -> (&str, &str, u64, u64, &str, &str, &str) {
        (
            &self.symbol,
            &self.mirna_id,
            self.raw_score.to_bits(),
            self.normalized_score.to_bits(),
            &self.data_source,
            &self.original_gene_symbol,
            &self.original_mirna_id,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceColumn {
    Symbol,
    MirnaId,
    RawScore,
    NormalizedScore,
    DataSource,
    OriginalGeneSymbol,
    OriginalMirnaId,
}

impl ResourceColumn {
    pub const ALL: [ResourceColumn; 7] = [
        ResourceColumn::Symbol,
        ResourceColumn::MirnaId,
        ResourceColumn::RawScore,
        ResourceColumn::NormalizedScore,
        ResourceColumn::DataSource,
        ResourceColumn::OriginalGeneSymbol,
        ResourceColumn::OriginalMirnaId,
    ];

    pub fn is_text(self) -> bool {
        !matches!(
            self,
            ResourceColumn::RawScore | ResourceColumn::NormalizedScore
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceColumn::Symbol => "symbol",
            ResourceColumn::MirnaId => "mirdip4_mirbase_id",
            ResourceColumn::RawScore => "score",
            ResourceColumn::NormalizedScore => "score_norm",
            ResourceColumn::DataSource => "data_source",
            ResourceColumn::OriginalGeneSymbol => "original_gene_symbol",
            ResourceColumn::OriginalMirnaId => "original_mirbase_id",
        }
    }

    /// Resolves a 0-based position or a column name.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if let Ok(idx) = raw.parse::<usize>() {
            return Self::ALL
                .get(idx)
                .copied()
                .ok_or_else(|| format!("column position {idx} out of range (0-6)"));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == raw)
            .ok_or_else(|| format!("unknown column {raw:?}"))
    }
}

/// Duplicate (symbol, microRNA) predictions collapsed into one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPair {
    pub symbol: String,
    pub mirna_id: String,
    pub raw_score: f64,
    pub combined_score: f64,
    pub n_merged: usize,
    pub data_source: String,
    pub original_gene_symbol: String,
    pub original_mirna_id: String,
}
