use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::authority::{AuthorityError, csv_error, require_column};
use crate::input::open_maybe_gz;

const GENE_ID_COLUMN: &str = "Gene stable ID";
const SYMBOL_COLUMN: &str = "HGNC symbol";

/// Ensembl gene to HGNC symbol fallback built from a BioMart export. Genes
/// with several distinct symbols map to the sorted symbols joined by `,`.
#[derive(Debug, Clone, Default)]
pub struct BiomartSymbols {
    pub by_gene: HashMap<String, String>,
}

impl BiomartSymbols {
    pub fn symbol(&self, ensembl_gene_id: &str) -> Option<&str> {
        self.by_gene.get(ensembl_gene_id).map(String::as_str)
    }
}

pub fn load_biomart(path: &Path) -> Result<BiomartSymbols, AuthorityError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(open_maybe_gz(path)?);
    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let gene_col = require_column(&headers, GENE_ID_COLUMN, path)?;
    let symbol_col = require_column(&headers, SYMBOL_COLUMN, path)?;

    let mut symbols: HashMap<String, BTreeSet<String>> = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(csv_error(path))?;
        let gene = record.get(gene_col).map(str::trim).unwrap_or("");
        if gene.is_empty() {
            continue;
        }
        let entry = symbols.entry(gene.to_string()).or_default();
        let symbol = record.get(symbol_col).map(str::trim).unwrap_or("");
        if !symbol.is_empty() {
            entry.insert(symbol.to_string());
        }
    }

    let by_gene: HashMap<String, String> = symbols
        .into_iter()
        .filter(|(_, set)| !set.is_empty())
        .map(|(gene, set)| (gene, set.into_iter().collect::<Vec<_>>().join(",")))
        .collect();
    tracing::info!(
        "loaded BioMart symbols for {} Ensembl genes from {}",
        by_gene.len(),
        path.display()
    );
    Ok(BiomartSymbols { by_gene })
}
