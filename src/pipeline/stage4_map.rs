use std::collections::HashSet;

use crate::authority::biomart::BiomartSymbols;
use crate::authority::{AuthorityTable, GeneNamespace, NamespaceIndex, Resolution};
use crate::model::records::{NormalizedRecord, ResourceRow};

/// Resolves input gene identifiers to canonical symbols. Namespaces are tried
/// in order (primary first), then the BioMart fallback.
pub struct GeneMapper<'a> {
    indices: Vec<NamespaceIndex<'a>>,
    biomart: Option<&'a BiomartSymbols>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolMatch {
    Unmapped,
    Unique(String),
    Ambiguous { symbol: String, matches: usize },
}

impl<'a> GeneMapper<'a> {
    pub fn new(
        table: &'a AuthorityTable,
        primary: GeneNamespace,
        fallbacks: &[GeneNamespace],
        biomart: Option<&'a BiomartSymbols>,
    ) -> Self {
        let mut namespaces = vec![primary];
        for &ns in fallbacks {
            if !namespaces.contains(&ns) {
                namespaces.push(ns);
            }
        }
        let indices: Vec<NamespaceIndex<'a>> =
            namespaces.into_iter().map(|ns| table.index(ns)).collect();
        for index in &indices {
            tracing::debug!(
                "indexed {} identifiers for namespace {}",
                index.len(),
                index.namespace.column_name()
            );
        }
        Self { indices, biomart }
    }

    pub fn resolve(&self, id: &str) -> SymbolMatch {
        for index in &self.indices {
            match index.resolve(id) {
                Resolution::Unmapped => continue,
                Resolution::Unique(row) => return SymbolMatch::Unique(row.symbol.clone()),
                Resolution::Ambiguous { first, matches } => {
                    return SymbolMatch::Ambiguous {
                        symbol: first.symbol.clone(),
                        matches,
                    };
                }
            }
        }
        match self.biomart.and_then(|b| b.symbol(id)) {
            Some(symbol) => SymbolMatch::Unique(symbol.to_string()),
            None => SymbolMatch::Unmapped,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapOutcome {
    pub rows: Vec<ResourceRow>,
    pub unmapped: usize,
    pub ambiguous: usize,
}

/// Left-joins normalized records onto the authority table and drops records
/// without a symbol. The original-identifier columns stay empty until the
/// pairs are finalized.
pub fn map_to_symbols(records: Vec<NormalizedRecord>, mapper: &GeneMapper<'_>) -> MapOutcome {
    let mut out = MapOutcome::default();
    let mut ambiguous_ids: HashSet<String> = HashSet::new();

    for NormalizedRecord {
        record,
        normalized_score,
    } in records
    {
        let symbol = match mapper.resolve(&record.gene_id) {
            SymbolMatch::Unmapped => {
                out.unmapped += 1;
                continue;
            }
            SymbolMatch::Unique(symbol) => symbol,
            SymbolMatch::Ambiguous { symbol, matches } => {
                out.ambiguous += 1;
                if ambiguous_ids.insert(record.gene_id.clone()) {
                    tracing::debug!(
                        "{} matches {} authority rows; using {}",
                        record.gene_id,
                        matches,
                        symbol
                    );
                }
                symbol
            }
        };
        out.rows.push(ResourceRow {
            symbol,
            mirna_id: record.mirna_id,
            raw_score: record.raw_score,
            normalized_score,
            data_source: record.data_source,
            original_gene_symbol: String::new(),
            original_mirna_id: String::new(),
        });
    }

    if out.unmapped > 0 {
        tracing::warn!("dropped {} records with no authority symbol", out.unmapped);
    }
    if out.ambiguous > 0 {
        tracing::warn!(
            "{} records ({} distinct identifiers) matched several authority rows; first match kept",
            out.ambiguous,
            ambiguous_ids.len()
        );
    }
    out
}

/// Removes exact duplicate rows, keeping the first occurrence.
pub fn dedup_rows(rows: Vec<ResourceRow>) -> (Vec<ResourceRow>, usize) {
    let before = rows.len();
    let keep: Vec<bool> = {
        let mut seen = HashSet::new();
        rows.iter().map(|row| seen.insert(row.dedup_key())).collect()
    };
    let mut flags = keep.into_iter();
    let kept: Vec<ResourceRow> = rows
        .into_iter()
        .filter(|_| flags.next().unwrap_or(false))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_map.rs"]
mod tests;
