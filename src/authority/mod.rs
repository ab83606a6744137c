use std::collections::HashMap;
use std::path::Path;

use csv::StringRecord;
use thiserror::Error;

use crate::input::InputError;

pub mod biomart;
pub mod checker;
pub mod hgnc;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: String, column: String },
    #[error("{path}: {msg}")]
    Malformed { path: String, msg: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum GeneNamespace {
    #[value(name = "symbol")]
    Symbol,
    #[value(name = "alias_symbol")]
    AliasSymbol,
    #[value(name = "prev_symbol")]
    PrevSymbol,
    #[value(name = "entrez_id")]
    EntrezId,
    #[value(name = "ensembl_gene_id")]
    EnsemblGeneId,
    #[value(name = "refseq_accession")]
    RefseqAccession,
    #[value(name = "uniprot_ids")]
    UniprotIds,
}

impl GeneNamespace {
    pub const ALL: [GeneNamespace; 7] = [
        GeneNamespace::Symbol,
        GeneNamespace::AliasSymbol,
        GeneNamespace::PrevSymbol,
        GeneNamespace::EntrezId,
        GeneNamespace::EnsemblGeneId,
        GeneNamespace::RefseqAccession,
        GeneNamespace::UniprotIds,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            GeneNamespace::Symbol => "symbol",
            GeneNamespace::AliasSymbol => "alias_symbol",
            GeneNamespace::PrevSymbol => "prev_symbol",
            GeneNamespace::EntrezId => "entrez_id",
            GeneNamespace::EnsemblGeneId => "ensembl_gene_id",
            GeneNamespace::RefseqAccession => "refseq_accession",
            GeneNamespace::UniprotIds => "uniprot_ids",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorityRow {
    pub symbol: String,
    pub ids: [Vec<String>; 7],
}

impl AuthorityRow {
    pub fn values(&self, ns: GeneNamespace) -> &[String] {
        &self.ids[ns.slot()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthorityTable {
    pub rows: Vec<AuthorityRow>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Unmapped,
    Unique(&'a AuthorityRow),
    /// Several rows matched; the first in table order is kept.
    Ambiguous { first: &'a AuthorityRow, matches: usize },
}

/// Each value of a multi-valued cell is its own key.
#[derive(Debug, Clone)]
pub struct NamespaceIndex<'a> {
    pub namespace: GeneNamespace,
    table: &'a AuthorityTable,
    by_id: HashMap<&'a str, Vec<u32>>,
}

impl AuthorityTable {
    pub fn index(&self, namespace: GeneNamespace) -> NamespaceIndex<'_> {
        let mut by_id: HashMap<&str, Vec<u32>> = HashMap::new();
        for (idx, row) in self.rows.iter().enumerate() {
            for value in row.values(namespace) {
                let rows = by_id.entry(value.as_str()).or_default();
                // A value repeated inside one cell still counts once.
                if rows.last() != Some(&(idx as u32)) {
                    rows.push(idx as u32);
                }
            }
        }
        NamespaceIndex {
            namespace,
            table: self,
            by_id,
        }
    }
}

impl<'a> NamespaceIndex<'a> {
    pub fn resolve(&self, id: &str) -> Resolution<'a> {
        match self.by_id.get(id).map(|rows| rows.as_slice()) {
            None | Some([]) => Resolution::Unmapped,
            Some([only]) => Resolution::Unique(&self.table.rows[*only as usize]),
            Some(rows) => Resolution::Ambiguous {
                first: &self.table.rows[rows[0] as usize],
                matches: rows.len(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}

pub(crate) fn csv_error(path: &Path) -> impl Fn(csv::Error) -> AuthorityError + '_ {
    move |source| AuthorityError::Csv {
        path: path.display().to_string(),
        source,
    }
}

pub(crate) fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

pub(crate) fn require_column(
    headers: &StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, AuthorityError> {
    find_column(headers, name).ok_or_else(|| AuthorityError::MissingColumn {
        path: path.display().to_string(),
        column: name.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/authority/tests.rs"]
mod tests;
