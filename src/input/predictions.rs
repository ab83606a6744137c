use std::io::BufRead;
use std::path::Path;

use crate::input::{InputError, TableFormat, open_maybe_gz, trim_line_end};
use crate::model::config::PredictionLayout;
use crate::model::records::PredictionRecord;

#[derive(Debug, Clone, Default)]
pub struct PredictionBatch {
    pub records: Vec<PredictionRecord>,
    pub rows_read: usize,
    pub malformed: usize,
}

pub fn read_predictions(
    path: &Path,
    format: TableFormat,
    layout: &PredictionLayout,
    data_source: &str,
) -> Result<PredictionBatch, InputError> {
    check_layout(layout)?;
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut batch = PredictionBatch::default();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        if format.header && line_no == 1 {
            continue;
        }
        let line = trim_line_end(&buf);
        if line.trim().is_empty() {
            continue;
        }
        batch.rows_read += 1;
        match parse_prediction_line(line, format.sep, layout, data_source) {
            Some(record) => batch.records.push(record),
            None => {
                batch.malformed += 1;
                tracing::debug!(line = line_no, "dropping malformed prediction row");
            }
        }
    }

    if batch.malformed > 0 {
        tracing::warn!(
            "dropped {} malformed prediction rows out of {} in {}",
            batch.malformed,
            batch.rows_read,
            path.display()
        );
    }

    Ok(batch)
}

fn check_layout(layout: &PredictionLayout) -> Result<(), InputError> {
    let mut cols = vec![layout.gene_col, layout.mirna_col, layout.score_col];
    let n = cols.len();
    cols.sort_unstable();
    cols.dedup();
    if cols.len() != n {
        return Err(InputError::InvalidInput(format!(
            "column layout reuses a position: gene {}, microRNA {}, score {}",
            layout.gene_col, layout.mirna_col, layout.score_col
        )));
    }
    Ok(())
}

/// Returns `None` for rows with too few columns, an empty identifier or a
/// score that is not a finite number.
pub fn parse_prediction_line(
    line: &str,
    sep: char,
    layout: &PredictionLayout,
    data_source: &str,
) -> Option<PredictionRecord> {
    let cols: Vec<&str> = line.split(sep).collect();
    let gene_id = cols.get(layout.gene_col)?.trim();
    let mirna_id = cols.get(layout.mirna_col)?.trim();
    if gene_id.is_empty() || mirna_id.is_empty() {
        return None;
    }
    let raw_score = parse_finite(cols.get(layout.score_col)?)?;

    Some(PredictionRecord {
        gene_id: gene_id.to_string(),
        mirna_id: mirna_id.to_string(),
        raw_score,
        data_source: data_source.to_string(),
    })
}

pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
