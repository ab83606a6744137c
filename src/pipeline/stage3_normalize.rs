use thiserror::Error;

use crate::model::config::{Orientation, ZERO_VARIANCE_MIDPOINT, ZeroVariancePolicy};
use crate::model::records::{NormalizedRecord, PredictionRecord};

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("cannot normalize an empty batch")]
    EmptyBatch,
    #[error("zero-variance batch: every score equals {value}")]
    ZeroVariance { value: f64 },
}

pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Min-max rescales `values` into [0, 1].
pub fn rescale(
    values: &[f64],
    orientation: Orientation,
    policy: ZeroVariancePolicy,
) -> Result<Vec<f64>, NormalizeError> {
    let (lo, hi) = min_max(values).ok_or(NormalizeError::EmptyBatch)?;
    let span = hi - lo;
    if span == 0.0 {
        return match policy {
            ZeroVariancePolicy::Midpoint => {
                tracing::warn!(
                    "all {} scores equal {}; assigning {} to every record",
                    values.len(),
                    lo,
                    ZERO_VARIANCE_MIDPOINT
                );
                Ok(vec![ZERO_VARIANCE_MIDPOINT; values.len()])
            }
            ZeroVariancePolicy::Fail => Err(NormalizeError::ZeroVariance { value: lo }),
        };
    }
    Ok(values
        .iter()
        .map(|&v| {
            let x = ((v - lo) / span).clamp(0.0, 1.0);
            match orientation {
                Orientation::ValueIsScore => x,
                Orientation::AscendingIsStrong => 1.0 - x,
            }
        })
        .collect())
}

pub fn normalize(
    records: Vec<PredictionRecord>,
    orientation: Orientation,
    policy: ZeroVariancePolicy,
) -> Result<Vec<NormalizedRecord>, NormalizeError> {
    let values: Vec<f64> = records.iter().map(|r| r.raw_score).collect();
    let scores = rescale(&values, orientation, policy)?;
    Ok(records
        .into_iter()
        .zip(scores)
        .map(|(record, normalized_score)| NormalizedRecord {
            record,
            normalized_score,
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_normalize.rs"]
mod tests;
