pub mod json;
pub mod tsv;

/// Shortest representation that parses back to the same `f64`, always with a
/// decimal point or exponent.
pub fn format_score(v: f64) -> String {
    format!("{v:?}")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
