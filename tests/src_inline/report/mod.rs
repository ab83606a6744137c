use std::fs;

use super::json::{InputEntry, RunSummary, UpdateIdsSummary, write_summary_json};
use super::*;

#[test]
fn test_format_score_round_trips() {
    for v in [-15.0, 0.0, 1.0, 0.1 + 0.2, 1e-7, -13.25] {
        let text = format_score(v);
        assert_eq!(text.parse::<f64>().unwrap(), v);
    }
    assert_eq!(format_score(-15.0), "-15.0");
    assert_eq!(format_score(0.5), "0.5");
}

#[test]
fn test_write_summary_json() {
    let dir = std::env::temp_dir().join(format!("mirdip_clean_report_{}", std::process::id()));
    let path = dir.join("summary.json");
    let summary = RunSummary {
        tool: "mirdip-clean",
        version: "0.1.0",
        command: "update-ids",
        inputs: vec![InputEntry {
            role: "resource",
            path: "pita_clean.txt".to_string(),
        }],
        counts: UpdateIdsSummary {
            rows_read: 10,
            malformed_rows: 1,
            mirnas_renamed: 2,
            mirna_rows_dropped: 1,
            genes_renamed: 3,
            gene_rows_dropped: 0,
            rows_written: 8,
        },
    };
    write_summary_json(&path, &summary).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["tool"], "mirdip-clean");
    assert_eq!(value["command"], "update-ids");
    assert_eq!(value["inputs"][0]["role"], "resource");
    assert_eq!(value["counts"]["rows_written"], 8);
    assert_eq!(value["counts"]["mirnas_renamed"], 2);
}
