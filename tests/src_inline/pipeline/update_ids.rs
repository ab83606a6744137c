use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::mirbase::{DEFAULT_CHANGED_EXT, DEFAULT_DEAD_EXT};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("mirdip_clean_update_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn row(symbol: &str, mirna: &str) -> ResourceRow {
    ResourceRow {
        symbol: symbol.to_string(),
        mirna_id: mirna.to_string(),
        raw_score: -15.0,
        normalized_score: 0.5,
        data_source: "PITA_May_2021".to_string(),
        original_gene_symbol: String::new(),
        original_mirna_id: String::new(),
    }
}

#[test]
fn test_apply_id_updates_renames_then_drops() {
    let renames = HashMap::from([
        ("hsa-miR-old".to_string(), "hsa-miR-new".to_string()),
        ("hsa-miR-doomed".to_string(), "hsa-miR-dead".to_string()),
    ]);
    let dead: HashSet<String> = ["hsa-miR-dead".to_string()].into_iter().collect();
    let rows = vec![
        row("TP53", "hsa-miR-old"),
        row("TP53", "hsa-miR-keep"),
        row("MYC", "hsa-miR-dead"),
        row("MYC", "hsa-miR-doomed"),
    ];
    let (out, stats) = apply_id_updates(
        rows,
        ResourceColumn::MirnaId,
        ResourceColumn::OriginalMirnaId,
        &renames,
        &dead,
    )
    .unwrap();
    assert_eq!(
        stats,
        IdUpdateStats {
            renamed: 2,
            dropped: 2
        }
    );
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].mirna_id, "hsa-miR-new");
    assert_eq!(out[0].original_mirna_id, "hsa-miR-old");
    assert_eq!(out[1].mirna_id, "hsa-miR-keep");
    assert_eq!(out[1].original_mirna_id, "hsa-miR-keep");
}

#[test]
fn test_apply_id_updates_rejects_score_columns() {
    let err = apply_id_updates(
        vec![row("A", "B")],
        ResourceColumn::RawScore,
        ResourceColumn::OriginalGeneSymbol,
        &HashMap::new(),
        &HashSet::new(),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidColumn(ref c) if c == "score"));
}

#[test]
fn test_resource_column_parse() {
    assert_eq!(ResourceColumn::parse("0").unwrap(), ResourceColumn::Symbol);
    assert_eq!(
        ResourceColumn::parse("mirdip4_mirbase_id").unwrap(),
        ResourceColumn::MirnaId
    );
    assert_eq!(
        ResourceColumn::parse("6").unwrap(),
        ResourceColumn::OriginalMirnaId
    );
    assert!(ResourceColumn::parse("7").is_err());
    assert!(ResourceColumn::parse("gene").is_err());
}

#[test]
fn test_run_update_ids_end_to_end() {
    let dir = make_temp_dir();
    let resource = dir.join("pita_clean.txt");
    write_file(
        &resource,
        "TP53\thsa-miR-old\t-15.0\t0.1\tPITA_May_2021\tENSG1\thsa-miR-old\n\
C10orf2\thsa-miR-keep\t-16.0\t0.2\tPITA_May_2021\tENSG2\thsa-miR-keep\n\
FLJ00001\thsa-miR-keep\t-17.0\t0.3\tPITA_May_2021\tENSG3\thsa-miR-keep\n\
MYC\thsa-miR-gone\t-18.0\t0.4\tPITA_May_2021\tENSG4\thsa-miR-gone\n\
broken\trow\n",
    );
    write_file(
        &PathBuf::from(format!("{}{}", resource.display(), DEFAULT_DEAD_EXT)),
        "hsa-miR-gone\t\t\n",
    );
    write_file(
        &PathBuf::from(format!("{}{}", resource.display(), DEFAULT_CHANGED_EXT)),
        "from\tto\taccession\nhsa-miR-old\thsa-miR-new\tMIMAT1\n",
    );
    let checker = dir.join("checker.csv");
    write_file(
        &checker,
        "banner line\nInput,Match type,Approved symbol\nC10orf2,Previous symbol,TWNK\nFLJ00001,Entry withdrawn,\n",
    );
    let outpath = dir.join("updated.txt");

    let params = UpdateIdsParams {
        path: resource,
        checker,
        outpath: outpath.clone(),
        format: TableFormat::default(),
        mirna_col: ResourceColumn::MirnaId,
        gene_col: ResourceColumn::Symbol,
        dead_ext: DEFAULT_DEAD_EXT.to_string(),
        changed_ext: DEFAULT_CHANGED_EXT.to_string(),
    };
    let summary = run_update_ids(&params).unwrap();
    assert_eq!(summary.rows_read, 5);
    assert_eq!(summary.malformed_rows, 1);
    assert_eq!(summary.mirnas_renamed, 1);
    assert_eq!(summary.mirna_rows_dropped, 1);
    assert_eq!(summary.genes_renamed, 1);
    assert_eq!(summary.gene_rows_dropped, 1);
    assert_eq!(summary.rows_written, 2);

    let written = fs::read_to_string(&outpath).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "TP53\thsa-miR-new\t-15.0\t0.1\tPITA_May_2021\tTP53\thsa-miR-old",
            "TWNK\thsa-miR-keep\t-16.0\t0.2\tPITA_May_2021\tC10orf2\thsa-miR-keep",
        ]
    );
}
