use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::error::ErrorKind;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("mirdip_clean_cli_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn integrate_args(extra: &[&str]) -> IntegrateArgs {
    let mut argv = vec![
        TOOL_NAME, "integrate", "--input", "pita.tab", "--hgnc", "hgnc.txt", "--out", "clean.txt",
    ];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Integrate(args) => args,
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_integrate_defaults() {
    let args = integrate_args(&[]);
    assert_eq!(args.input, PathBuf::from("pita.tab"));
    assert_eq!(args.sep, '\t');
    assert!(!args.header);
    assert_eq!(args.zero_variance, ZeroVariancePolicy::Midpoint);
    assert!(args.exclude.is_none());
    assert!(args.fallback_namespaces.is_empty());

    let config = build_integrator_config(&args).unwrap();
    assert_eq!(config.max_threshold, -13.0);
    assert_eq!(config.top_k, 3);
    assert_eq!(config.data_source, "PITA_May_2021");
    assert_eq!(config.gene_namespace, GeneNamespace::EnsemblGeneId);
    assert_eq!(config.layout, PredictionLayout::default());
}

#[test]
fn test_integrate_overrides() {
    let args = integrate_args(&[
        "--max-threshold",
        "-20.5",
        "--top-k",
        "2",
        "--orientation",
        "ascending-is-strong",
        "--zero-variance",
        "fail",
        "--data-source",
        "PITA_test",
        "--gene-namespace",
        "symbol",
        "--fallback-namespace",
        "alias_symbol",
        "--fallback-namespace",
        "prev_symbol",
        "--sep",
        ",",
        "--header",
    ]);
    assert_eq!(args.sep, ',');
    assert!(args.header);
    let config = build_integrator_config(&args).unwrap();
    assert_eq!(config.max_threshold, -20.5);
    assert_eq!(config.top_k, 2);
    assert_eq!(config.orientation, Orientation::AscendingIsStrong);
    assert_eq!(config.zero_variance, ZeroVariancePolicy::Fail);
    assert_eq!(config.data_source, "PITA_test");
    assert_eq!(config.gene_namespace, GeneNamespace::Symbol);
    assert_eq!(
        config.fallback_namespaces,
        vec![GeneNamespace::AliasSymbol, GeneNamespace::PrevSymbol]
    );
}

#[test]
fn test_integrate_missing_hgnc_is_usage_error() {
    let err = Cli::try_parse_from([TOOL_NAME, "integrate", "--input", "a", "--out", "b"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_integrate_rejects_zero_top_k() {
    let err = Cli::try_parse_from([
        TOOL_NAME, "integrate", "--input", "a", "--hgnc", "h", "--out", "b", "--top-k", "0",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_build_config_loads_exclude_file() {
    let dir = make_temp_dir();
    let exclude = dir.join("exclude.txt");
    fs::write(&exclude, "ENSG_A\n  ENSG_B  \n\n").unwrap();
    let exclude_arg = exclude.display().to_string();
    let args = integrate_args(&["--exclude", &exclude_arg]);
    let config = build_integrator_config(&args).unwrap();
    assert_eq!(config.exclude.len(), 2);
    assert!(config.exclude.contains("ENSG_B"));
}

#[test]
fn test_build_config_missing_exclude_file() {
    let dir = make_temp_dir();
    let missing = dir.join("absent.txt").display().to_string();
    let args = integrate_args(&["--exclude", &missing]);
    let err = build_integrator_config(&args).unwrap_err();
    assert!(matches!(err, PipelineError::Input(_)));
}

#[test]
fn test_apply_layout_overrides_given_columns() {
    let unchanged = apply_layout(PredictionLayout::default(), None, None, None);
    assert_eq!(unchanged, PredictionLayout::default());

    let custom = apply_layout(PredictionLayout::default(), Some(1), Some(0), Some(2));
    assert_eq!(custom.gene_col, 1);
    assert_eq!(custom.mirna_col, 0);
    assert_eq!(custom.score_col, 2);
}

#[test]
fn test_update_ids_defaults() {
    let cli = Cli::try_parse_from([
        TOOL_NAME, "update-ids", "-p", "clean.txt", "-k", "check.csv", "-o", "updated.txt",
    ])
    .unwrap();
    let Command::UpdateIds(args) = cli.command else {
        panic!("expected update-ids");
    };
    assert_eq!(args.mircol, ResourceColumn::MirnaId);
    assert_eq!(args.genecol, ResourceColumn::Symbol);
    assert_eq!(args.sep, '\t');
    assert_eq!(args.deadext, DEFAULT_DEAD_EXT);
    assert_eq!(args.changedext, DEFAULT_CHANGED_EXT);
}

#[test]
fn test_update_ids_column_positions() {
    let cli = Cli::try_parse_from([
        TOOL_NAME, "update-ids", "-p", "a", "-k", "b", "-o", "c", "-m", "1", "-g", "0",
    ])
    .unwrap();
    let Command::UpdateIds(args) = cli.command else {
        panic!("expected update-ids");
    };
    assert_eq!(args.mircol, ResourceColumn::MirnaId);
    assert_eq!(args.genecol, ResourceColumn::Symbol);

    let err = Cli::try_parse_from([
        TOOL_NAME, "update-ids", "-p", "a", "-k", "b", "-o", "c", "-m", "9",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}
