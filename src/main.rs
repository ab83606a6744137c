mod authority;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::authority::GeneNamespace;
use crate::input::exclude::load_exclude_set;
use crate::input::mirbase::{DEFAULT_CHANGED_EXT, DEFAULT_DEAD_EXT};
use crate::input::{TableFormat, parse_separator};
use crate::model::config::{IntegratorConfig, Orientation, PredictionLayout, ZeroVariancePolicy};
use crate::model::records::ResourceColumn;
use crate::pipeline::update_ids::{UpdateIdsParams, run_update_ids};
use crate::pipeline::{IntegratePaths, PipelineError, ScoreIntegrator, run_integrate};
use crate::report::json::{InputEntry, RunSummary, write_summary_json};

const TOOL_NAME: &str = "mirdip-clean";

#[derive(Debug, Parser)]
#[command(name = TOOL_NAME, version, about = "Clean, HGNC-map and integrate miRNA-target prediction scores")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Filter, normalize, map and aggregate one raw prediction batch.
    Integrate(IntegrateArgs),
    /// Refresh miRBase and HGNC identifiers of a cleaned resource file.
    UpdateIds(UpdateIdsArgs),
}

#[derive(Debug, Args)]
struct IntegrateArgs {
    /// Raw prediction file (tab-separated, no header; .gz accepted).
    #[arg(long)]
    input: PathBuf,
    /// HGNC complete set (hgnc_complete_set.txt).
    #[arg(long)]
    hgnc: PathBuf,
    /// Cleaned output file.
    #[arg(long)]
    out: PathBuf,
    /// Gene identifiers to drop, one per line.
    #[arg(long)]
    exclude: Option<PathBuf>,
    /// Ensembl BioMart export used where HGNC has no symbol.
    #[arg(long)]
    biomart: Option<PathBuf>,
    /// Write a JSON run summary here.
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Keep rows whose raw score is at most this value.
    #[arg(long, allow_negative_numbers = true)]
    max_threshold: Option<f64>,
    /// Number of smallest normalized scores multiplied per pair.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    top_k: Option<u32>,
    #[arg(long, value_enum)]
    orientation: Option<Orientation>,
    /// Behaviour when every score in a batch is equal.
    #[arg(long, value_enum, default_value_t = ZeroVariancePolicy::Midpoint)]
    zero_variance: ZeroVariancePolicy,
    #[arg(long)]
    data_source: Option<String>,
    #[arg(long)]
    gene_col: Option<usize>,
    #[arg(long)]
    mirna_col: Option<usize>,
    #[arg(long)]
    score_col: Option<usize>,
    /// Authority column the gene identifiers are joined on.
    #[arg(long, value_enum)]
    gene_namespace: Option<GeneNamespace>,
    /// Namespaces tried, in order, when the primary join finds nothing.
    #[arg(long = "fallback-namespace", value_enum)]
    fallback_namespaces: Vec<GeneNamespace>,
    #[arg(long, default_value = "\\t", value_parser = parse_separator)]
    sep: char,
    /// First line of the input is a header.
    #[arg(long)]
    header: bool,
}

#[derive(Debug, Args)]
struct UpdateIdsArgs {
    /// Cleaned resource file whose identifiers are refreshed.
    #[arg(short = 'p', long)]
    path: PathBuf,
    /// HGNC multi-symbol checker export (CSV).
    #[arg(short = 'k', long)]
    checker: PathBuf,
    #[arg(short = 'o', long)]
    outpath: PathBuf,
    #[arg(short = 's', long, default_value = "\\t", value_parser = parse_separator)]
    sep: char,
    #[arg(short = 'n', long)]
    header: bool,
    /// Column name or 0-based position of the microRNA ids.
    #[arg(short = 'm', long, default_value = "mirdip4_mirbase_id", value_parser = ResourceColumn::parse)]
    mircol: ResourceColumn,
    /// Column name or 0-based position of the gene symbols.
    #[arg(short = 'g', long, default_value = "symbol", value_parser = ResourceColumn::parse)]
    genecol: ResourceColumn,
    #[arg(short = 'd', long, default_value = DEFAULT_DEAD_EXT)]
    deadext: String,
    #[arg(short = 'c', long, default_value = DEFAULT_CHANGED_EXT)]
    changedext: String,
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Command::Integrate(args) => run_integrate_command(args),
        Command::UpdateIds(args) => run_update_ids_command(args),
    }
}

fn build_integrator_config(args: &IntegrateArgs) -> Result<IntegratorConfig, PipelineError> {
    let mut config = IntegratorConfig::pita_v1();
    if let Some(path) = &args.exclude {
        config = config.with_exclude(load_exclude_set(path)?);
    }
    if let Some(v) = args.max_threshold {
        config.max_threshold = v;
    }
    if let Some(k) = args.top_k {
        config.top_k = k as usize;
    }
    if let Some(orientation) = args.orientation {
        config.orientation = orientation;
    }
    config.zero_variance = args.zero_variance;
    if let Some(source) = &args.data_source {
        config.data_source = source.clone();
    }
    config.layout = apply_layout(
        config.layout,
        args.gene_col,
        args.mirna_col,
        args.score_col,
    );
    if let Some(ns) = args.gene_namespace {
        config.gene_namespace = ns;
    }
    config.fallback_namespaces = args.fallback_namespaces.clone();
    Ok(config)
}

fn apply_layout(
    mut layout: PredictionLayout,
    gene_col: Option<usize>,
    mirna_col: Option<usize>,
    score_col: Option<usize>,
) -> PredictionLayout {
    if let Some(c) = gene_col {
        layout.gene_col = c;
    }
    if let Some(c) = mirna_col {
        layout.mirna_col = c;
    }
    if let Some(c) = score_col {
        layout.score_col = c;
    }
    layout
}

fn run_integrate_command(args: IntegrateArgs) -> Result<(), PipelineError> {
    let config = build_integrator_config(&args)?;
    let integrator = ScoreIntegrator::new(config);
    let paths = IntegratePaths {
        input: args.input.clone(),
        hgnc: args.hgnc.clone(),
        biomart: args.biomart.clone(),
        out: args.out.clone(),
    };
    let format = TableFormat {
        sep: args.sep,
        header: args.header,
    };
    let counts = run_integrate(&integrator, &paths, format)?;

    if let Some(summary_path) = &args.summary {
        let mut inputs = vec![
            input_entry("predictions", &args.input),
            input_entry("hgnc", &args.hgnc),
        ];
        if let Some(p) = &args.exclude {
            inputs.push(input_entry("exclude", p));
        }
        if let Some(p) = &args.biomart {
            inputs.push(input_entry("biomart", p));
        }
        let summary = RunSummary {
            tool: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
            command: "integrate",
            inputs,
            counts,
        };
        write_summary_json(summary_path, &summary)?;
    }
    Ok(())
}

fn run_update_ids_command(args: UpdateIdsArgs) -> Result<(), PipelineError> {
    let params = UpdateIdsParams {
        path: args.path.clone(),
        checker: args.checker.clone(),
        outpath: args.outpath.clone(),
        format: TableFormat {
            sep: args.sep,
            header: args.header,
        },
        mirna_col: args.mircol,
        gene_col: args.genecol,
        dead_ext: args.deadext.clone(),
        changed_ext: args.changedext.clone(),
    };
    let counts = run_update_ids(&params)?;

    if let Some(summary_path) = &args.summary {
        let summary = RunSummary {
            tool: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
            command: "update-ids",
            inputs: vec![
                input_entry("resource", &args.path),
                input_entry("checker", &args.checker),
            ],
            counts,
        };
        write_summary_json(summary_path, &summary)?;
    }
    Ok(())
}

fn input_entry(role: &'static str, path: &std::path::Path) -> InputEntry {
    InputEntry {
        role,
        path: path.display().to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
