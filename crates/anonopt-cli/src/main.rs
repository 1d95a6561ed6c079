mod config;
mod input;
mod registry;

use std::path::PathBuf;
use std::time::Instant;

use anonopt_core::{Anonymizer, Outcome, TransformError};
use anonopt_optimize::Optimizer;
use anonopt_transform::KAnonymityEngine;
use clap::{Args, Parser, Subcommand};
use config::{ConfigError, OptimizeConfig};
use input::{InputError, load_inputs};
use registry::{
    OutputSummary, RunContext, RunResult, init_run_logging, start_run, write_output, write_result,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("core error: {0}")]
    Core(#[from] anonopt_core::Error),
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

#[derive(Parser, Debug)]
#[command(name = "anonopt", version, about = "Workload-aware generalization optimizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick generalization levels for every quasi-identifier and anonymize.
    Optimize(OptimizeArgs),
}

#[derive(Args, Debug)]
struct OptimizeArgs {
    /// Path to anonopt.toml.
    #[arg(long, default_value = "anonopt.toml")]
    config: PathBuf,
    /// Override the k-anonymity threshold.
    #[arg(long)]
    k: Option<usize>,
    /// Override the suppression limit (fraction of records).
    #[arg(long)]
    suppression_limit: Option<f64>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Optimize(args) => {
            let run_root = run_optimize(args)?;
            println!("{}", run_root.display());
            Ok(())
        }
    }
}

/// Run one optimization and return the run directory.
fn run_optimize(args: OptimizeArgs) -> Result<PathBuf, CliError> {
    let OptimizeArgs {
        config: config_path,
        k,
        suppression_limit,
        run_dir,
    } = args;

    let mut config = OptimizeConfig::load(&config_path)?;
    if let Some(k) = k {
        config.k = k;
    }
    if let Some(limit) = suppression_limit {
        config.suppression_limit = limit;
    }
    config.validate()?;
    let privacy = config.privacy()?;
    let delimiter = config.delimiter_byte()?;

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir,
        config_path,
        config: config.clone(),
    };
    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, k = privacy.k);
    let timer = Instant::now();

    let inputs = load_inputs(&config, delimiter)?;
    tracing::info!(
        event = "inputs_loaded",
        rows = inputs.dataset.rows().len(),
        quasi_identifiers = config.quasi_identifiers.len(),
        hierarchies = config.hierarchies.len()
    );
    for qid in &config.quasi_identifiers {
        if inputs.dataset.column_index(qid).is_none() {
            tracing::warn!(event = "qid_not_in_dataset", qid = %qid);
        }
    }

    let engine = KAnonymityEngine::new();
    let mut optimizer = Optimizer::new(
        privacy,
        inputs.dataset,
        config.quasi_identifiers.clone(),
        inputs.workload,
    )?;
    let report = optimizer.run(&engine).clone();
    let bound_qids = optimizer.workload_bound_qids().to_vec();

    let mut dataset = optimizer.into_dataset();
    dataset.release_handle();
    let output = match engine.anonymize(&mut dataset, &privacy)? {
        Outcome::Feasible(result) => {
            write_output(&run_paths, dataset.header(), &result.rows, delimiter)?;
            tracing::info!(
                event = "output_written",
                path = %run_paths.output_path.display(),
                suppressed = result.suppressed_records
            );
            Some(OutputSummary {
                path: run_paths.output_path.clone(),
                rows: result.rows.len(),
                suppressed_records: result.suppressed_records,
                statistics: result.statistics,
            })
        }
        Outcome::Infeasible => {
            tracing::warn!(event = "output_infeasible");
            None
        }
    };

    write_result(
        &run_paths,
        &RunResult {
            run_id: &run_id,
            workload_bound_qids: &bound_qids,
            report: &report,
            output,
        },
    )?;
    tracing::info!(event = "result_written", path = %run_paths.result_path.display());

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(run_paths.root)
}
