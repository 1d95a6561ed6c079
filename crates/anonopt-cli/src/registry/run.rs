use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use anonopt_core::QualityStatistics;
use anonopt_optimize::SearchReport;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::OptimizeConfig;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub config_path: PathBuf,
    pub config: OptimizeConfig,
}

/// JSON record written to `run.json`.
#[derive(Debug, Serialize)]
struct RunRecord<'a> {
    run_id: &'a str,
    started_at: String,
    config_path: &'a Path,
    config: &'a OptimizeConfig,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub result_path: PathBuf,
    pub output_path: PathBuf,
}

/// Anonymized output written next to the result.
#[derive(Debug, Clone, Serialize)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub suppressed_records: usize,
    pub statistics: QualityStatistics,
}

/// JSON document written to `result.json`.
#[derive(Debug, Serialize)]
pub struct RunResult<'a> {
    pub run_id: &'a str,
    pub workload_bound_qids: &'a [String],
    pub report: &'a SearchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSummary>,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));
    create_dir_all(&root)?;

    let record = RunRecord {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        config_path: &ctx.config_path,
        config: &ctx.config,
    };
    write_json(&root.join("run.json"), &record)?;

    let logs_path = root.join("logs.jsonl");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        logs_path,
        result_path: root.join("result.json"),
        output_path: root.join("anonymized.csv"),
        root,
    })
}

pub fn write_result(paths: &RunPaths, result: &RunResult<'_>) -> RegistryResult<()> {
    write_json(&paths.result_path, result)
}

pub fn write_output(
    paths: &RunPaths,
    header: &[String],
    rows: &[Vec<String>],
    delimiter: u8,
) -> RegistryResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(&paths.output_path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
