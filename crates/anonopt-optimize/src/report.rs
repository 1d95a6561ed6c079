use std::collections::BTreeMap;

use anonopt_core::{Level, PrivacyConfig};
use serde::{Deserialize, Serialize};

/// Report contract version for `result.json` artifacts.
pub const REPORT_VERSION: &str = "0.1";

/// Summary of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub report_version: String,
    pub config: PrivacyConfig,
    pub bound_qids: Vec<String>,
    pub free_qids: Vec<String>,
    /// Levels pinned from the workload.
    pub bound_levels: BTreeMap<String, Level>,
    /// Levels committed by the search.
    pub free_levels: BTreeMap<String, Level>,
    pub best_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_total: Option<usize>,
    pub candidates_evaluated: u64,
    pub infeasible: u64,
    pub failed: u64,
    pub elapsed_ms: u128,
}

impl SearchReport {
    /// Committed level of every quasi-identifier.
    pub fn assignment(&self) -> BTreeMap<String, Level> {
        self.bound_levels
            .iter()
            .chain(&self.free_levels)
            .map(|(qid, level)| (qid.clone(), *level))
            .collect()
    }
}
