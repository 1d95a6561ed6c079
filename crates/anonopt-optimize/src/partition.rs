use anonopt_core::Workload;
use serde::{Deserialize, Serialize};

/// Split of the quasi-identifiers for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Referenced by the workload; pinned from the referenced values.
    pub bound: Vec<String>,
    /// Not referenced; searched exhaustively.
    pub free: Vec<String>,
}

/// Partition `qids` by workload membership, keeping input order on each side.
pub fn partition(qids: &[String], workload: &Workload) -> Partition {
    let (bound, free): (Vec<String>, Vec<String>) = qids
        .iter()
        .cloned()
        .partition(|qid| workload.contains(qid));
    Partition { bound, free }
}
