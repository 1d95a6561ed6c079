//! Workload-aware selection of generalization levels.
//!
//! Quasi-identifiers referenced by an analytical workload are pinned to the
//! lowest level that keeps every referenced value intact. The remaining
//! quasi-identifiers are searched exhaustively: every combination of their
//! levels is anonymized and scored, and the best one is committed to the
//! dataset definition.

pub mod context;
pub mod enumerate;
pub mod evaluate;
pub mod partition;
pub mod report;
pub mod resolve;
pub mod search;

pub use context::SearchContext;
pub use enumerate::{Candidate, Combinations, free_depths};
pub use evaluate::{Evaluation, evaluate, utility_score};
pub use partition::{Partition, partition};
pub use report::{REPORT_VERSION, SearchReport};
pub use resolve::{resolve_bound_level, resolve_bound_levels};
pub use search::Optimizer;
