use std::collections::BTreeMap;
use std::time::Instant;

use anonopt_core::{Anonymizer, Dataset, Level, PrivacyConfig, Result, Workload};
use tracing::{debug, info, warn};

use crate::context::SearchContext;
use crate::enumerate::{Candidate, Combinations, free_depths};
use crate::evaluate::{Evaluation, evaluate};
use crate::partition::{Partition, partition};
use crate::report::{REPORT_VERSION, SearchReport};
use crate::resolve::resolve_bound_levels;

/// Selects and commits a generalization level for every quasi-identifier.
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: PrivacyConfig,
    dataset: Dataset,
    quasi_identifiers: Vec<String>,
    workload: Workload,
    partition: Partition,
    report: Option<SearchReport>,
}

impl Optimizer {
    pub fn new(
        config: PrivacyConfig,
        dataset: Dataset,
        quasi_identifiers: Vec<String>,
        workload: Workload,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            dataset,
            quasi_identifiers,
            workload,
            partition: Partition::default(),
            report: None,
        })
    }

    /// Resolve workload-bound levels, search the free levels and pin the
    /// winner. Transform failures only affect the candidate they occur on.
    pub fn run<A>(&mut self, anonymizer: &A) -> &SearchReport
    where
        A: Anonymizer + ?Sized,
    {
        let start = Instant::now();
        self.partition = partition(&self.quasi_identifiers, &self.workload);
        info!(
            event = "search_started",
            k = self.config.k,
            suppression_limit = self.config.suppression_limit,
            bound = self.partition.bound.len(),
            free = self.partition.free.len()
        );

        let bound_levels = resolve_bound_levels(
            self.dataset.definition_mut(),
            &self.partition.bound,
            &self.workload,
        );

        let depths = free_depths(self.dataset.definition(), &self.partition.free);
        let candidates = Combinations::new(&depths);
        let candidates_total = candidates.total();

        let mut ctx = SearchContext::new(
            &mut self.dataset,
            self.config,
            &self.partition.bound,
            &self.partition.free,
        );
        let summary = drive(&mut ctx, anonymizer, candidates);
        ctx.pin_candidate(&summary.best);

        let free_levels: BTreeMap<String, Level> = self
            .partition
            .free
            .iter()
            .cloned()
            .zip(summary.best.iter().copied())
            .collect();
        let elapsed_ms = start.elapsed().as_millis();
        info!(
            event = "search_finished",
            best_score = summary.best_score,
            evaluated = summary.evaluated,
            infeasible = summary.infeasible,
            failed = summary.failed,
            duration_ms = elapsed_ms
        );

        self.report.insert(SearchReport {
            report_version: REPORT_VERSION.to_string(),
            config: self.config,
            bound_qids: self.partition.bound.clone(),
            free_qids: self.partition.free.clone(),
            bound_levels,
            free_levels,
            best_score: summary.best_score,
            candidates_total,
            candidates_evaluated: summary.evaluated,
            infeasible: summary.infeasible,
            failed: summary.failed,
            elapsed_ms,
        })
    }

    /// The dataset with every quasi-identifier pinned (after [`run`](Self::run)).
    pub fn optimized_dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// Quasi-identifiers constrained by the workload in the last run.
    pub fn workload_bound_qids(&self) -> &[String] {
        &self.partition.bound
    }

    pub fn report(&self) -> Option<&SearchReport> {
        self.report.as_ref()
    }
}

struct SearchSummary {
    best: Candidate,
    best_score: f64,
    evaluated: u64,
    infeasible: u64,
    failed: u64,
}

fn drive<A, I>(ctx: &mut SearchContext<'_>, anonymizer: &A, candidates: I) -> SearchSummary
where
    A: Anonymizer + ?Sized,
    I: IntoIterator<Item = Candidate>,
{
    let mut summary = SearchSummary {
        best: vec![0; ctx.free().len()],
        best_score: 0.0,
        evaluated: 0,
        infeasible: 0,
        failed: 0,
    };

    for candidate in candidates {
        summary.evaluated += 1;
        let score = match evaluate(ctx, anonymizer, &candidate) {
            Ok(Evaluation::Scored(score)) => score,
            Ok(Evaluation::Infeasible) => {
                summary.infeasible += 1;
                0.0
            }
            Err(err) => {
                summary.failed += 1;
                warn!(
                    event = "candidate_failed",
                    candidate = ?candidate,
                    error = %err
                );
                0.0
            }
        };
        debug!(event = "candidate_evaluated", candidate = ?candidate, score = score);

        if score > summary.best_score {
            summary.best_score = score;
            summary.best = candidate;
        }
    }

    summary
}
