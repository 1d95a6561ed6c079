use anonopt_core::{Anonymizer, Level, Outcome, QualityStatistics, TransformError};

use crate::context::SearchContext;

/// Result of probing one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Scored(f64),
    /// The transform found no solution within the privacy limits.
    Infeasible,
}

impl Evaluation {
    /// Score used for ranking; infeasible candidates score 0.
    pub fn score(&self) -> f64 {
        match self {
            Evaluation::Scored(score) => *score,
            Evaluation::Infeasible => 0.0,
        }
    }
}

/// Mean of the average generalization intensity and the average non-uniform
/// entropy over the workload-bound quasi-identifiers.
///
/// Unavailable columns add nothing but still count in the divisor, which is
/// always the number of bound quasi-identifiers.
pub fn utility_score(statistics: &QualityStatistics, bound: &[String]) -> f64 {
    if bound.is_empty() {
        return 0.0;
    }
    let count = bound.len() as f64;
    let intensity: f64 = bound
        .iter()
        .filter_map(|qid| statistics.generalization_intensity.value(qid))
        .sum();
    let entropy: f64 = bound
        .iter()
        .filter_map(|qid| statistics.non_uniform_entropy.value(qid))
        .sum();
    (intensity / count + entropy / count) / 2.0
}

/// Pin `candidate`, re-run the transform and score its output.
pub fn evaluate<A>(
    ctx: &mut SearchContext<'_>,
    anonymizer: &A,
    candidate: &[Level],
) -> Result<Evaluation, TransformError>
where
    A: Anonymizer + ?Sized,
{
    ctx.pin_candidate(candidate);
    let config = *ctx.config();
    let dataset = ctx.dataset_mut();
    dataset.release_handle();
    match anonymizer.anonymize(dataset, &config)? {
        Outcome::Infeasible => Ok(Evaluation::Infeasible),
        Outcome::Feasible(result) => Ok(Evaluation::Scored(utility_score(
            &result.statistics,
            ctx.bound(),
        ))),
    }
}
