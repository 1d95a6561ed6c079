use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Error, Result, TransformError};
use crate::hierarchy::Level;
use crate::quality::QualityStatistics;

const SUPPRESSION_EPSILON: f64 = 1e-9;

/// Privacy parameters of one anonymization run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrivacyConfig {
    /// Minimum equivalence class size.
    pub k: usize,
    /// Maximum fraction of records that may be suppressed.
    pub suppression_limit: f64,
}

impl PrivacyConfig {
    pub fn new(k: usize, suppression_limit: f64) -> Result<Self> {
        let config = Self {
            k,
            suppression_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.suppression_limit) {
            return Err(Error::InvalidConfig(format!(
                "suppression limit {} is outside [0, 1]",
                self.suppression_limit
            )));
        }
        Ok(())
    }

    /// Largest number of records that may be suppressed out of `rows`.
    ///
    /// The product is nudged up before flooring so limits like `0.29` of 100
    /// records allow 29 rather than 28.
    pub fn max_suppressed(&self, rows: usize) -> usize {
        (self.suppression_limit * rows as f64 + SUPPRESSION_EPSILON).floor() as usize
    }
}

/// Feasible output of an anonymization transform.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymizationResult {
    /// Generalization level chosen per quasi-identifier.
    pub levels: BTreeMap<String, Level>,
    pub suppressed_records: usize,
    pub statistics: QualityStatistics,
    /// Transformed records, same column order as the input header.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Feasible(AnonymizationResult),
    /// No transformation within the bounds satisfies the privacy config.
    Infeasible,
}

/// An anonymization transform operating on a dataset's generalization bounds.
pub trait Anonymizer {
    /// Anonymize `dataset` within its current bounds.
    ///
    /// Implementations acquire the dataset handle; callers must release it
    /// before invoking the transform again.
    fn anonymize(
        &self,
        dataset: &mut Dataset,
        config: &PrivacyConfig,
    ) -> std::result::Result<Outcome, TransformError>;
}
