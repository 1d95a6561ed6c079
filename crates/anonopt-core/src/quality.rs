use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column-oriented quality measure. Columns the measure does not apply to
/// are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeasure {
    values: BTreeMap<String, f64>,
}

impl ColumnMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: f64) {
        self.values.insert(column.into(), value);
    }

    pub fn is_available(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    pub fn values(&self) -> &BTreeMap<String, f64> {
        &self.values
    }
}

/// Quality statistics of one anonymized output, each measure normalized to
/// `[0, 1]` with 1 meaning no information loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityStatistics {
    pub generalization_intensity: ColumnMeasure,
    pub non_uniform_entropy: ColumnMeasure,
}
