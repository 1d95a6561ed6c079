use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hierarchy::{Hierarchy, Level};

/// Allowed generalization range for one quasi-identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralizationBounds {
    pub min: Level,
    pub max: Level,
}

impl GeneralizationBounds {
    /// Bounds that allow exactly one level.
    pub fn pinned(level: Level) -> Self {
        Self {
            min: level,
            max: level,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.min == self.max
    }
}

/// Attribute definition of a dataset: hierarchies and generalization bounds
/// per quasi-identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataDefinition {
    hierarchies: BTreeMap<String, Hierarchy>,
    bounds: BTreeMap<String, GeneralizationBounds>,
}

impl DataDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hierarchy(&mut self, qid: impl Into<String>, hierarchy: Hierarchy) {
        self.hierarchies.insert(qid.into(), hierarchy);
    }

    pub fn hierarchy(&self, qid: &str) -> Option<&Hierarchy> {
        self.hierarchies.get(qid)
    }

    /// Column count of the hierarchy for `qid`, 0 when none is defined.
    pub fn hierarchy_depth(&self, qid: &str) -> usize {
        self.hierarchy(qid).map(Hierarchy::depth).unwrap_or(0)
    }

    /// Quasi-identifiers that have a hierarchy, in name order.
    pub fn quasi_identifiers(&self) -> impl Iterator<Item = &str> {
        self.hierarchies.keys().map(String::as_str)
    }

    pub fn set_generalization_bounds(&mut self, qid: &str, min: Level, max: Level) {
        self.bounds
            .insert(qid.to_string(), GeneralizationBounds { min, max });
    }

    pub fn pin(&mut self, qid: &str, level: Level) {
        self.set_generalization_bounds(qid, level, level);
    }

    /// Explicit bounds for `qid`, if any were set.
    pub fn bounds(&self, qid: &str) -> Option<GeneralizationBounds> {
        self.bounds.get(qid).copied()
    }

    pub fn all_bounds(&self) -> &BTreeMap<String, GeneralizationBounds> {
        &self.bounds
    }
}
