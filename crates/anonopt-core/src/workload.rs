use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::qid::normalize_qid;

/// Condition label to referenced values.
pub type ConditionMap = BTreeMap<String, Vec<String>>;

/// Values an analytical workload references, grouped by quasi-identifier and
/// condition label.
///
/// Keys are stored normalized (see [`normalize_qid`]); raw keys that normalize
/// to the same attribute are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ConditionMap>",
    into = "BTreeMap<String, ConditionMap>"
)]
pub struct Workload {
    attributes: BTreeMap<String, ConditionMap>,
}

impl Workload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `values` under `condition` for `qid`.
    pub fn insert<I, S>(&mut self, qid: &str, condition: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .entry(normalize_qid(qid))
            .or_default()
            .entry(condition.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    pub fn contains(&self, qid: &str) -> bool {
        self.attributes.contains_key(&normalize_qid(qid))
    }

    pub fn conditions(&self, qid: &str) -> Option<&ConditionMap> {
        self.attributes.get(&normalize_qid(qid))
    }

    /// Every value referenced for `qid`, across all condition groups.
    pub fn referenced_values(&self, qid: &str) -> Vec<&str> {
        self.conditions(qid)
            .map(|conditions| {
                conditions
                    .values()
                    .flatten()
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Normalized attribute names present in the workload.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl From<BTreeMap<String, ConditionMap>> for Workload {
    fn from(raw: BTreeMap<String, ConditionMap>) -> Self {
        let mut workload = Workload::new();
        for (qid, conditions) in raw {
            for (condition, values) in conditions {
                workload.insert(&qid, condition, values);
            }
        }
        workload
    }
}

impl From<Workload> for BTreeMap<String, ConditionMap> {
    fn from(workload: Workload) -> Self {
        workload.attributes
    }
}
