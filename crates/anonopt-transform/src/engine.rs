use std::collections::{BTreeMap, HashMap};

use anonopt_core::{
    AnonymizationResult, Anonymizer, Dataset, GeneralizationBounds, Hierarchy, Level,
    LevelProduct, Outcome, PrivacyConfig, QualityStatistics, SUPPRESSED_VALUE, TransformError,
};
use tracing::debug;

use crate::quality::measure_quality;

/// Full-domain k-anonymity transform with record suppression.
///
/// Every lattice node inside the dataset's generalization bounds is checked;
/// the feasible node with the highest mean column quality is the optimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct KAnonymityEngine;

impl KAnonymityEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Anonymizer for KAnonymityEngine {
    fn anonymize(
        &self,
        dataset: &mut Dataset,
        config: &PrivacyConfig,
    ) -> Result<Outcome, TransformError> {
        config.validate()?;
        let handle = dataset.acquire_handle()?.id();
        debug!(event = "handle_acquired", handle = %handle);

        let dataset: &Dataset = dataset;
        let columns = resolve_columns(dataset)?;
        let ranges = columns
            .iter()
            .map(|column| column.bounds.min..column.bounds.max + 1)
            .collect();

        let mut best: Option<NodeResult> = None;
        let mut nodes_checked = 0usize;
        for node in LevelProduct::new(ranges) {
            nodes_checked += 1;
            let Some(result) = check_node(&columns, &node, dataset.rows().len(), config) else {
                continue;
            };
            if best
                .as_ref()
                .is_none_or(|current| result.utility > current.utility)
            {
                best = Some(result);
            }
        }

        debug!(
            event = "lattice_searched",
            nodes = nodes_checked,
            feasible = best.is_some()
        );

        Ok(match best {
            Some(node) => Outcome::Feasible(node.into_result(&columns, dataset)),
            None => Outcome::Infeasible,
        })
    }
}

/// A quasi-identifier column resolved against its hierarchy.
pub(crate) struct QidColumn<'a> {
    pub name: &'a str,
    pub index: usize,
    pub hierarchy: &'a Hierarchy,
    pub bounds: GeneralizationBounds,
    /// Hierarchy row holding each record's generalization chain.
    pub chains: Vec<usize>,
}

impl QidColumn<'_> {
    pub fn cell(&self, record: usize, level: Level) -> &str {
        &self.hierarchy.rows()[self.chains[record]][level]
    }
}

fn resolve_columns(dataset: &Dataset) -> Result<Vec<QidColumn<'_>>, TransformError> {
    let definition = dataset.definition();
    let mut columns = Vec::new();

    for name in definition.quasi_identifiers() {
        let index = dataset
            .column_index(name)
            .ok_or_else(|| TransformError::UnknownColumn(name.to_string()))?;
        let hierarchy = definition
            .hierarchy(name)
            .filter(|hierarchy| !hierarchy.is_empty())
            .ok_or_else(|| TransformError::MissingHierarchy(name.to_string()))?;

        let height = hierarchy.height();
        let bounds = definition.bounds(name).unwrap_or(GeneralizationBounds {
            min: 0,
            max: height,
        });
        if bounds.min > bounds.max || bounds.max > height {
            return Err(TransformError::InvalidBounds {
                qid: name.to_string(),
                min: bounds.min,
                max: bounds.max,
                height,
            });
        }

        let mut chain_of: HashMap<&str, usize> = HashMap::new();
        for (row_index, row) in hierarchy.rows().iter().enumerate() {
            chain_of.entry(row[0].as_str()).or_insert(row_index);
        }
        let chains = dataset
            .rows()
            .iter()
            .map(|record| {
                let value = record[index].as_str();
                chain_of
                    .get(value)
                    .copied()
                    .ok_or_else(|| TransformError::UnmappedValue {
                        qid: name.to_string(),
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        columns.push(QidColumn {
            name,
            index,
            hierarchy,
            bounds,
            chains,
        });
    }

    Ok(columns)
}

struct NodeResult {
    levels: Vec<Level>,
    suppressed: Vec<bool>,
    statistics: QualityStatistics,
    utility: f64,
}

impl NodeResult {
    fn into_result(self, columns: &[QidColumn<'_>], dataset: &Dataset) -> AnonymizationResult {
        let rows = dataset
            .rows()
            .iter()
            .enumerate()
            .map(|(record, raw)| {
                let mut row = raw.clone();
                for (column, level) in columns.iter().zip(&self.levels) {
                    row[column.index] = if self.suppressed[record] {
                        SUPPRESSED_VALUE.to_string()
                    } else {
                        column.cell(record, *level).to_string()
                    };
                }
                row
            })
            .collect();

        let levels: BTreeMap<String, Level> = columns
            .iter()
            .zip(&self.levels)
            .map(|(column, level)| (column.name.to_string(), *level))
            .collect();

        AnonymizationResult {
            levels,
            suppressed_records: self.suppressed.iter().filter(|flag| **flag).count(),
            statistics: self.statistics,
            rows,
        }
    }
}

fn check_node(
    columns: &[QidColumn<'_>],
    node: &[Level],
    records: usize,
    config: &PrivacyConfig,
) -> Option<NodeResult> {
    let keys: Vec<Vec<&str>> = (0..records)
        .map(|record| {
            columns
                .iter()
                .zip(node)
                .map(|(column, level)| column.cell(record, *level))
                .collect()
        })
        .collect();

    let mut class_sizes: HashMap<&[&str], usize> = HashMap::new();
    for key in &keys {
        *class_sizes.entry(key.as_slice()).or_insert(0) += 1;
    }

    let suppressed: Vec<bool> = keys
        .iter()
        .map(|key| class_sizes.get(key.as_slice()).copied().unwrap_or(0) < config.k)
        .collect();
    let suppressed_count = suppressed.iter().filter(|flag| **flag).count();
    if suppressed_count > config.max_suppressed(records) {
        return None;
    }

    let statistics = measure_quality(columns, node, &suppressed);
    let utility = mean_utility(&statistics);
    Some(NodeResult {
        levels: node.to_vec(),
        suppressed,
        statistics,
        utility,
    })
}

fn mean_utility(statistics: &QualityStatistics) -> f64 {
    let values: Vec<f64> = statistics
        .generalization_intensity
        .values()
        .values()
        .chain(statistics.non_uniform_entropy.values().values())
        .copied()
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
