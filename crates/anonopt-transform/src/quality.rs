use std::collections::HashMap;

use anonopt_core::{ColumnMeasure, Level, QualityStatistics};

use crate::engine::QidColumn;

/// Quality of one lattice node, per quasi-identifier column.
pub(crate) fn measure_quality(
    columns: &[QidColumn<'_>],
    node: &[Level],
    suppressed: &[bool],
) -> QualityStatistics {
    let mut statistics = QualityStatistics::default();
    for (column, level) in columns.iter().zip(node) {
        if let Some(value) = generalization_intensity(column, *level, suppressed) {
            statistics
                .generalization_intensity
                .insert(column.name, value);
        }
        if let Some(value) = non_uniform_entropy(column, *level, suppressed) {
            statistics.non_uniform_entropy.insert(column.name, value);
        }
    }
    statistics
}

/// `1 - mean(level / height)`; suppressed records count as fully generalized.
fn generalization_intensity(
    column: &QidColumn<'_>,
    level: Level,
    suppressed: &[bool],
) -> Option<f64> {
    let height = column.hierarchy.height();
    if height == 0 || suppressed.is_empty() {
        return None;
    }
    let total: f64 = suppressed
        .iter()
        .map(|flag| {
            let applied = if *flag { height } else { level };
            applied as f64 / height as f64
        })
        .sum();
    Some(1.0 - total / suppressed.len() as f64)
}

/// `1 - loss / max_loss` with `loss = Σ -log2(P(original | generalized))`.
///
/// Probabilities come from input frequencies. A suppressed record's
/// generalized value covers every record.
fn non_uniform_entropy(
    column: &QidColumn<'_>,
    level: Level,
    suppressed: &[bool],
) -> Option<f64> {
    let records = suppressed.len();
    let mut original_counts: HashMap<usize, usize> = HashMap::new();
    let mut generalized_counts: HashMap<&str, usize> = HashMap::new();
    for record in 0..records {
        *original_counts.entry(column.chains[record]).or_insert(0) += 1;
        *generalized_counts
            .entry(column.cell(record, level))
            .or_insert(0) += 1;
    }

    let mut loss = 0.0;
    let mut max_loss = 0.0;
    for (record, flag) in suppressed.iter().enumerate() {
        let original = original_counts[&column.chains[record]] as f64;
        let generalized = if *flag {
            records as f64
        } else {
            generalized_counts[column.cell(record, level)] as f64
        };
        loss += -(original / generalized).log2();
        max_loss += -(original / records as f64).log2();
    }

    if max_loss <= 0.0 {
        return None;
    }
    Some((1.0 - loss / max_loss).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anonopt_core::{GeneralizationBounds, Hierarchy};

    fn hierarchy() -> Hierarchy {
        Hierarchy::new(vec![
            vec!["30".to_string(), "30-39".to_string(), "*".to_string()],
            vec!["31".to_string(), "30-39".to_string(), "*".to_string()],
            vec!["45".to_string(), "40-49".to_string(), "*".to_string()],
        ])
        .expect("hierarchy")
    }

    fn column(hierarchy: &Hierarchy, chains: Vec<usize>) -> QidColumn<'_> {
        QidColumn {
            name: "age",
            index: 0,
            hierarchy,
            bounds: GeneralizationBounds { min: 0, max: 2 },
            chains,
        }
    }

    #[test]
    fn intensity_scales_with_level() {
        let hierarchy = hierarchy();
        let column = column(&hierarchy, vec![0, 1, 2, 2]);
        let none = [false; 4];
        assert_eq!(generalization_intensity(&column, 0, &none), Some(1.0));
        assert_eq!(generalization_intensity(&column, 1, &none), Some(0.5));
        assert_eq!(generalization_intensity(&column, 2, &none), Some(0.0));
        let half = [true, true, false, false];
        assert_eq!(generalization_intensity(&column, 0, &half), Some(0.5));
    }

    #[test]
    fn entropy_is_lossless_at_level_zero_and_lossy_when_suppressed() {
        let hierarchy = hierarchy();
        let column = column(&hierarchy, vec![0, 1, 2, 2]);
        let none = [false; 4];
        assert_eq!(non_uniform_entropy(&column, 0, &none), Some(1.0));
        assert_eq!(non_uniform_entropy(&column, 2, &none), Some(0.0));
        let partial = non_uniform_entropy(&column, 1, &none).expect("available");
        assert!(partial > 0.0 && partial < 1.0);
        assert_eq!(non_uniform_entropy(&column, 0, &[true; 4]), Some(0.0));
    }

    #[test]
    fn entropy_unavailable_for_constant_column() {
        let hierarchy = hierarchy();
        let column = column(&hierarchy, vec![0, 0, 0]);
        assert_eq!(non_uniform_entropy(&column, 1, &[false; 3]), None);
    }
}
