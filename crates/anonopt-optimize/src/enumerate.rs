use anonopt_core::{DataDefinition, Level, LevelProduct};

/// One level per free quasi-identifier, in free-QID order.
pub type Candidate = Vec<Level>;

/// Level domain size of each free quasi-identifier.
///
/// A quasi-identifier without a hierarchy can only stay at level 0.
pub fn free_depths(definition: &DataDefinition, free: &[String]) -> Vec<usize> {
    free.iter()
        .map(|qid| definition.hierarchy_depth(qid).max(1))
        .collect()
}

/// Lazy stream of every candidate for the given level domain sizes.
///
/// Domains are `0..depth`; the last free quasi-identifier varies fastest.
#[derive(Debug, Clone)]
pub struct Combinations {
    product: LevelProduct,
}

impl Combinations {
    pub fn new(depths: &[usize]) -> Self {
        Self {
            product: LevelProduct::new(depths.iter().map(|depth| 0..*depth).collect()),
        }
    }

    /// Total candidate count, `None` if it overflows `usize`.
    pub fn total(&self) -> Option<usize> {
        self.product.total()
    }
}

impl Iterator for Combinations {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        self.product.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.product.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use anonopt_core::Hierarchy;

    use super::*;

    #[test]
    fn covers_cartesian_product_exactly_once() {
        let candidates: Vec<Candidate> = Combinations::new(&[2, 3]).collect();
        assert_eq!(candidates.len(), 6);
        let distinct: BTreeSet<_> = candidates.iter().cloned().collect();
        assert_eq!(distinct.len(), 6);
        for first in 0..2 {
            for second in 0..3 {
                assert!(distinct.contains(&vec![first, second]));
            }
        }
        assert_eq!(candidates.first(), Some(&vec![0, 0]));
    }

    #[test]
    fn no_free_qids_yield_one_empty_candidate() {
        let mut combinations = Combinations::new(&[]);
        assert_eq!(combinations.total(), Some(1));
        assert_eq!(combinations.next(), Some(Vec::new()));
        assert_eq!(combinations.next(), None);
    }

    #[test]
    fn missing_hierarchy_counts_as_single_level() {
        let mut definition = DataDefinition::new();
        let rows = vec![vec!["1".to_string(), "*".to_string()]];
        definition.set_hierarchy("age", Hierarchy::new(rows).expect("hierarchy"));
        let free = vec!["age".to_string(), "sex".to_string()];
        assert_eq!(free_depths(&definition, &free), vec![2, 1]);
    }
}
