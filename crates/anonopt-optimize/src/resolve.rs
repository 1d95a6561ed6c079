use std::collections::BTreeMap;

use anonopt_core::{DataDefinition, Hierarchy, Level, Workload};
use tracing::info;

/// Lowest level at which every matched workload value is still verbatim.
///
/// Values that do not occur in the hierarchy contribute no bound. When none
/// match, the level is 0.
pub fn resolve_bound_level<'a, I>(hierarchy: Option<&Hierarchy>, values: I) -> Level
where
    I: IntoIterator<Item = &'a str>,
{
    lowest_level(&matched_levels(hierarchy, values))
}

/// Level of each value in the hierarchy, `None` where it does not occur.
fn matched_levels<'a, I>(hierarchy: Option<&Hierarchy>, values: I) -> Vec<Option<Level>>
where
    I: IntoIterator<Item = &'a str>,
{
    match hierarchy {
        Some(hierarchy) => values
            .into_iter()
            .map(|value| hierarchy.level_of(value))
            .collect(),
        None => values.into_iter().map(|_| None).collect(),
    }
}

fn lowest_level(matches: &[Option<Level>]) -> Level {
    matches.iter().flatten().min().copied().unwrap_or(0)
}

/// Pin every bound quasi-identifier to its resolved level.
pub fn resolve_bound_levels(
    definition: &mut DataDefinition,
    bound: &[String],
    workload: &Workload,
) -> BTreeMap<String, Level> {
    let mut levels = BTreeMap::new();
    for qid in bound {
        let values = workload.referenced_values(qid);
        let matches = matched_levels(definition.hierarchy(qid), values.iter().copied());
        let unmatched = matches.iter().filter(|level| level.is_none()).count();
        let level = lowest_level(&matches);

        definition.pin(qid, level);
        info!(
            event = "bound_level_resolved",
            qid = %qid,
            level = level,
            values = values.len(),
            unmatched = unmatched
        );
        levels.insert(qid.clone(), level);
    }
    levels
}

#[cfg(test)]
mod tests {
    use anonopt_core::GeneralizationBounds;

    use super::*;

    fn hierarchy(rows: &[&[&str]]) -> Hierarchy {
        Hierarchy::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .expect("hierarchy")
    }

    fn deep_hierarchy() -> Hierarchy {
        hierarchy(&[
            &["a0", "a1", "a2", "v3", "a4", "a5", "a6", "a7"],
            &["b0", "b1", "b2", "b3", "b4", "v5", "b6", "b7"],
            &["c0", "c1", "c2", "c3", "c4", "c5", "c6", "v7"],
        ])
    }

    #[test]
    fn resolves_minimum_matching_level() {
        let hierarchy = deep_hierarchy();
        assert_eq!(
            resolve_bound_level(Some(&hierarchy), ["v7", "v3", "v5"]),
            3
        );
    }

    #[test]
    fn unmatched_values_do_not_constrain() {
        let hierarchy = deep_hierarchy();
        assert_eq!(resolve_bound_level(Some(&hierarchy), ["missing", "v5"]), 5);
        assert_eq!(resolve_bound_level(Some(&hierarchy), ["missing"]), 0);
        assert_eq!(resolve_bound_level(Some(&hierarchy), Vec::<&str>::new()), 0);
        assert_eq!(resolve_bound_level(None, ["v3"]), 0);
    }

    #[test]
    fn pins_bound_qids_idempotently() {
        let mut definition = DataDefinition::new();
        definition.set_hierarchy("code", deep_hierarchy());
        let mut workload = Workload::new();
        workload.insert("CODE", "code = v5", ["v5"]);
        workload.insert("CODE", "code in (v3, v7)", ["v3", "v7"]);
        let bound = vec!["code".to_string()];

        let first = resolve_bound_levels(&mut definition, &bound, &workload);
        let pinned = definition.bounds("code");
        let second = resolve_bound_levels(&mut definition, &bound, &workload);

        assert_eq!(first, second);
        assert_eq!(first.get("code"), Some(&3));
        assert_eq!(pinned, Some(GeneralizationBounds::pinned(3)));
        assert_eq!(definition.bounds("code"), pinned);
    }

    #[test]
    fn matched_levels_mark_unknown_values() {
        let hierarchy = deep_hierarchy();
        let matches = matched_levels(Some(&hierarchy), ["missing", "v5", "v7"]);
        assert_eq!(matches, vec![None, Some(5), Some(7)]);
        assert_eq!(lowest_level(&matches), 5);
        assert_eq!(matched_levels(None, ["v3", "v5"]), vec![None, None]);
    }

    #[test]
    fn pins_past_unmatched_workload_values() {
        let mut definition = DataDefinition::new();
        definition.set_hierarchy("code", deep_hierarchy());
        let mut workload = Workload::new();
        workload.insert("CODE", "code in (x, v5, y)", ["x", "v5", "y"]);
        let bound = vec!["code".to_string()];

        let levels = resolve_bound_levels(&mut definition, &bound, &workload);

        assert_eq!(levels.get("code"), Some(&5));
        assert_eq!(definition.bounds("code"), Some(GeneralizationBounds::pinned(5)));
    }
}
