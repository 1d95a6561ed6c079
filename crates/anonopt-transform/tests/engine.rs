use anonopt_core::{
    Anonymizer, DataDefinition, Dataset, Hierarchy, Outcome, PrivacyConfig, TransformError,
};
use anonopt_transform::KAnonymityEngine;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn hierarchy(rows: &[&[&str]]) -> Hierarchy {
    Hierarchy::new(rows.iter().map(|row| strings(row)).collect()).expect("hierarchy")
}

fn age_hierarchy() -> Hierarchy {
    hierarchy(&[
        &["30", "30-39", "*"],
        &["31", "30-39", "*"],
        &["45", "40-49", "*"],
        &["46", "40-49", "*"],
    ])
}

fn patients() -> Dataset {
    let mut definition = DataDefinition::new();
    definition.set_hierarchy("age", age_hierarchy());
    definition.set_hierarchy(
        "zip",
        hierarchy(&[&["10115", "1011*", "*"], &["10117", "1011*", "*"]]),
    );
    Dataset::new(
        strings(&["age", "zip", "disease"]),
        vec![
            strings(&["30", "10115", "flu"]),
            strings(&["31", "10115", "cold"]),
            strings(&["45", "10117", "flu"]),
            strings(&["46", "10117", "asthma"]),
        ],
    )
    .expect("dataset")
    .with_definition(definition)
}

fn ages(values: &[&str]) -> Dataset {
    let mut definition = DataDefinition::new();
    definition.set_hierarchy("age", age_hierarchy());
    Dataset::new(
        strings(&["age"]),
        values.iter().map(|value| strings(&[value])).collect(),
    )
    .expect("dataset")
    .with_definition(definition)
}

fn feasible(outcome: Outcome) -> anonopt_core::AnonymizationResult {
    match outcome {
        Outcome::Feasible(result) => result,
        Outcome::Infeasible => panic!("expected a feasible outcome"),
    }
}

#[test]
fn pinned_levels_that_violate_k_are_infeasible() {
    let mut dataset = patients();
    dataset.definition_mut().pin("age", 0);
    dataset.definition_mut().pin("zip", 0);
    let config = PrivacyConfig::new(2, 0.0).expect("config");

    let outcome = KAnonymityEngine::new()
        .anonymize(&mut dataset, &config)
        .expect("anonymize");
    assert_eq!(outcome, Outcome::Infeasible);
}

#[test]
fn generalizes_records_at_pinned_levels() {
    let mut dataset = patients();
    dataset.definition_mut().pin("age", 1);
    dataset.definition_mut().pin("zip", 0);
    let config = PrivacyConfig::new(2, 0.0).expect("config");

    let result = feasible(
        KAnonymityEngine::new()
            .anonymize(&mut dataset, &config)
            .expect("anonymize"),
    );
    assert_eq!(result.levels.get("age"), Some(&1));
    assert_eq!(result.levels.get("zip"), Some(&0));
    assert_eq!(result.suppressed_records, 0);
    assert_eq!(result.rows[0], strings(&["30-39", "10115", "flu"]));
    assert_eq!(result.rows[3], strings(&["40-49", "10117", "asthma"]));

    let intensity = &result.statistics.generalization_intensity;
    assert_eq!(intensity.value("age"), Some(0.5));
    assert_eq!(intensity.value("zip"), Some(1.0));
    assert!(!intensity.is_available("disease"));
}

#[test]
fn suppresses_small_classes_within_limit() {
    let mut dataset = ages(&["30", "30", "31", "45"]);
    dataset.definition_mut().pin("age", 0);
    let config = PrivacyConfig::new(2, 0.5).expect("config");

    let result = feasible(
        KAnonymityEngine::new()
            .anonymize(&mut dataset, &config)
            .expect("anonymize"),
    );
    assert_eq!(result.suppressed_records, 2);
    assert_eq!(result.rows[0], strings(&["30"]));
    assert_eq!(result.rows[2], strings(&["*"]));
    assert_eq!(result.rows[3], strings(&["*"]));
}

#[test]
fn open_bounds_search_the_lattice() {
    let mut dataset = ages(&["30", "30", "31", "45"]);
    let config = PrivacyConfig::new(2, 0.0).expect("config");

    let result = feasible(
        KAnonymityEngine::new()
            .anonymize(&mut dataset, &config)
            .expect("anonymize"),
    );
    assert_eq!(result.levels.get("age"), Some(&2));
}

#[test]
fn stale_handle_is_rejected_until_released() {
    let mut dataset = patients();
    let config = PrivacyConfig::new(2, 0.0).expect("config");
    let engine = KAnonymityEngine::new();

    engine.anonymize(&mut dataset, &config).expect("first run");
    assert!(matches!(
        engine.anonymize(&mut dataset, &config),
        Err(TransformError::HandleInUse(_))
    ));

    dataset.release_handle();
    assert!(engine.anonymize(&mut dataset, &config).is_ok());
}

#[test]
fn reports_values_missing_from_hierarchy() {
    let mut dataset = ages(&["30", "99"]);
    let config = PrivacyConfig::new(1, 0.0).expect("config");

    let err = KAnonymityEngine::new()
        .anonymize(&mut dataset, &config)
        .expect_err("unmapped value");
    assert!(matches!(
        err,
        TransformError::UnmappedValue { ref value, .. } if value == "99"
    ));
}

#[test]
fn rejects_bounds_above_hierarchy_height() {
    let mut dataset = ages(&["30"]);
    dataset.definition_mut().pin("age", 5);
    let config = PrivacyConfig::new(1, 0.0).expect("config");

    assert!(matches!(
        KAnonymityEngine::new().anonymize(&mut dataset, &config),
        Err(TransformError::InvalidBounds { max: 5, height: 2, .. })
    ));
}

#[test]
fn suppression_limit_allows_its_exact_record_budget() {
    let mut values: Vec<String> = vec!["common".to_string(); 71];
    values.extend((0..29).map(|index| format!("rare-{index}")));
    let mut rows: Vec<Vec<String>> = vec![strings(&["common", "*"])];
    rows.extend((0..29).map(|index| vec![format!("rare-{index}"), "*".to_string()]));

    let mut definition = DataDefinition::new();
    definition.set_hierarchy("code", Hierarchy::new(rows).expect("hierarchy"));
    definition.pin("code", 0);
    let mut dataset = Dataset::new(
        strings(&["code"]),
        values.into_iter().map(|value| vec![value]).collect(),
    )
    .expect("dataset")
    .with_definition(definition);
    let config = PrivacyConfig::new(2, 0.29).expect("config");

    let result = feasible(
        KAnonymityEngine::new()
            .anonymize(&mut dataset, &config)
            .expect("anonymize"),
    );
    assert_eq!(result.suppressed_records, 29);
}
