use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anonopt_core::{DataDefinition, Dataset, Hierarchy, Workload};
use thiserror::Error;

use crate::config::OptimizeConfig;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("workload json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    Model {
        path: PathBuf,
        source: anonopt_core::Error,
    },
}

/// Dataset, definition and workload described by a config.
#[derive(Debug)]
pub struct Inputs {
    pub dataset: Dataset,
    pub workload: Workload,
}

pub fn load_inputs(config: &OptimizeConfig, delimiter: u8) -> Result<Inputs, InputError> {
    let mut definition = DataDefinition::new();
    for (qid, path) in &config.hierarchies {
        definition.set_hierarchy(qid.clone(), load_hierarchy(path)?);
    }
    let dataset = load_dataset(&config.data, delimiter)?.with_definition(definition);
    let workload = load_workload(&config.workload)?;
    Ok(Inputs { dataset, workload })
}

pub fn load_dataset(path: &Path, delimiter: u8) -> Result<Dataset, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)?;
    let header = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
    Dataset::new(header, rows).map_err(|source| InputError::Model {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a `;` separated hierarchy table without header.
pub fn load_hierarchy(path: &Path) -> Result<Hierarchy, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let rows = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
    Hierarchy::new(rows).map_err(|source| InputError::Model {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_workload(path: &Path) -> Result<Workload, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("anonopt_cli_{label}_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn loads_hierarchy_and_rejects_ragged_rows() {
        let dir = temp_dir("hierarchy");
        let good = dir.join("age.csv");
        fs::write(&good, "30;30-39;*\n45;40-49;*\n").expect("write hierarchy");
        let hierarchy = load_hierarchy(&good).expect("load hierarchy");
        assert_eq!(hierarchy.depth(), 3);
        assert_eq!(hierarchy.level_of("40-49"), Some(1));

        let ragged = dir.join("ragged.csv");
        fs::write(&ragged, "30;30-39;*\n45;*\n").expect("write hierarchy");
        assert!(matches!(
            load_hierarchy(&ragged),
            Err(InputError::Model { .. })
        ));
    }

    #[test]
    fn loads_dataset_with_custom_delimiter() {
        let dir = temp_dir("dataset");
        let path = dir.join("data.csv");
        fs::write(&path, "age;zip-code\n30;10115\n45;10117\n").expect("write data");
        let dataset = load_dataset(&path, b';').expect("load dataset");
        assert_eq!(dataset.header(), ["age".to_string(), "zip-code".to_string()]);
        assert_eq!(dataset.rows().len(), 2);
        assert_eq!(dataset.column_index("zip-code"), Some(1));
    }
}
