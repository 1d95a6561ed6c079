use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anonopt_core::PrivacyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Contents of an `anonopt.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeConfig {
    pub k: usize,
    pub suppression_limit: f64,
    /// Dataset CSV with a header row.
    pub data: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    pub quasi_identifiers: Vec<String>,
    /// Workload JSON: `{ qid: { condition: [values] } }`.
    pub workload: PathBuf,
    /// Hierarchy CSV per quasi-identifier (`;` separated, no header).
    #[serde(default)]
    pub hierarchies: BTreeMap<String, PathBuf>,
}

fn default_delimiter() -> char {
    ','
}

impl OptimizeConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file and resolve its relative paths against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.data);
        resolve(&mut self.workload);
        self.hierarchies.values_mut().for_each(resolve);
    }

    pub fn privacy(&self) -> Result<PrivacyConfig, ConfigError> {
        PrivacyConfig::new(self.k, self.suppression_limit)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                ConfigError::Invalid(format!("delimiter '{}' is not ascii", self.delimiter))
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.privacy()?;
        self.delimiter_byte()?;
        let mut seen = BTreeSet::new();
        for qid in &self.quasi_identifiers {
            if !seen.insert(qid.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate quasi-identifier: {qid}"
                )));
            }
        }
        if let Some(missing) = self
            .quasi_identifiers
            .iter()
            .find(|qid| !self.hierarchies.contains_key(qid.as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "quasi-identifier '{missing}' has no hierarchy"
            )));
        }
        if let Some(orphan) = self
            .hierarchies
            .keys()
            .find(|qid| !seen.contains(qid.as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "hierarchy given for '{orphan}', which is not a quasi-identifier"
            )));
        }
        Ok(())
    }
}
