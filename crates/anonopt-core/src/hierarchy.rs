use crate::error::{Error, Result};

/// Generalization level of a quasi-identifier (0 = original value).
pub type Level = usize;

/// Generalization hierarchy for one quasi-identifier.
///
/// Each row is the generalization chain of one raw value; the column index is
/// the generalization level. Every row has the same number of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hierarchy {
    rows: Vec<Vec<String>>,
    depth: usize,
}

impl Hierarchy {
    /// Build a hierarchy, rejecting ragged tables.
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self> {
        let depth = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != depth) {
            return Err(Error::InvalidHierarchy(format!(
                "row {index} has {} column(s), expected {depth}",
                row.len()
            )));
        }
        Ok(Self { rows, depth })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.depth == 0
    }

    /// Number of generalization levels (columns), 0 for an empty table.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Highest generalization level.
    pub fn height(&self) -> Level {
        self.depth.saturating_sub(1)
    }

    /// Lowest level at which `target` appears verbatim in any row.
    pub fn level_of(&self, target: &str) -> Option<Level> {
        if self.is_empty() {
            return None;
        }
        let mut best: Option<Level> = None;
        for row in &self.rows {
            if let Some(level) = row.iter().position(|cell| cell == target) {
                if level == 0 {
                    return Some(0);
                }
                best = Some(best.map_or(level, |current| current.min(level)));
            }
        }
        best
    }

    /// Generalized form of the raw `value` at `level`.
    pub fn generalize(&self, value: &str, level: Level) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.first().is_some_and(|raw| raw == value))
            .and_then(|row| row.get(level))
            .map(String::as_str)
    }
}
