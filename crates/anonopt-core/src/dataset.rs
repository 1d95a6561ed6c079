use uuid::Uuid;

use crate::definition::DataDefinition;
use crate::error::{Error, Result, TransformError};

/// Lock a transform holds on a dataset between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataHandle {
    id: Uuid,
}

impl DataHandle {
    fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Tabular input data plus its attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    definition: DataDefinition,
    handle: Option<DataHandle>,
}

impl Dataset {
    /// Build a dataset, checking that every row matches the header width.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(Error::InvalidDataset(format!(
                "row {index} has {} field(s), header has {}",
                row.len(),
                header.len()
            )));
        }
        Ok(Self {
            header,
            rows,
            definition: DataDefinition::new(),
            handle: None,
        })
    }

    pub fn with_definition(mut self, definition: DataDefinition) -> Self {
        self.definition = definition;
        self
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    pub fn definition(&self) -> &DataDefinition {
        &self.definition
    }

    pub fn definition_mut(&mut self) -> &mut DataDefinition {
        &mut self.definition
    }

    pub fn handle(&self) -> Option<&DataHandle> {
        self.handle.as_ref()
    }

    /// Take the transform lock. Fails while a previous handle is still held.
    pub fn acquire_handle(&mut self) -> std::result::Result<&DataHandle, TransformError> {
        if let Some(handle) = &self.handle {
            return Err(TransformError::HandleInUse(handle.id.to_string()));
        }
        Ok(self.handle.insert(DataHandle::new()))
    }

    pub fn release_handle(&mut self) {
        self.handle = None;
    }
}
