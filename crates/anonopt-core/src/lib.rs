//! Core contracts and helpers for anonopt.
//!
//! This crate defines the dataset model shared by the anonymization
//! transform, the generalization optimizer and the CLI.

pub mod dataset;
pub mod definition;
pub mod error;
pub mod hierarchy;
pub mod lattice;
pub mod qid;
pub mod quality;
pub mod transform;
pub mod workload;

pub use dataset::{DataHandle, Dataset};
pub use definition::{DataDefinition, GeneralizationBounds};
pub use error::{Error, Result, TransformError};
pub use hierarchy::{Hierarchy, Level};
pub use lattice::LevelProduct;
pub use qid::normalize_qid;
pub use quality::{ColumnMeasure, QualityStatistics};
pub use transform::{AnonymizationResult, Anonymizer, Outcome, PrivacyConfig};
pub use workload::{ConditionMap, Workload};

/// Cell value written in place of a suppressed quasi-identifier.
pub const SUPPRESSED_VALUE: &str = "*";
