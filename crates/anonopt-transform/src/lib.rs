//! Reference anonymization transform for anonopt.
//!
//! Applies full-domain generalization within a dataset's generalization
//! bounds, enforces k-anonymity with record suppression and reports
//! column-oriented quality statistics.

pub mod engine;
mod quality;

pub use engine::KAnonymityEngine;
