//! Error types shared across the core.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid configuration detected while building a component.
///
/// These are raised at construction time so scoring and matching never fail halfway.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A single combiner weight is outside the allowed range.
    #[error("Weight {weight} is outside the allowed range {min}..={max}")]
    WeightOutOfRange { weight: f64, min: f64, max: f64 },

    /// Combiner weights must add up to exactly one.
    #[error("Weights {weights:?} sum to {sum}, expected {expected}")]
    WeightSum { weights: Vec<f64>, sum: f64, expected: f64 },

    /// A grade was built without any weighted component.
    #[error("A grade needs at least one weighted component")]
    EmptyGrade,

    /// A signature distance weight is negative or not a finite number.
    #[error("Distance weight `{feature}` must be a finite non-negative number, got {value}")]
    InvalidDistanceWeight { feature: &'static str, value: f64 },

    /// Any other option that failed validation.
    #[error("Invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },
}

/// Identifier does not follow the naming convention a grader expects.
///
/// Classifiers recover from this locally by falling back to the generic word grader.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{identifier}' does not follow the {convention} convention")]
pub struct FormatError {
    pub identifier: String,
    pub convention: &'static str,
}

/// Failure while reading a serialized class dump.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Failed to read class dump at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON class dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML class dump: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported class dump extension for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}
