//! Error types for the analysis core
//!
//! Validation failures are raised when a value is constructed (or
//! deserialized). Nothing in the core clamps a bad value into range.

use thiserror::Error;

/// Errors raised when a model value is built from untrusted input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("confidence must be a finite number in [0, 1], got {0}")]
    ConfidenceOutOfRange(f64),

    #[error("unknown severity '{0}'. Valid severities: Low, Medium, High, Critical")]
    UnknownSeverity(String),

    #[error("unknown source type '{0}'. Valid source types: paste, upload")]
    UnknownSourceType(String),

    #[error("severity weights must strictly increase Low < Medium < High < Critical, got {low}/{medium}/{high}/{critical}")]
    NonIncreasingWeights {
        low: u32,
        medium: u32,
        high: u32,
        critical: u32,
    },

    #[error("finding '{0}' has no evidence; every finding needs at least one clause snippet")]
    MissingEvidence(String),
}

/// Errors from loading `contract-risk.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors a risk model can report from `analyze`
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid analysis input: {0}")]
    Validation(#[from] ValidationError),

    #[error("model backend failed: {0}")]
    Backend(String),
}

pub type ModelResult<T> = Result<T, AnalysisError>;
