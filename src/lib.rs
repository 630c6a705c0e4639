//! contract-risk - Explainable contract risk scoring
//!
//! Turns contract text into a 0-100 risk score with evidenced findings,
//! a scoring breakdown and an audit trail.
//!
//! ```no_run
//! use contract_risk::{analyze, SourceType};
//!
//! let result = analyze("Supplier has unlimited liability.", "MSA", SourceType::Paste);
//! println!("{} {}", result.summary.overall_risk_score, result.summary.risk_level);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod rules;
pub mod scoring;
pub mod store;

pub use error::{AnalysisError, ConfigError, ValidationError};
pub use models::{AnalysisResult, Confidence, Evidence, Finding, RiskLevel, Severity, SourceType};
pub use pipeline::{analyze, ContractRiskModel, RuleBasedModel};
