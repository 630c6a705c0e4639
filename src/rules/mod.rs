//! Finding generator
//!
//! Maps feature combinations to a fixed catalog of evidenced findings.
//! Every rule is evaluated against the same feature set, in catalog
//! order. When nothing fires, a single low-severity "General" finding is
//! returned so callers always get at least one finding.

mod base;
mod liability;
mod termination;

pub use base::{FindingTemplate, Rule};
pub use liability::{LiabilityRule, LIABILITY};
pub use termination::{TerminationRule, TERMINATION};

use crate::models::{Confidence, FeatureSet, Finding, Severity};
use tracing::debug;

/// Emitted when no rule fires
pub const NO_SIGNAL: FindingTemplate = FindingTemplate {
    finding_id: "R-000",
    category: "General",
    risk_statement: "No high-signal risk clauses detected by the demo rules.",
    severity: Severity::Low,
    confidence: Confidence::from_catalog(0.60),
    clause_ref: "N/A",
    snippet: "No matched patterns in provided text.",
    recommendation: "Run with a larger contract sample or connect to the full model pipeline.",
    proposed_redline: None,
};

/// Ordered collection of rules
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    /// The built-in catalog: liability, then termination
    pub fn builtin() -> Self {
        Self {
            rules: vec![Box::new(LiabilityRule), Box::new(TerminationRule)],
        }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Evaluate every rule. Never returns an empty list.
    pub fn generate(&self, features: &FeatureSet) -> Vec<Finding> {
        let mut findings: Vec<Finding> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let finding = rule.evaluate(features);
                if finding.is_some() {
                    debug!("Rule {} fired: {}", rule.id(), rule.description());
                }
                finding
            })
            .collect();

        if findings.is_empty() {
            debug!("No rule fired, emitting {}", NO_SIGNAL.finding_id);
            findings.push(NO_SIGNAL.instantiate());
        }
        findings
    }
}

/// Run the built-in catalog over a feature set
pub fn generate(features: &FeatureSet) -> Vec<Finding> {
    RuleSet::builtin().generate(features)
}
