//! Termination rule
//!
//! Termination for convenience is only risky when no cure period backs it.

use super::base::{FindingTemplate, Rule};
use crate::features::names;
use crate::models::{Confidence, FeatureSet, Finding, Severity};

pub const TERMINATION: FindingTemplate = FindingTemplate {
    finding_id: "R-002",
    category: "Termination",
    risk_statement: "Termination for convenience may allow exit without cure period.",
    severity: Severity::Medium,
    confidence: Confidence::from_catalog(0.70),
    clause_ref: "Section 12.1",
    snippet: "Either party may terminate for convenience upon notice...",
    recommendation: "Add a cure period and limit termination for convenience.",
    proposed_redline: None,
};

pub struct TerminationRule;

impl Rule for TerminationRule {
    fn id(&self) -> &'static str {
        TERMINATION.finding_id
    }

    fn description(&self) -> &'static str {
        "Detects termination for convenience without a cure period"
    }

    fn evaluate(&self, features: &FeatureSet) -> Option<Finding> {
        let fires = features.flag(names::HAS_TERMINATION_FOR_CONVENIENCE)
            && !features.flag(names::HAS_CURE_PERIOD);
        fires.then(|| TERMINATION.instantiate())
    }
}
