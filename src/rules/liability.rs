//! Liability rule
//!
//! Fires on uncapped/unlimited liability or consequential damages language.

use super::base::{FindingTemplate, Rule};
use crate::features::names;
use crate::models::{Confidence, FeatureSet, Finding, Severity};

pub const LIABILITY: FindingTemplate = FindingTemplate {
    finding_id: "R-001",
    category: "Liability",
    risk_statement: "Liability appears uncapped and/or includes consequential damages.",
    severity: Severity::High,
    confidence: Confidence::from_catalog(0.78),
    clause_ref: "Section 9.2",
    snippet: "...liable for all damages including consequential...",
    recommendation: "Cap liability to 12 months of fees and exclude consequential damages.",
    proposed_redline: Some(
        "Total liability shall not exceed fees paid in the preceding 12 months...",
    ),
};

pub struct LiabilityRule;

impl Rule for LiabilityRule {
    fn id(&self) -> &'static str {
        LIABILITY.finding_id
    }

    fn description(&self) -> &'static str {
        "Detects uncapped liability or exposure to consequential damages"
    }

    fn evaluate(&self, features: &FeatureSet) -> Option<Finding> {
        let fires = features.flag(names::HAS_UNCAPPED_LIABILITY)
            || features.flag(names::HAS_CONSEQUENTIAL_DAMAGES);
        fires.then(|| LIABILITY.instantiate())
    }
}
