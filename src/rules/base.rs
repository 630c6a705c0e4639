//! Base rule trait and finding templates
//!
//! This module defines the core abstraction of the finding generator:
//! - `Rule` trait that every catalog entry implements
//! - `FindingTemplate` holding the fixed text a rule emits

use crate::models::{Confidence, Evidence, FeatureSet, Finding, Severity};

/// Fixed content of a catalog finding
#[derive(Debug, Clone, Copy)]
pub struct FindingTemplate {
    pub finding_id: &'static str,
    pub category: &'static str,
    pub risk_statement: &'static str,
    pub severity: Severity,
    pub confidence: Confidence,
    pub clause_ref: &'static str,
    pub snippet: &'static str,
    pub recommendation: &'static str,
    pub proposed_redline: Option<&'static str>,
}

impl FindingTemplate {
    /// Build the finding. Evidence comes from the template, so it is never empty.
    pub fn instantiate(&self) -> Finding {
        let finding = Finding::new(
            self.finding_id,
            self.category,
            self.risk_statement,
            self.severity,
            self.confidence,
            Evidence::new(self.clause_ref, self.snippet),
            self.recommendation,
        );
        match self.proposed_redline {
            Some(redline) => finding.with_redline(redline),
            None => finding,
        }
    }
}

/// A rule maps a combination of features to at most one finding.
///
/// Rules are evaluated independently; one firing never suppresses another.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct AutoRenewalRule;
///
/// impl Rule for AutoRenewalRule {
///     fn id(&self) -> &'static str { "R-003" }
///     fn description(&self) -> &'static str { "Flags silent auto-renewal" }
///     fn evaluate(&self, features: &FeatureSet) -> Option<Finding> {
///         features
///             .flag(names::HAS_AUTO_RENEWAL)
///             .then(|| AUTO_RENEWAL.instantiate())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Finding id this rule emits (e.g. "R-001")
    fn id(&self) -> &'static str;

    /// Human-readable description of what this rule flags
    fn description(&self) -> &'static str;

    /// Return a finding when the rule fires
    fn evaluate(&self, features: &FeatureSet) -> Option<Finding>;
}
