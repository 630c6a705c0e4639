//! Core data models for contract-risk
//!
//! These models are shared by the feature extractor, the rule catalog,
//! the scorer and every consumer of [`AnalysisResult`]. Field names and
//! nesting are the serialized contract that UIs and stored runs rely on.

use crate::error::ValidationError;
use crate::scoring::ScoringBreakdown;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity levels for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "String")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

/// Overall tier derived from the normalized score. Same ordinal scale as [`Severity`].
pub type RiskLevel = Severity;

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ValidationError::UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Model confidence in a finding, always within `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::ConfidenceOutOfRange(value))
        }
    }

    /// Build a confidence from a literal in the rule catalog.
    /// Catalog values are checked by the `rules` tests.
    pub(crate) const fn from_catalog(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> f64 {
        c.0
    }
}

/// A clause reference plus the verbatim snippet that backs a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub clause_ref: String,
    pub snippet: String,
}

impl Evidence {
    pub fn new(clause_ref: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            clause_ref: clause_ref.into(),
            snippet: snippet.into(),
        }
    }
}

/// A single flagged contractual risk.
///
/// A finding cannot exist without evidence: [`Finding::new`] takes the
/// first [`Evidence`] by value and deserialization rejects an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FindingRecord")]
pub struct Finding {
    finding_id: String,
    category: String,
    risk_statement: String,
    severity: Severity,
    confidence: Confidence,
    evidence: Vec<Evidence>,
    recommendation: String,
    proposed_redline: Option<String>,
}

impl Finding {
    pub fn new(
        finding_id: impl Into<String>,
        category: impl Into<String>,
        risk_statement: impl Into<String>,
        severity: Severity,
        confidence: Confidence,
        evidence: Evidence,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            finding_id: finding_id.into(),
            category: category.into(),
            risk_statement: risk_statement.into(),
            severity,
            confidence,
            evidence: vec![evidence],
            recommendation: recommendation.into(),
            proposed_redline: None,
        }
    }

    /// Attach another supporting snippet
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    /// Attach suggested replacement language
    pub fn with_redline(mut self, redline: impl Into<String>) -> Self {
        self.proposed_redline = Some(redline.into());
        self
    }

    pub fn finding_id(&self) -> &str {
        &self.finding_id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn risk_statement(&self) -> &str {
        &self.risk_statement
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Never empty
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    pub fn proposed_redline(&self) -> Option<&str> {
        self.proposed_redline.as_deref()
    }
}

/// Wire shape of a finding before the evidence invariant is checked
#[derive(Deserialize)]
struct FindingRecord {
    finding_id: String,
    category: String,
    risk_statement: String,
    severity: Severity,
    confidence: Confidence,
    #[serde(default)]
    evidence: Vec<Evidence>,
    recommendation: String,
    #[serde(default)]
    proposed_redline: Option<String>,
}

impl TryFrom<FindingRecord> for Finding {
    type Error = ValidationError;

    fn try_from(r: FindingRecord) -> Result<Self, Self::Error> {
        if r.evidence.is_empty() {
            return Err(ValidationError::MissingEvidence(r.finding_id));
        }
        Ok(Self {
            finding_id: r.finding_id,
            category: r.category,
            risk_statement: r.risk_statement,
            severity: r.severity,
            confidence: r.confidence,
            evidence: r.evidence,
            recommendation: r.recommendation,
            proposed_redline: r.proposed_redline,
        })
    }
}

/// Value carried by a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl FeatureValue {
    pub fn dtype(&self) -> FeatureDtype {
        match self {
            FeatureValue::Bool(_) => FeatureDtype::Bool,
            FeatureValue::Int(_) => FeatureDtype::Int,
            FeatureValue::Float(_) => FeatureDtype::Float,
            FeatureValue::Str(_) => FeatureDtype::Str,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FeatureValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FeatureValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Bool(b) => write!(f, "{b}"),
            FeatureValue::Int(i) => write!(f, "{i}"),
            FeatureValue::Float(x) => write!(f, "{x}"),
            FeatureValue::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureDtype {
    Bool,
    Int,
    Float,
    Str,
}

impl FeatureDtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureDtype::Bool => "bool",
            FeatureDtype::Int => "int",
            FeatureDtype::Float => "float",
            FeatureDtype::Str => "str",
        }
    }
}

/// A named signal extracted from contract text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FeatureRecord")]
pub struct Feature {
    name: String,
    value: FeatureValue,
    dtype: FeatureDtype,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: FeatureValue) -> Self {
        let dtype = value.dtype();
        Self {
            name: name.into(),
            value,
            dtype,
        }
    }

    pub fn bool(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, FeatureValue::Bool(value))
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, FeatureValue::Int(value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &FeatureValue {
        &self.value
    }

    pub fn dtype(&self) -> FeatureDtype {
        self.dtype
    }
}

#[derive(Deserialize)]
struct FeatureRecord {
    name: String,
    value: FeatureValue,
    dtype: FeatureDtype,
}

impl From<FeatureRecord> for Feature {
    fn from(r: FeatureRecord) -> Self {
        // JSON cannot tell 1.0 from 1, so trust the declared float dtype
        let value = match (r.value, r.dtype) {
            (FeatureValue::Int(i), FeatureDtype::Float) => FeatureValue::Float(i as f64),
            (v, _) => v,
        };
        Feature::new(r.name, value)
    }
}

pub const FEATURE_SET_VERSION: &str = "1.0";

/// Ordered features plus a version tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub version: String,
    pub features: Vec<Feature>,
}

impl FeatureSet {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            version: FEATURE_SET_VERSION.to_string(),
            features,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// True only when the named feature exists and is a true boolean
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(FeatureValue::as_bool).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// How the contract text reached the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Paste,
    Upload,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Paste => "paste",
            SourceType::Upload => "upload",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paste" => Ok(SourceType::Paste),
            "upload" => Ok(SourceType::Upload),
            _ => Err(ValidationError::UnknownSourceType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMeta {
    pub title: String,
    pub source_type: SourceType,
    pub text_length: usize,
}

/// One entry of the summary's top risks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRisk {
    pub category: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub overall_risk_score: u32,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub top_risks: Vec<TopRisk>,
}

/// Timestamped pipeline milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// ISO-8601 UTC, `Z` suffix
    pub ts: String,
    pub event: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub run_id: String,
    pub contract: ContractMeta,
    pub summary: Summary,
    pub findings: Vec<Finding>,
    pub features: FeatureSet,
    pub scoring: ScoringBreakdown,
    pub audit: Vec<AuditEvent>,
}

impl AnalysisResult {
    /// Distinct finding categories, in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for f in &self.findings {
            let c = f.category().trim();
            if !c.is_empty() && !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_finding() -> Finding {
        Finding::new(
            "T-1",
            "Liability",
            "Liability is uncapped",
            Severity::High,
            Confidence::new(0.5).unwrap(),
            Evidence::new("Section 1", "...unlimited liability..."),
            "Cap it",
        )
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(" critical ".parse::<Severity>().unwrap(), Severity::Critical);
        assert!(matches!(
            "severe".parse::<Severity>(),
            Err(ValidationError::UnknownSeverity(_))
        ));
    }

    #[test]
    fn test_severity_serializes_title_case() {
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"Medium\"");
        let s: Severity = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(s, Severity::Low);
        assert!(serde_json::from_str::<Severity>("\"Info\"").is_err());
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("[{:<9}]", Severity::High), "[High     ]");
        assert_eq!(format!("[{:>8}]", SourceType::Paste), "[   paste]");
    }

    #[test]
    fn test_confidence_rejects_out_of_range() {
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert_eq!(
            Confidence::new(1.01),
            Err(ValidationError::ConfidenceOutOfRange(1.01))
        );
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
    }

    #[test]
    fn test_finding_always_has_evidence() {
        let f = sample_finding().with_evidence(Evidence::new("Section 2", "more"));
        assert_eq!(f.evidence().len(), 2);
        assert_eq!(f.evidence()[0].clause_ref, "Section 1");
        assert!(f.proposed_redline().is_none());
    }

    #[test]
    fn test_finding_json_shape() {
        let f = sample_finding().with_redline("Total liability shall not exceed fees");
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["finding_id"], "T-1");
        assert_eq!(v["severity"], "High");
        assert_eq!(v["confidence"], 0.5);
        assert_eq!(v["evidence"][0]["snippet"], "...unlimited liability...");
        assert_eq!(v["proposed_redline"], "Total liability shall not exceed fees");
    }

    #[test]
    fn test_finding_deserialize_rejects_missing_evidence() {
        let json = r#"{
            "finding_id": "X",
            "category": "General",
            "risk_statement": "s",
            "severity": "Low",
            "confidence": 0.5,
            "evidence": [],
            "recommendation": "r"
        }"#;
        let err = serde_json::from_str::<Finding>(json).unwrap_err();
        assert!(err.to_string().contains("no evidence"));
    }

    #[test]
    fn test_finding_deserialize_rejects_bad_confidence() {
        let json = r#"{
            "finding_id": "X",
            "category": "General",
            "risk_statement": "s",
            "severity": "Low",
            "confidence": 1.5,
            "evidence": [{"clause_ref": "A", "snippet": "b"}],
            "recommendation": "r"
        }"#;
        assert!(serde_json::from_str::<Finding>(json).is_err());
    }

    #[test]
    fn test_feature_dtype_follows_value() {
        let f = Feature::bool("has_x", true);
        assert_eq!(f.dtype(), FeatureDtype::Bool);
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["dtype"], "bool");
        assert_eq!(v["value"], true);

        let n = Feature::int("text_length", 11);
        assert_eq!(serde_json::to_value(&n).unwrap()["dtype"], "int");
    }

    #[test]
    fn test_feature_set_flag_lookup() {
        let fs = FeatureSet::new(vec![
            Feature::int("text_length", 3),
            Feature::bool("has_a", true),
            Feature::bool("has_b", false),
        ]);
        assert_eq!(fs.version, "1.0");
        assert!(fs.flag("has_a"));
        assert!(!fs.flag("has_b"));
        assert!(!fs.flag("missing"));
        // non-bool features never read as flags
        assert!(!fs.flag("text_length"));
        assert_eq!(fs.get("text_length").and_then(FeatureValue::as_int), Some(3));
    }

    #[test]
    fn test_source_type_parse() {
        assert_eq!("Upload".parse::<SourceType>().unwrap(), SourceType::Upload);
        assert!("email".parse::<SourceType>().is_err());
        assert_eq!(serde_json::to_string(&SourceType::Paste).unwrap(), "\"paste\"");
    }
}
