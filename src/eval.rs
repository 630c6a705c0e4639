//! Offline evaluation harness
//!
//! Runs labeled cases through a [`ContractRiskModel`] and compares the
//! predicted risk level and finding categories with the expected ones.
//! Category metrics are micro-averaged across all cases.

use crate::models::{RiskLevel, SourceType};
use crate::pipeline::ContractRiskModel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the bundled cases
pub const DEFAULT_CASES_PATH: &str = "sample_data/eval_cases.json";

/// One labeled contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EvalCaseRecord")]
pub struct EvalCase {
    pub id: String,
    pub title: String,
    pub text: String,
    pub expected_risk_level: RiskLevel,
    pub expected_categories: Vec<String>,
}

#[derive(Deserialize)]
struct EvalCaseRecord {
    id: String,
    #[serde(default)]
    title: Option<String>,
    text: String,
    expected_risk_level: RiskLevel,
    #[serde(default)]
    expected_categories: Vec<String>,
}

impl From<EvalCaseRecord> for EvalCase {
    fn from(r: EvalCaseRecord) -> Self {
        Self {
            title: r.title.unwrap_or_else(|| r.id.clone()),
            id: r.id,
            text: r.text,
            expected_risk_level: r.expected_risk_level,
            expected_categories: r.expected_categories,
        }
    }
}

/// A case where the level or the category set disagreed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    pub id: String,
    pub title: String,
    pub pred_risk_level: RiskLevel,
    pub exp_risk_level: RiskLevel,
    pub pred_categories: Vec<String>,
    pub exp_categories: Vec<String>,
    pub run_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub n: usize,
    pub risk_level_accuracy: f64,
    pub category_precision: f64,
    pub category_recall: f64,
    pub category_f1: f64,
    pub mismatches: Vec<Mismatch>,
}

impl EvalReport {
    fn empty() -> Self {
        Self {
            n: 0,
            risk_level_accuracy: 0.0,
            category_precision: 0.0,
            category_recall: 0.0,
            category_f1: 0.0,
            mismatches: Vec::new(),
        }
    }
}

/// Load cases from a JSON array
pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read eval cases from {}", path.display()))?;
    let cases: Vec<EvalCase> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid eval cases in {}", path.display()))?;
    debug!("Loaded {} eval cases from {}", cases.len(), path.display());
    Ok(cases)
}

/// Run every case through the model and compute metrics
pub fn run_evaluation(model: &dyn ContractRiskModel, cases: &[EvalCase]) -> Result<EvalReport> {
    if cases.is_empty() {
        return Ok(EvalReport::empty());
    }

    let mut level_hits = 0usize;
    let (mut tp, mut fp, mut false_neg) = (0usize, 0usize, 0usize);
    let mut mismatches = Vec::new();

    for case in cases {
        let result = model
            .analyze(&case.text, &case.title, SourceType::Paste)
            .with_context(|| format!("Model failed on case {}", case.id))?;

        let pred_level = result.summary.risk_level;
        let pred: BTreeSet<String> = result.categories().into_iter().map(String::from).collect();
        let expected: BTreeSet<String> = case
            .expected_categories
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if pred_level == case.expected_risk_level {
            level_hits += 1;
        }
        tp += pred.intersection(&expected).count();
        fp += pred.difference(&expected).count();
        false_neg += expected.difference(&pred).count();

        if pred_level != case.expected_risk_level || pred != expected {
            mismatches.push(Mismatch {
                id: case.id.clone(),
                title: case.title.clone(),
                pred_risk_level: pred_level,
                exp_risk_level: case.expected_risk_level,
                pred_categories: pred.into_iter().collect(),
                exp_categories: expected.into_iter().collect(),
                run_id: result.run_id,
            });
        }
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + false_neg);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    let report = EvalReport {
        n: cases.len(),
        risk_level_accuracy: round3(ratio(level_hits, cases.len())),
        category_precision: round3(precision),
        category_recall: round3(recall),
        category_f1: round3(f1),
        mismatches,
    };
    info!(
        "Evaluated {} cases: accuracy {}, F1 {}, {} mismatches",
        report.n,
        report.risk_level_accuracy,
        report.category_f1,
        report.mismatches.len()
    );
    Ok(report)
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round_ties_even() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RuleBasedModel;

    fn case(id: &str, text: &str, level: RiskLevel, cats: &[&str]) -> EvalCase {
        EvalCase {
            id: id.to_string(),
            title: id.to_string(),
            text: text.to_string(),
            expected_risk_level: level,
            expected_categories: cats.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_cases() {
        let report = run_evaluation(&RuleBasedModel::new(), &[]).unwrap();
        assert_eq!(report.n, 0);
        assert_eq!(report.risk_level_accuracy, 0.0);
        assert_eq!(report.category_f1, 0.0);
        assert!(report.mismatches.is_empty());
    }

    #[test]
    fn test_perfect_predictions() {
        let cases = vec![
            case("c1", "unlimited liability", RiskLevel::Low, &["Liability"]),
            case("c2", "hello", RiskLevel::Low, &["General"]),
        ];
        let report = run_evaluation(&RuleBasedModel::new(), &cases).unwrap();
        assert_eq!(report.n, 2);
        assert_eq!(report.risk_level_accuracy, 1.0);
        assert_eq!(report.category_precision, 1.0);
        assert_eq!(report.category_recall, 1.0);
        assert_eq!(report.category_f1, 1.0);
        assert!(report.mismatches.is_empty());
    }

    #[test]
    fn test_mismatch_recorded() {
        let cases = vec![
            case("c1", "unlimited liability", RiskLevel::High, &["Liability", "Indemnity"]),
            case("c2", "terminate for convenience", RiskLevel::Low, &["Termination"]),
        ];
        let report = run_evaluation(&RuleBasedModel::new(), &cases).unwrap();
        // tp = 2, fp = 0, fn = 1
        assert_eq!(report.category_precision, 1.0);
        assert_eq!(report.category_recall, 0.667);
        assert_eq!(report.category_f1, 0.8);
        assert_eq!(report.risk_level_accuracy, 0.5);
        assert_eq!(report.mismatches.len(), 1);

        let m = &report.mismatches[0];
        assert_eq!(m.id, "c1");
        assert_eq!(m.pred_risk_level, RiskLevel::Low);
        assert_eq!(m.exp_risk_level, RiskLevel::High);
        assert_eq!(m.exp_categories, vec!["Indemnity", "Liability"]);
        assert!(!m.run_id.is_empty());
    }

    #[test]
    fn test_case_title_defaults_to_id() {
        let json = r#"[{"id": "x1", "text": "t", "expected_risk_level": "medium"}]"#;
        let cases: Vec<EvalCase> = serde_json::from_str(json).unwrap();
        assert_eq!(cases[0].title, "x1");
        assert_eq!(cases[0].expected_risk_level, RiskLevel::Medium);
        assert!(cases[0].expected_categories.is_empty());
    }

    #[test]
    fn test_invalid_expected_level_fails_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cases.json");
        std::fs::write(
            &path,
            r#"[{"id": "x", "text": "t", "expected_risk_level": "Severe"}]"#,
        )
        .unwrap();
        assert!(load_cases(&path).is_err());
    }

    #[test]
    fn test_round3_ties_to_even() {
        assert_eq!(round3(0.0625), 0.062);
        assert_eq!(round3(0.1875), 0.188);
        assert_eq!(round3(2.0 / 3.0), 0.667);
    }

    struct UnavailableModel;

    impl ContractRiskModel for UnavailableModel {
        fn analyze(
            &self,
            _contract_text: &str,
            _title: &str,
            _source_type: SourceType,
        ) -> crate::error::ModelResult<crate::models::AnalysisResult> {
            Err(crate::error::AnalysisError::Backend("endpoint unreachable".to_string()))
        }
    }

    #[test]
    fn test_backend_failure_names_the_case() {
        let cases = vec![case("c9", "text", RiskLevel::Low, &[])];
        let err = run_evaluation(&UnavailableModel, &cases).unwrap_err();
        assert!(err.to_string().contains("c9"), "{err}");
        let root = err.root_cause().to_string();
        assert!(root.contains("endpoint unreachable"), "{root}");
    }
}
