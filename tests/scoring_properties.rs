//! Property tests for scoring and feature extraction

use contract_risk::features::extract;
use contract_risk::rules::generate;
use contract_risk::scoring::{normalize, risk_level, score, SeverityWeights};
use contract_risk::{Confidence, Evidence, Finding, Severity};
use proptest::prelude::*;

fn finding(severity: Severity, confidence: f64) -> Finding {
    Finding::new(
        "P-1",
        "Prop",
        "generated",
        severity,
        Confidence::new(confidence).unwrap(),
        Evidence::new("N/A", "x"),
        "none",
    )
}

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

proptest! {
    #[test]
    fn score_stays_in_bounds(
        specs in prop::collection::vec((severity_strategy(), 0.0f64..=1.0), 0..12)
    ) {
        let findings: Vec<Finding> = specs.iter().map(|(s, c)| finding(*s, *c)).collect();
        let (normalized, breakdown) = score(&findings);
        prop_assert!(normalized <= 100);
        prop_assert_eq!(breakdown.normalized_score_0_100, normalized);
        prop_assert_eq!(breakdown.items.len(), findings.len());
        prop_assert_eq!(breakdown.risk_level, risk_level(normalized));
    }

    #[test]
    fn adding_a_finding_never_lowers_the_score(
        specs in prop::collection::vec((severity_strategy(), 0.0f64..=1.0), 0..8),
        extra in (severity_strategy(), 0.0f64..=1.0)
    ) {
        let mut findings: Vec<Finding> = specs.iter().map(|(s, c)| finding(*s, *c)).collect();
        let (before, _) = score(&findings);
        findings.push(finding(extra.0, extra.1));
        let (after, _) = score(&findings);
        prop_assert!(after >= before);
    }

    #[test]
    fn higher_severity_never_scores_lower(confidence in 0.0f64..=1.0) {
        let scores: Vec<u32> = Severity::ALL
            .iter()
            .map(|s| score(&[finding(*s, confidence)]).0)
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn higher_confidence_never_scores_lower(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (s_lo, _) = score(&[finding(Severity::High, lo)]);
        let (s_hi, _) = score(&[finding(Severity::High, hi)]);
        prop_assert!(s_lo <= s_hi);
    }

    #[test]
    fn normalize_is_monotone(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(normalize(lo) <= normalize(hi));
        prop_assert!(normalize(hi) <= 100);
    }

    #[test]
    fn any_text_yields_evidenced_findings(text in ".{0,400}") {
        let findings = generate(&extract(&text));
        prop_assert!(!findings.is_empty());
        prop_assert!(findings.iter().all(|f| !f.evidence().is_empty()));
    }

    #[test]
    fn extraction_is_deterministic(text in "\\PC{0,200}") {
        prop_assert_eq!(extract(&text), extract(&text));
    }

    #[test]
    fn increasing_weights_always_validate(
        low in 0u32..100, d1 in 1u32..100, d2 in 1u32..100, d3 in 1u32..100
    ) {
        let weights = SeverityWeights::new(low, low + d1, low + d1 + d2, low + d1 + d2 + d3);
        prop_assert!(weights.is_ok());
        let reversed = SeverityWeights::new(low + d1 + d2 + d3, low + d1 + d2, low + d1, low);
        prop_assert!(reversed.is_err());
    }
}
