//! Contract analysis pipeline
//!
//! Orchestrates one analysis run:
//! 1. Record receipt of the text
//! 2. Extract features
//! 3. Generate findings from the rule catalog
//! 4. Score the findings
//! 5. Assemble the result with summary and audit trail
//!
//! Callers depend on [`ContractRiskModel`] only, so the rule-based model
//! can be swapped for another backend without touching them.

pub mod audit;
pub mod clock;

pub use audit::AuditTrail;
pub use clock::{Clock, FixedClock, RandomRunIds, RunIdSource, SequentialRunIds, SystemClock};

use crate::error::ModelResult;
use crate::features::{text_length, FeatureExtractor};
use crate::models::{AnalysisResult, ContractMeta, Finding, SourceType, Summary, TopRisk};
use crate::rules::RuleSet;
use crate::scoring::{Scorer, SeverityWeights};
use serde_json::json;
use tracing::{debug, info};

/// Maximum characters of a risk statement shown in `top_risks`
pub const TOP_RISK_TITLE_CHARS: usize = 60;

/// Number of findings surfaced in the summary
pub const TOP_RISK_COUNT: usize = 2;

/// An analysis capability. UIs, batch runners and the evaluation harness
/// only talk to this trait.
pub trait ContractRiskModel: Send + Sync {
    fn analyze(
        &self,
        contract_text: &str,
        title: &str,
        source_type: SourceType,
    ) -> ModelResult<AnalysisResult>;
}

/// Pattern-based model: feature extractor, rule catalog, weighted scorer.
pub struct RuleBasedModel<C = SystemClock, R = RandomRunIds> {
    extractor: FeatureExtractor,
    rules: RuleSet,
    scorer: Scorer,
    clock: C,
    run_ids: R,
}

impl Default for RuleBasedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedModel {
    /// Built-in rules, default weights, wall clock, random run ids.
    pub fn new() -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            rules: RuleSet::builtin(),
            scorer: Scorer::default(),
            clock: SystemClock,
            run_ids: RandomRunIds,
        }
    }
}

impl<C: Clock, R: RunIdSource> RuleBasedModel<C, R> {
    /// Use custom severity weights.
    pub fn with_weights(mut self, weights: SeverityWeights) -> Self {
        self.scorer = Scorer::new(weights);
        self
    }

    /// Replace the rule catalog.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Use a different time source.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> RuleBasedModel<C2, R> {
        RuleBasedModel {
            extractor: self.extractor,
            rules: self.rules,
            scorer: self.scorer,
            clock,
            run_ids: self.run_ids,
        }
    }

    /// Use a different run-id generator.
    pub fn with_run_ids<R2: RunIdSource>(self, run_ids: R2) -> RuleBasedModel<C, R2> {
        RuleBasedModel {
            extractor: self.extractor,
            rules: self.rules,
            scorer: self.scorer,
            clock: self.clock,
            run_ids,
        }
    }

    pub fn weights(&self) -> &SeverityWeights {
        self.scorer.weights()
    }

    /// Run the pipeline. Never fails: empty text degrades to the
    /// zero-signal feature set and the fallback finding.
    pub fn run(&self, contract_text: &str, title: &str, source_type: SourceType) -> AnalysisResult {
        let run_id = self.run_ids.next_id(self.clock.now());
        let mut audit = AuditTrail::new(&self.clock);
        audit.record(
            audit::UPLOAD_RECEIVED,
            Some(json!({ "source_type": source_type })),
        );
        debug!("Run {} started for '{}' ({})", run_id, title, source_type);

        let features = self.extractor.extract(contract_text);
        audit.record(
            audit::FEATURES_EXTRACTED,
            Some(json!({ "feature_count": features.len() })),
        );

        let findings = self.rules.generate(&features);
        let (score, scoring) = self.scorer.score(&findings);
        audit.record(
            audit::SCORING_COMPLETED,
            Some(json!({ "score": score, "level": scoring.risk_level })),
        );

        let summary = Summary {
            overall_risk_score: score,
            risk_level: scoring.risk_level,
            top_risks: top_risks(&findings),
        };
        let contract = ContractMeta {
            title: title.to_string(),
            source_type,
            text_length: text_length(contract_text),
        };
        audit.record(audit::ANALYSIS_COMPLETED, None);

        info!(
            "Run {} complete: {} findings, score {} ({})",
            run_id,
            findings.len(),
            score,
            summary.risk_level
        );

        AnalysisResult {
            run_id,
            contract,
            summary,
            findings,
            features,
            scoring,
            audit: audit.into_events(),
        }
    }
}

impl<C: Clock, R: RunIdSource> ContractRiskModel for RuleBasedModel<C, R> {
    fn analyze(
        &self,
        contract_text: &str,
        title: &str,
        source_type: SourceType,
    ) -> ModelResult<AnalysisResult> {
        Ok(self.run(contract_text, title, source_type))
    }
}

/// Analyze with the default rule-based model
pub fn analyze(contract_text: &str, title: &str, source_type: SourceType) -> AnalysisResult {
    RuleBasedModel::new().run(contract_text, title, source_type)
}

/// Category and truncated statement of the first findings
pub fn top_risks(findings: &[Finding]) -> Vec<TopRisk> {
    findings
        .iter()
        .take(TOP_RISK_COUNT)
        .map(|f| TopRisk {
            category: f.category().to_string(),
            title: f.risk_statement().chars().take(TOP_RISK_TITLE_CHARS).collect(),
        })
        .collect()
}
