//! Weighted severity sum scorer

use crate::error::ValidationError;
use crate::models::{Finding, RiskLevel, Severity};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Identifier written into every breakdown
pub const SCORING_METHOD: &str = "weighted_severity_sum_v1";

/// Total points that map to a score of 100
pub const MAX_POINTS: f64 = 150.0;

/// Severity → weight map. Weights strictly increase with severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeightsRecord")]
pub struct SeverityWeights {
    #[serde(rename = "Low")]
    low: u32,
    #[serde(rename = "Medium")]
    medium: u32,
    #[serde(rename = "High")]
    high: u32,
    #[serde(rename = "Critical")]
    critical: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 10,
            medium: 20,
            high: 35,
            critical: 50,
        }
    }
}

impl SeverityWeights {
    pub fn new(low: u32, medium: u32, high: u32, critical: u32) -> Result<Self, ValidationError> {
        if low < medium && medium < high && high < critical {
            Ok(Self {
                low,
                medium,
                high,
                critical,
            })
        } else {
            Err(ValidationError::NonIncreasingWeights {
                low,
                medium,
                high,
                critical,
            })
        }
    }

    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }
}

#[derive(Deserialize)]
struct WeightsRecord {
    #[serde(rename = "Low", alias = "low")]
    low: u32,
    #[serde(rename = "Medium", alias = "medium")]
    medium: u32,
    #[serde(rename = "High", alias = "high")]
    high: u32,
    #[serde(rename = "Critical", alias = "critical")]
    critical: u32,
}

impl TryFrom<WeightsRecord> for SeverityWeights {
    type Error = ValidationError;

    fn try_from(r: WeightsRecord) -> Result<Self, Self::Error> {
        SeverityWeights::new(r.low, r.medium, r.high, r.critical)
    }
}

/// Contribution of one finding to the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringBreakdownItem {
    pub finding_id: String,
    pub severity: Severity,
    pub weight: u32,
    pub confidence: f64,
    /// Rounded to 2 decimals for display
    pub points: f64,
}

/// Complete score breakdown for transparency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    pub method: String,
    pub weights: SeverityWeights,
    /// Rounded to 2 decimals for display
    pub total_points: f64,
    pub normalized_score_0_100: u32,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub items: Vec<ScoringBreakdownItem>,
}

/// Weighted severity scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: SeverityWeights,
}

impl Scorer {
    pub fn new(weights: SeverityWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &SeverityWeights {
        &self.weights
    }

    /// Score a list of findings. Returns the normalized score and its breakdown.
    pub fn score(&self, findings: &[Finding]) -> (u32, ScoringBreakdown) {
        if findings.is_empty() {
            debug!("No findings to score");
            return (0, self.breakdown(0.0, 0, Vec::new()));
        }

        let mut total_points = 0.0;
        let items: Vec<ScoringBreakdownItem> = findings
            .iter()
            .map(|f| {
                let weight = self.weights.weight(f.severity());
                let confidence = f.confidence().value();
                let points = f64::from(weight) * confidence;
                total_points += points;
                ScoringBreakdownItem {
                    finding_id: f.finding_id().to_string(),
                    severity: f.severity(),
                    weight,
                    confidence,
                    points: round2(points),
                }
            })
            .collect();

        let normalized = normalize(total_points);
        let breakdown = self.breakdown(total_points, normalized, items);

        info!(
            "Risk score: {} ({}) from {} findings, {:.2} points",
            normalized,
            breakdown.risk_level,
            findings.len(),
            total_points
        );
        (normalized, breakdown)
    }

    fn breakdown(
        &self,
        total_points: f64,
        normalized: u32,
        items: Vec<ScoringBreakdownItem>,
    ) -> ScoringBreakdown {
        ScoringBreakdown {
            method: SCORING_METHOD.to_string(),
            weights: self.weights,
            total_points: round2(total_points),
            normalized_score_0_100: normalized,
            risk_level: risk_level(normalized),
            items,
        }
    }
}

/// Score with the default weights
pub fn score(findings: &[Finding]) -> (u32, ScoringBreakdown) {
    Scorer::default().score(findings)
}

/// Map total points onto 0-100. Ties round to even.
pub fn normalize(total_points: f64) -> u32 {
    let pct = (total_points / MAX_POINTS * 100.0).clamp(0.0, 100.0);
    pct.round_ties_even() as u32
}

/// Discrete level for a normalized score
pub fn risk_level(score: u32) -> RiskLevel {
    match score {
        s if s >= 80 => Severity::Critical,
        s if s >= 60 => Severity::High,
        s if s >= 35 => Severity::Medium,
        _ => Severity::Low,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}
