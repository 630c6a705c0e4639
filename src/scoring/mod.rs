//! Weighted-severity risk scoring
//!
//! Converts findings into a normalized 0-100 score and a discrete risk
//! level. Every step is recorded in a [`ScoringBreakdown`] so the number
//! can be reviewed by hand.
//!
//! # Scoring Formula
//!
//! ```text
//! points_i   = weight(severity_i) × confidence_i
//! total      = Σ points_i
//! normalized = round(min(100, total / 150 × 100))
//! ```
//!
//! 150 is the calibration constant: three Critical findings at full
//! confidence with the default weights.
//!
//! # Default Weights
//!
//! - Low: 10
//! - Medium: 20
//! - High: 35
//! - Critical: 50
//!
//! # Risk Levels
//!
//! - ≥ 80: Critical
//! - ≥ 60: High
//! - ≥ 35: Medium
//! - otherwise: Low
//!
//! # Example
//!
//! One High finding at confidence 1.0 → 35 points → round(23.3) = 23 → Low.

mod weighted;

pub use weighted::{
    normalize, risk_level, score, Scorer, ScoringBreakdown, ScoringBreakdownItem,
    SeverityWeights, MAX_POINTS, SCORING_METHOD,
};
