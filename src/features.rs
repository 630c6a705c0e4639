//! Feature extraction from raw contract text
//!
//! Derives a fixed, ordered set of signals: the text length plus one
//! boolean per clause pattern. Matching is case-insensitive presence
//! testing over the whole text; there is no partial scoring.

use crate::models::{Feature, FeatureSet};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Feature names, in output order
pub mod names {
    pub const TEXT_LENGTH: &str = "text_length";
    pub const HAS_CONSEQUENTIAL_DAMAGES: &str = "has_consequential_damages";
    pub const HAS_UNCAPPED_LIABILITY: &str = "has_uncapped_liability";
    pub const HAS_INDEMNITY: &str = "has_indemnity";
    pub const HAS_TERMINATION_FOR_CONVENIENCE: &str = "has_termination_for_convenience";
    pub const HAS_CURE_PERIOD: &str = "has_cure_period";
    pub const HAS_AUTO_RENEWAL: &str = "has_auto_renewal";
}

/// (feature name, pattern). Order here is the order of the boolean features.
const CLAUSE_PATTERNS: &[(&str, &str)] = &[
    (names::HAS_CONSEQUENTIAL_DAMAGES, r"consequential damages"),
    (names::HAS_UNCAPPED_LIABILITY, r"(uncapped|unlimited)\s+liabilit"),
    (names::HAS_INDEMNITY, r"\bindemnif"),
    (
        names::HAS_TERMINATION_FOR_CONVENIENCE,
        r"terminate\s+for\s+convenience",
    ),
    (
        names::HAS_CURE_PERIOD,
        r"\bcure\s+period\b|\b\d+\s+days?\s+to\s+cure\b",
    ),
    (names::HAS_AUTO_RENEWAL, r"auto(?:matic)?\s+renew"),
];

static COMPILED: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

fn clause_patterns() -> &'static [(&'static str, Regex)] {
    COMPILED.get_or_init(|| {
        CLAUSE_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                let re = Regex::new(&format!("(?im){pattern}")).expect("valid clause regex");
                (*name, re)
            })
            .collect()
    })
}

/// Extracts clause signals from contract text
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the full feature set. Never fails; empty text yields all-false flags.
    pub fn extract(&self, text: &str) -> FeatureSet {
        let mut features = Vec::with_capacity(CLAUSE_PATTERNS.len() + 1);
        features.push(Feature::int(names::TEXT_LENGTH, text_length(text) as i64));

        for (name, re) in clause_patterns() {
            features.push(Feature::bool(*name, re.is_match(text)));
        }

        debug!(
            "Extracted {} features ({} flags set)",
            features.len(),
            features
                .iter()
                .filter(|f| f.value().as_bool() == Some(true))
                .count()
        );
        FeatureSet::new(features)
    }
}

/// Convenience wrapper over [`FeatureExtractor::extract`]
pub fn extract(text: &str) -> FeatureSet {
    FeatureExtractor::new().extract(text)
}

/// Length in characters, not bytes
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}
