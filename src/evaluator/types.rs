// src/evaluator/types.rs — Evaluation results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Hero;
use crate::infra::errors::EvaluationError;

/// Scores for one (hero, preferences) pair, shaped for JSON output.
///
/// On failure `error` is set and all scores are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub suitability_score: f64,
    pub preference_match: f64,
    pub final_score: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationResult {
    pub fn failed(error: &EvaluationError) -> Self {
        Self {
            suitability_score: 0.0,
            preference_match: 0.0,
            final_score: 0.0,
            attributes: BTreeMap::new(),
            statistics: None,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            error: Some(format!("Failed to evaluate hero: {error}")),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A ranked entry: the hero and how it scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub hero: Hero,
    pub evaluation: EvaluationResult,
}

/// How one rule fired for a hero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleActivation {
    pub rule: String,
    pub consequent: String,
    pub strength: f64,
    /// False when the rule was skipped for a missing attribute.
    pub applicable: bool,
}

/// Inference trace behind a suitability score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub suitability_score: f64,
    /// True when no rule fired and the configured fallback score was used.
    pub fallback: bool,
    pub rules: Vec<RuleActivation>,
    /// Strongest activation per suitability category.
    pub categories: BTreeMap<String, f64>,
}

impl Explanation {
    /// Rules with non-zero strength, strongest first.
    pub fn fired(&self) -> Vec<&RuleActivation> {
        let mut fired: Vec<&RuleActivation> =
            self.rules.iter().filter(|r| r.strength > 0.0).collect();
        fired.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        fired
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
