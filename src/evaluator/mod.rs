// src/evaluator/mod.rs — Hero evaluation and recommendation

pub mod engine;
pub mod preference;
pub mod ranker;
pub mod rule_bank;
pub mod schema;
pub mod types;

use std::sync::OnceLock;

pub use engine::HeroEvaluator;
pub use preference::{attribute_match, preference_match, Preferences, DEFAULT_PREFERENCE};
pub use ranker::Ranker;
pub use rule_bank::{builtin_rules, CompiledRuleBank, Condition, RuleDef};
pub use schema::AttributeSchema;
pub use types::{EvaluationResult, Explanation, Recommendation, RuleActivation};

use crate::catalog::Hero;
use crate::infra::config::{BlendWeights, EngineConfig};

static DEFAULT_EVALUATOR: OnceLock<HeroEvaluator> = OnceLock::new();

/// Process-wide evaluator with the built-in basic rule bank, compiled on
/// first use.
pub fn default_evaluator() -> &'static HeroEvaluator {
    DEFAULT_EVALUATOR.get_or_init(|| {
        HeroEvaluator::new(EngineConfig::default(), BlendWeights::default())
            .expect("built-in rule bank must compile")
    })
}

/// Evaluate one hero with the default engine. Failures come back as an
/// error payload.
pub fn evaluate_hero(hero: &Hero, preferences: &Preferences) -> EvaluationResult {
    default_evaluator().evaluate_hero(hero, preferences)
}

/// Rank heroes with the default engine, best first.
pub fn get_hero_recommendations(heroes: &[Hero], preferences: &Preferences) -> Vec<Recommendation> {
    Ranker::new(default_evaluator().clone()).rank(heroes, preferences)
}
