// src/evaluator/engine.rs — Fuzzy suitability engine

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::preference::{preference_match, Preferences};
use super::rule_bank::CompiledRuleBank;
use super::schema::AttributeSchema;
use super::types::{round2, EvaluationResult, Explanation, RuleActivation};
use crate::catalog::{Attribute, AttributeKind, Hero};
use crate::fuzzy::rules::{activations, fire_all, FiringStrength};
use crate::fuzzy::{aggregate, centroid};
use crate::infra::config::{
    BlendWeights, Config, EngineConfig, MissingAttributePolicy, OutOfRangePolicy,
};
use crate::infra::errors::{EngineError, EvaluationError};

/// Evaluates heroes against a compiled rule bank.
///
/// Holds no mutable state: every call is a pure function of the hero, the
/// preferences and the (shared, read-only) rule bank, so one evaluator can
/// serve any number of threads.
#[derive(Debug, Clone)]
pub struct HeroEvaluator {
    bank: Arc<CompiledRuleBank>,
    config: EngineConfig,
    weights: BlendWeights,
}

/// Raw (unrounded) outcome of inference.
struct Inference {
    suitability: f64,
    fallback: bool,
    firings: Vec<FiringStrength>,
    levels: Vec<f64>,
}

impl HeroEvaluator {
    /// Compile the configured rule bank. Any configuration problem is fatal.
    pub fn new(config: EngineConfig, weights: BlendWeights) -> Result<Self, EngineError> {
        config.validate()?;
        weights.validate()?;
        let bank = CompiledRuleBank::for_schema(config.schema, &config.extra_rules)?;
        Ok(Self {
            bank: Arc::new(bank),
            config,
            weights,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        Self::new(config.engine.clone(), config.ranking.blend_weights)
    }

    /// Share an already compiled bank.
    pub fn with_bank(
        bank: Arc<CompiledRuleBank>,
        config: EngineConfig,
        weights: BlendWeights,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        weights.validate()?;
        Ok(Self {
            bank,
            config,
            weights,
        })
    }

    pub fn rule_bank(&self) -> &CompiledRuleBank {
        &self.bank
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    pub fn schema(&self) -> AttributeSchema {
        self.bank.schema()
    }

    /// Evaluate one hero, turning failures into an error payload.
    pub fn evaluate_hero(&self, hero: &Hero, preferences: &Preferences) -> EvaluationResult {
        match self.try_evaluate(hero, preferences) {
            Ok(result) => result,
            Err(e) => {
                warn!("Error evaluating hero {}: {}", hero.name, e);
                EvaluationResult::failed(&e)
            }
        }
    }

    /// Evaluate one hero, propagating failures.
    pub fn try_evaluate(
        &self,
        hero: &Hero,
        preferences: &Preferences,
    ) -> Result<EvaluationResult, EvaluationError> {
        preferences.validate()?;
        let inference = self.infer(hero)?;
        let preference = preference_match(&hero.core, preferences);
        let final_score = self.weights.blend(inference.suitability, preference);

        debug!(
            hero = %hero.name,
            suitability = inference.suitability,
            preference,
            final_score,
            "evaluated"
        );

        Ok(EvaluationResult {
            suitability_score: round2(inference.suitability),
            preference_match: round2(preference),
            final_score: round2(final_score),
            attributes: Attribute::CORE
                .iter()
                .filter_map(|a| hero.attribute(*a).map(|v| (a.name().to_string(), v)))
                .collect(),
            statistics: self.statistics_echo(hero),
            strengths: hero.strengths.clone(),
            weaknesses: hero.weaknesses.clone(),
            error: None,
        })
    }

    /// Rule-bank suitability on [0, 100], rounded to two decimals.
    pub fn suitability(&self, hero: &Hero) -> Result<f64, EvaluationError> {
        self.infer(hero).map(|i| round2(i.suitability))
    }

    /// Per-rule firing strengths and per-category activations for a hero.
    pub fn explain(&self, hero: &Hero) -> Result<Explanation, EvaluationError> {
        let inference = self.infer(hero)?;
        let output = self.bank.output();
        let term_name = |i: usize| {
            output
                .terms()
                .get(i)
                .map(|t| t.name.clone())
                .unwrap_or_default()
        };

        let rules = inference
            .firings
            .iter()
            .zip(self.bank.definitions())
            .map(|(f, def)| RuleActivation {
                rule: def.id.clone(),
                consequent: term_name(f.consequent),
                strength: f.strength,
                applicable: f.applicable,
            })
            .collect();
        let categories = inference
            .levels
            .iter()
            .enumerate()
            .map(|(i, level)| (term_name(i), *level))
            .collect();

        Ok(Explanation {
            suitability_score: round2(inference.suitability),
            fallback: inference.fallback,
            rules,
            categories,
        })
    }

    fn infer(&self, hero: &Hero) -> Result<Inference, EvaluationError> {
        let degrees = self.fuzzify(hero)?;
        let firings = fire_all(self.bank.rules(), |clause| {
            degrees[clause.variable]
                .as_ref()
                .and_then(|d| d.get(clause.term).copied())
        });

        let output = self.bank.output();
        let levels = activations(&firings, output.terms().len());
        let samples = aggregate(
            output,
            &levels,
            self.config.implication,
            self.config.resolution,
        );

        let (suitability, fallback) = match centroid(&samples) {
            Some(c) if c.is_finite() => (c.clamp(0.0, 100.0), false),
            Some(c) => {
                return Err(EvaluationError::EvaluationFailure(format!(
                    "centroid for '{}' is not finite ({c})",
                    hero.name
                )))
            }
            None => {
                warn!(
                    "No rule fired for hero {}; using suitability {}",
                    hero.name, self.config.empty_output_score
                );
                (self.config.empty_output_score, true)
            }
        };

        Ok(Inference {
            suitability,
            fallback,
            firings,
            levels,
        })
    }

    /// Membership degrees per input variable; `None` for an input the rules
    /// must skip.
    fn fuzzify(&self, hero: &Hero) -> Result<Vec<Option<Vec<f64>>>, EvaluationError> {
        let mut degrees = Vec::with_capacity(self.bank.inputs().len());
        for (index, (attribute, variable)) in self
            .bank
            .attributes()
            .iter()
            .zip(self.bank.inputs())
            .enumerate()
        {
            let value = match hero.attribute(*attribute) {
                Some(v) => Some(self.check_range(hero, *attribute, v)?),
                None if !self.bank.is_referenced(index) => None,
                None => match self.config.missing_attributes {
                    MissingAttributePolicy::Reject => {
                        return Err(EvaluationError::MissingAttribute {
                            hero: hero.name.clone(),
                            attribute: attribute.name().to_string(),
                        })
                    }
                    MissingAttributePolicy::Midpoint => {
                        debug!(
                            "Hero {} has no {}; using midpoint {}",
                            hero.name,
                            attribute,
                            variable.midpoint()
                        );
                        Some(variable.midpoint())
                    }
                    MissingAttributePolicy::SkipRules => None,
                },
            };
            degrees.push(value.map(|v| variable.fuzzify(v)));
        }
        Ok(degrees)
    }

    fn check_range(
        &self,
        hero: &Hero,
        attribute: Attribute,
        value: f64,
    ) -> Result<f64, EvaluationError> {
        let (min, max) = attribute.universe();
        let out_of_range = || EvaluationError::OutOfRangeAttribute {
            hero: hero.name.clone(),
            attribute: attribute.name().to_string(),
            value,
            min,
            max,
        };

        if !value.is_finite() {
            return Err(out_of_range());
        }
        if value >= min && value <= max {
            return Ok(value);
        }
        match self.config.out_of_range {
            OutOfRangePolicy::Reject => Err(out_of_range()),
            OutOfRangePolicy::Clamp => {
                debug!("Clamping {} of hero {} ({})", attribute, hero.name, value);
                Ok(value.clamp(min, max))
            }
        }
    }

    fn statistics_echo(&self, hero: &Hero) -> Option<BTreeMap<String, f64>> {
        if self.schema() != AttributeSchema::Extended {
            return None;
        }
        Some(
            self.bank
                .attributes()
                .iter()
                .filter(|a| a.kind() == AttributeKind::Statistic)
                .filter_map(|a| hero.attribute(*a).map(|v| (a.name().to_string(), v)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CoreAttributes, Statistics};
    use crate::evaluator::rule_bank::{Condition, RuleDef};
    use crate::fuzzy::Connective;

    fn basic() -> HeroEvaluator {
        HeroEvaluator::new(EngineConfig::default(), BlendWeights::default()).unwrap()
    }

    fn extended(policy: MissingAttributePolicy) -> HeroEvaluator {
        HeroEvaluator::new(
            EngineConfig {
                schema: AttributeSchema::Extended,
                missing_attributes: policy,
                ..Default::default()
            },
            BlendWeights::default(),
        )
        .unwrap()
    }

    fn hero(core: CoreAttributes) -> Hero {
        Hero::new("x", "Subject", "Tank", core)
    }

    fn uniform(v: f64) -> Hero {
        hero(CoreAttributes::new(v, v, v, v, v))
    }

    #[test]
    fn test_tigreal_scores_above_midpoint() {
        let tigreal = hero(CoreAttributes::new(3.0, 8.0, 9.0, 4.0, 2.0));
        let result = basic().try_evaluate(&tigreal, &Preferences::uniform(5.0)).unwrap();
        assert!(result.suitability_score > 53.0, "{}", result.suitability_score);
        assert!(result.suitability_score < 55.0, "{}", result.suitability_score);
        assert!((result.preference_match - 74.0).abs() < 1e-9);
        let expected = 0.6 * result.suitability_score + 0.4 * 74.0;
        assert!((result.final_score - expected).abs() < 0.02);
        assert!(result.statistics.is_none());
    }

    #[test]
    fn test_uniform_extremes() {
        let e = basic();
        let zero = e.suitability(&uniform(0.0)).unwrap();
        let mid = e.suitability(&uniform(5.0)).unwrap();
        let ten = e.suitability(&uniform(10.0)).unwrap();
        assert!((zero - 16.67).abs() < 0.02, "{zero}");
        assert!((mid - 50.0).abs() < 0.02, "{mid}");
        assert!((ten - 66.92).abs() < 0.05, "{ten}");
    }

    #[test]
    fn test_out_of_range_rejected_by_default() {
        let mut h = uniform(5.0);
        h.core.damage = 11.0;
        let err = basic().try_evaluate(&h, &Preferences::new()).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::OutOfRangeAttribute { ref attribute, value, .. }
                if attribute == "damage" && value == 11.0
        ));
    }

    #[test]
    fn test_out_of_range_clamped_when_configured() {
        let e = HeroEvaluator::new(
            EngineConfig {
                out_of_range: OutOfRangePolicy::Clamp,
                ..Default::default()
            },
            BlendWeights::default(),
        )
        .unwrap();
        let mut over = uniform(10.0);
        over.core.durability = 14.0;
        assert_eq!(
            e.suitability(&over).unwrap(),
            e.suitability(&uniform(10.0)).unwrap()
        );
    }

    #[test]
    fn test_nan_always_rejected() {
        let e = HeroEvaluator::new(
            EngineConfig {
                out_of_range: OutOfRangePolicy::Clamp,
                ..Default::default()
            },
            BlendWeights::default(),
        )
        .unwrap();
        let mut h = uniform(5.0);
        h.core.mobility = f64::NAN;
        assert!(e.suitability(&h).is_err());
    }

    #[test]
    fn test_error_payload_instead_of_panic() {
        let mut h = uniform(5.0);
        h.core.difficulty = -1.0;
        let result = basic().evaluate_hero(&h, &Preferences::uniform(5.0));
        assert!(result.is_error());
        assert_eq!(result.suitability_score, 0.0);
        assert_eq!(result.final_score, 0.0);
        assert!(result.error.unwrap().contains("difficulty"));
    }

    #[test]
    fn test_invalid_preference_rejected() {
        let prefs = Preferences::uniform(5.0).with(Attribute::Damage, f64::INFINITY);
        let err = basic().try_evaluate(&uniform(5.0), &prefs).unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidPreference { .. }));
    }

    #[test]
    fn test_missing_statistics_reject_policy() {
        let err = extended(MissingAttributePolicy::Reject)
            .suitability(&uniform(5.0))
            .unwrap_err();
        assert!(matches!(err, EvaluationError::MissingAttribute { .. }));
    }

    #[test]
    fn test_missing_statistics_skip_policy_matches_basic() {
        // With every extended input absent, only the role rules can fire.
        let h = hero(CoreAttributes::new(3.0, 8.0, 9.0, 4.0, 2.0));
        let skipped = extended(MissingAttributePolicy::SkipRules).suitability(&h).unwrap();
        assert_eq!(skipped, basic().suitability(&h).unwrap());
    }

    #[test]
    fn test_missing_statistics_midpoint_policy_fires_more_rules() {
        let h = hero(CoreAttributes::new(3.0, 8.0, 9.0, 4.0, 2.0));
        let e = extended(MissingAttributePolicy::Midpoint);
        let explanation = e.explain(&h).unwrap();
        assert!(explanation.rules.iter().all(|r| r.applicable));
        let average = explanation
            .rules
            .iter()
            .find(|r| r.rule == "stats.average")
            .unwrap();
        // win_rate 50 is fully medium, profit_factor 1.25 is half fair
        assert!(average.strength > 0.0);
    }

    #[test]
    fn test_statistics_echoed_for_extended_schema() {
        let h = hero(CoreAttributes::new(3.0, 8.0, 9.0, 4.0, 2.0)).with_statistics(Statistics {
            win_rate: Some(52.3),
            profit_factor: Some(1.2),
            ..Default::default()
        });
        let result = extended(MissingAttributePolicy::SkipRules)
            .try_evaluate(&h, &Preferences::uniform(5.0))
            .unwrap();
        let stats = result.statistics.unwrap();
        assert_eq!(stats.get("win_rate"), Some(&52.3));
        assert_eq!(stats.get("profit_factor"), Some(&1.2));
        assert!(!stats.contains_key("max_drawdown"));
    }

    #[test]
    fn test_explain_tigreal_tank_rules() {
        let tigreal = hero(CoreAttributes::new(3.0, 8.0, 9.0, 4.0, 2.0));
        let explanation = basic().explain(&tigreal).unwrap();
        let strength = |id: &str| {
            explanation
                .rules
                .iter()
                .find(|r| r.rule == id)
                .map(|r| r.strength)
                .unwrap()
        };
        assert!((strength("tank.durable_controller") - 0.6).abs() < 1e-9);
        assert!((strength("tank.durable_partial_control") - 0.2).abs() < 1e-9);
        assert!((strength("tank.controller_medium_durability") - 0.4).abs() < 1e-9);
        assert_eq!(strength("tank.fragile_or_no_control"), 0.0);
        assert!((explanation.categories["high"] - 0.6).abs() < 1e-9);
        assert!((explanation.categories["medium"] - 0.6).abs() < 1e-9);
        assert!((explanation.categories["low"] - 0.4).abs() < 1e-9);
        assert!(!explanation.fallback);
    }

    #[test]
    fn test_no_rule_fired_uses_fallback_score() {
        let only_extremes = vec![RuleDef {
            id: "edge.only".into(),
            role: None,
            connective: Connective::And,
            conditions: vec![Condition {
                attribute: Attribute::Damage,
                term: "high".into(),
            }],
            consequent: "high".into(),
        }];
        let bank = CompiledRuleBank::compile(AttributeSchema::Basic, only_extremes).unwrap();
        let config = EngineConfig {
            empty_output_score: 12.5,
            ..Default::default()
        };
        let e = HeroEvaluator::with_bank(Arc::new(bank), config, BlendWeights::default()).unwrap();
        let explanation = e.explain(&uniform(5.0)).unwrap();
        assert!(explanation.fallback);
        assert_eq!(explanation.suitability_score, 12.5);
    }

    #[test]
    fn test_invalid_weights_are_fatal() {
        let err = HeroEvaluator::new(
            EngineConfig::default(),
            BlendWeights {
                suitability: 0.5,
                preference: 0.6,
            },
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidBlendWeights { .. }));
    }

    #[test]
    fn test_tiny_resolution_rejected_at_construction() {
        let err = HeroEvaluator::new(
            EngineConfig {
                resolution: 1e-12,
                ..Default::default()
            },
            BlendWeights::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_scale_implication_stays_in_range() {
        let e = HeroEvaluator::new(
            EngineConfig {
                implication: crate::fuzzy::Implication::Scale,
                ..Default::default()
            },
            BlendWeights::default(),
        )
        .unwrap();
        for v in [0.0, 2.5, 5.0, 7.5, 10.0] {
            let s = e.suitability(&uniform(v)).unwrap();
            assert!((0.0..=100.0).contains(&s), "{v}: {s}");
        }
    }
}
