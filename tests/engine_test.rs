// tests/engine_test.rs — Integration test: fuzzy suitability engine

use std::sync::Arc;
use std::thread;

use heropick::catalog::{Attribute, Catalog, CoreAttributes, Hero, Role, Statistics};
use heropick::evaluator::{
    builtin_rules, default_evaluator, evaluate_hero, AttributeSchema, CompiledRuleBank,
    HeroEvaluator, Preferences,
};
use heropick::infra::config::{
    BlendWeights, Config, EngineConfig, MissingAttributePolicy, OutOfRangePolicy,
};
use heropick::infra::errors::{EngineError, EvaluationError};

fn hero(core: CoreAttributes) -> Hero {
    Hero::new("t", "Test", "Tank", core)
}

fn extended_engine(policy: MissingAttributePolicy) -> HeroEvaluator {
    let config = EngineConfig {
        schema: AttributeSchema::Extended,
        missing_attributes: policy,
        ..Default::default()
    };
    HeroEvaluator::new(config, BlendWeights::default()).unwrap()
}

#[test]
fn test_tigreal_reference_scores() {
    let catalog = Catalog::builtin().unwrap();
    let tigreal = catalog.get_by_id("1").unwrap();
    let result = evaluate_hero(tigreal, &Preferences::uniform(5.0));

    assert!(result.error.is_none());
    assert!(result.suitability_score > 50.0);
    assert!((result.suitability_score - 53.76).abs() < 0.011, "{}", result.suitability_score);
    assert_eq!(result.preference_match, 74.0);
    assert!((result.final_score - 61.86).abs() < 0.011, "{}", result.final_score);
    assert_eq!(result.attributes["crowd_control"], 9.0);
    assert_eq!(result.strengths.len(), 3);
}

#[test]
fn test_scores_bounded_over_attribute_grid() {
    let engine = default_evaluator();
    let levels = [0.0, 5.0, 10.0];
    let prefs = Preferences::uniform(5.0);
    for &a in &levels {
        for &b in &levels {
            for &c in &levels {
                for &d in &levels {
                    for &e in &levels {
                        let r = engine
                            .try_evaluate(&hero(CoreAttributes::new(a, b, c, d, e)), &prefs)
                            .unwrap();
                        for score in [r.suitability_score, r.preference_match, r.final_score] {
                            assert!((0.0..=100.0).contains(&score), "{a} {b} {c} {d} {e}: {score}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let engine = default_evaluator();
    let prefs = Preferences::uniform(7.0).with(Attribute::Difficulty, 2.0);
    for h in Catalog::builtin().unwrap().iter() {
        assert_eq!(engine.evaluate_hero(h, &prefs), engine.evaluate_hero(h, &prefs));
    }
}

#[test]
fn test_durable_control_diagonal_is_monotone() {
    // Raising durability and crowd control together never lowers suitability.
    let engine = default_evaluator();
    let mut previous = f64::MIN;
    for step in 0..=40 {
        let t = step as f64 * 0.25;
        let s = engine
            .suitability(&hero(CoreAttributes::new(3.0, t, t, 4.0, 2.0)))
            .unwrap();
        assert!(s >= previous - 1e-9, "t={t}: {s} < {previous}");
        previous = s;
    }
}

#[test]
fn test_whole_catalog_evaluates_under_both_schemas() {
    let catalog = Catalog::builtin().unwrap();
    let prefs = Preferences::uniform(5.0);
    for engine in [
        default_evaluator().clone(),
        extended_engine(MissingAttributePolicy::SkipRules),
    ] {
        for h in &catalog {
            let result = engine.try_evaluate(h, &prefs).unwrap();
            assert!((0.0..=100.0).contains(&result.final_score), "{}", h.name);
        }
    }
}

#[test]
fn test_reject_policy_yields_error_payload() {
    // The bundled heroes carry statistics but no extended attributes.
    let engine = extended_engine(MissingAttributePolicy::Reject);
    let catalog = Catalog::builtin().unwrap();
    let tigreal = catalog.get_by_id("1").unwrap();

    let err = engine.try_evaluate(tigreal, &Preferences::uniform(5.0)).unwrap_err();
    assert!(matches!(err, EvaluationError::MissingAttribute { .. }));

    let payload = engine.evaluate_hero(tigreal, &Preferences::uniform(5.0));
    assert_eq!(payload.final_score, 0.0);
    assert!(payload.error.unwrap().starts_with("Failed to evaluate hero"));
}

#[test]
fn test_statistics_separate_otherwise_identical_heroes() {
    let core = CoreAttributes::new(3.0, 8.0, 9.0, 4.0, 2.0);
    let strong = hero(core).with_statistics(Statistics {
        win_rate: Some(58.0),
        profit_factor: Some(1.9),
        max_drawdown: Some(5.0),
        max_consecutive_loss: Some(1.0),
        ..Default::default()
    });
    let weak = hero(core).with_statistics(Statistics {
        win_rate: Some(42.0),
        profit_factor: Some(0.6),
        max_drawdown: Some(45.0),
        max_consecutive_loss: Some(9.0),
        ..Default::default()
    });

    let engine = extended_engine(MissingAttributePolicy::SkipRules);
    let bare = engine.suitability(&hero(core)).unwrap();
    let high = engine.suitability(&strong).unwrap();
    let low = engine.suitability(&weak).unwrap();
    assert!(high > bare, "{high} <= {bare}");
    assert!(bare > low, "{bare} <= {low}");

    // The basic schema ignores statistics entirely.
    assert_eq!(
        default_evaluator().suitability(&strong).unwrap(),
        default_evaluator().suitability(&weak).unwrap()
    );
}

#[test]
fn test_tank_rules_alone_fall_back_when_nothing_fires() {
    let tank_rules: Vec<_> = builtin_rules(AttributeSchema::Basic)
        .into_iter()
        .filter(|r| r.role == Some(Role::Tank))
        .collect();
    assert_eq!(tank_rules.len(), 4);

    let bank = CompiledRuleBank::compile(AttributeSchema::Basic, tank_rules).unwrap();
    let engine =
        HeroEvaluator::with_bank(Arc::new(bank), EngineConfig::default(), BlendWeights::default())
            .unwrap();

    // Every input sits exactly on "medium"; no tank rule has a medium/medium case.
    let explanation = engine.explain(&hero(CoreAttributes::new(5.0, 5.0, 5.0, 5.0, 5.0))).unwrap();
    assert!(explanation.fallback);
    assert_eq!(explanation.suitability_score, 0.0);
    assert!(explanation.fired().is_empty());
}

#[test]
fn test_clamp_policy_accepts_out_of_range_values() {
    let clamp = HeroEvaluator::new(
        EngineConfig {
            out_of_range: OutOfRangePolicy::Clamp,
            ..Default::default()
        },
        BlendWeights::default(),
    )
    .unwrap();
    let wild = hero(CoreAttributes::new(-3.0, 12.0, 9.0, 4.0, 2.0));
    let tame = hero(CoreAttributes::new(0.0, 10.0, 9.0, 4.0, 2.0));
    assert_eq!(clamp.suitability(&wild).unwrap(), clamp.suitability(&tame).unwrap());
    assert!(default_evaluator().suitability(&wild).is_err());
}

#[test]
fn test_config_extra_rules_extend_the_bank() {
    let config: Config = toml::from_str(
        r#"
[[engine.extra_rules]]
id = "custom.sturdy_sprinter"
role = "Fighter"
conditions = [ { attribute = "durability", term = "high" }, { attribute = "mobility", term = "high" } ]
consequent = "high"
"#,
    )
    .unwrap();
    let engine = HeroEvaluator::from_config(&config).unwrap();
    assert_eq!(engine.rule_bank().len(), 28);

    // No built-in rule concludes "high" for this profile.
    let sprinter = hero(CoreAttributes::new(0.0, 10.0, 0.0, 10.0, 5.0));
    let baseline = default_evaluator().suitability(&sprinter).unwrap();
    assert!(engine.suitability(&sprinter).unwrap() > baseline);
}

#[test]
fn test_malformed_extra_rule_is_fatal() {
    let config: Config = toml::from_str(
        r#"
[[engine.extra_rules]]
id = "custom.broken"
conditions = [ { attribute = "difficulty", term = "high" } ]
consequent = "high"
"#,
    )
    .unwrap();
    // difficulty uses easy/medium/hard
    let err = HeroEvaluator::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidRuleBank { ref rule, .. } if rule == "custom.broken"
    ));
}

#[test]
fn test_concurrent_evaluations_match_sequential() {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let prefs = Preferences::uniform(6.0);
    let expected: Vec<_> = catalog
        .iter()
        .map(|h| default_evaluator().evaluate_hero(h, &prefs))
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let prefs = prefs.clone();
            thread::spawn(move || {
                catalog
                    .iter()
                    .map(|h| default_evaluator().evaluate_hero(h, &prefs))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
