// src/cli/evaluate.rs — Single-hero evaluation and ranked recommendations

use crate::catalog::{Catalog, Role};
use crate::evaluator::{
    EvaluationResult, Explanation, HeroEvaluator, Preferences, Ranker, Recommendation,
};
use crate::infra::config::Config;
use crate::infra::errors::HeroPickError;

use super::open_store;

pub fn run_evaluate(
    catalog: &Catalog,
    config: &Config,
    hero_id: &str,
    prefs: &Preferences,
    explain: bool,
    json: bool,
) -> anyhow::Result<()> {
    let hero = catalog
        .get_by_id(hero_id)
        .ok_or_else(|| HeroPickError::HeroNotFound(hero_id.to_string()))?;
    let evaluator = HeroEvaluator::from_config(config)?;
    let result = evaluator.evaluate_hero(hero, prefs);
    let explanation = if explain && !result.is_error() {
        Some(evaluator.explain(hero)?)
    } else {
        None
    };

    if json {
        let value = match &explanation {
            Some(e) => serde_json::json!({ "evaluation": result, "explanation": e }),
            None => serde_json::to_value(&result)?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} ({})", hero.name, hero.role);
    print_result(&result);
    if let Some(e) = &explanation {
        print_explanation(e);
    }
    Ok(())
}

pub fn run_recommend(
    catalog: &Catalog,
    config: &Config,
    role: Option<&str>,
    limit: Option<usize>,
    prefs: &Preferences,
    save: bool,
    json: bool,
) -> anyhow::Result<()> {
    let role = role.map(Role::parse);
    let ranker = Ranker::from_config(config)?.with_limit(limit.or(config.ranking.limit));
    let ranked = match &role {
        Some(r) => ranker.recommend_for_role(catalog, r, prefs),
        None => ranker.rank(catalog.get_all(), prefs),
    };

    if save {
        let id = open_store(config)?.save_preference(role.as_ref(), prefs)?;
        eprintln!("Saved preference set {id}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }
    print_ranking(&ranked);
    Ok(())
}

fn print_result(result: &EvaluationResult) {
    if let Some(error) = &result.error {
        println!("  {error}");
        return;
    }
    println!("  Suitability:      {:>6.2}", result.suitability_score);
    println!("  Preference match: {:>6.2}", result.preference_match);
    println!("  Final score:      {:>6.2}", result.final_score);
    if !result.strengths.is_empty() {
        println!("  Strengths:  {}", result.strengths.join(", "));
    }
    if !result.weaknesses.is_empty() {
        println!("  Weaknesses: {}", result.weaknesses.join(", "));
    }
}

fn print_explanation(explanation: &Explanation) {
    println!();
    if explanation.fallback {
        println!("  No rule fired; fallback score used.");
    }
    for (category, level) in &explanation.categories {
        println!("  {:<8} {:.2}", category, level);
    }
    println!();
    for rule in explanation.fired() {
        println!(
            "  {:.2}  {:<36} -> {}",
            rule.strength, rule.rule, rule.consequent
        );
    }
}

fn print_ranking(ranked: &[Recommendation]) {
    if ranked.is_empty() {
        println!("No heroes to recommend.");
        return;
    }
    println!(
        "  {:>3}  {:<14} {:<10} {:>7} {:>7} {:>7}",
        "#", "HERO", "ROLE", "FINAL", "SUIT", "PREF"
    );
    for (i, rec) in ranked.iter().enumerate() {
        let e = &rec.evaluation;
        println!(
            "  {:>3}  {:<14} {:<10} {:>7.2} {:>7.2} {:>7.2}",
            i + 1,
            rec.hero.name,
            rec.hero.role.as_str(),
            e.final_score,
            e.suitability_score,
            e.preference_match
        );
    }
}
