// src/evaluator/ranker.rs — Score and order heroes for a preference set

use tracing::{debug, warn};

use super::engine::HeroEvaluator;
use super::preference::Preferences;
use super::types::Recommendation;
use crate::catalog::{Catalog, Hero, Role};
use crate::infra::config::Config;
use crate::infra::errors::EngineError;

/// Ranks heroes by final score, best first.
#[derive(Debug, Clone)]
pub struct Ranker {
    evaluator: HeroEvaluator,
    limit: Option<usize>,
}

impl Ranker {
    pub fn new(evaluator: HeroEvaluator) -> Self {
        Self {
            evaluator,
            limit: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        Ok(Self {
            evaluator: HeroEvaluator::from_config(config)?,
            limit: config.ranking.limit,
        })
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn evaluator(&self) -> &HeroEvaluator {
        &self.evaluator
    }

    /// Evaluate every hero and sort by final score, descending.
    ///
    /// Heroes that fail evaluation are logged and left out. Equal scores keep
    /// their input order.
    pub fn rank(&self, heroes: &[Hero], preferences: &Preferences) -> Vec<Recommendation> {
        let mut ranked: Vec<Recommendation> = heroes
            .iter()
            .filter_map(|hero| match self.evaluator.try_evaluate(hero, preferences) {
                Ok(evaluation) => Some(Recommendation {
                    hero: hero.clone(),
                    evaluation,
                }),
                Err(e) => {
                    warn!("Skipping hero {} in ranking: {}", hero.name, e);
                    None
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.evaluation
                .final_score
                .total_cmp(&a.evaluation.final_score)
        });
        if let Some(limit) = self.limit {
            ranked.truncate(limit);
        }

        debug!(
            candidates = heroes.len(),
            ranked = ranked.len(),
            "ranked heroes"
        );
        ranked
    }

    /// Rank the catalog's heroes of one role.
    pub fn recommend_for_role(
        &self,
        catalog: &Catalog,
        role: &Role,
        preferences: &Preferences,
    ) -> Vec<Recommendation> {
        self.rank(&catalog.get_by_role(role), preferences)
    }
}
