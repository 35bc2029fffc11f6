// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::evaluator::rule_bank::RuleDef;
use crate::evaluator::schema::AttributeSchema;
use crate::fuzzy::Implication;
use crate::infra::errors::EngineError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// What to do when a rule reads an attribute the hero record lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAttributePolicy {
    /// Fail the evaluation with `MissingAttribute`.
    Reject,
    /// Substitute the middle of the attribute's universe.
    Midpoint,
    /// Rules that mention the attribute do not fire.
    #[default]
    SkipRules,
}

/// What to do with a value outside its attribute's universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    #[default]
    Reject,
    Clamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub schema: AttributeSchema,
    pub missing_attributes: MissingAttributePolicy,
    pub out_of_range: OutOfRangePolicy,
    pub implication: Implication,
    /// Sampling step over the suitability universe for the centroid.
    pub resolution: f64,
    /// Suitability reported when no rule fires at all.
    pub empty_output_score: f64,
    pub extra_rules: Vec<RuleDef>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            schema: AttributeSchema::Basic,
            missing_attributes: MissingAttributePolicy::SkipRules,
            out_of_range: OutOfRangePolicy::Reject,
            implication: Implication::Clip,
            resolution: 0.1,
            empty_output_score: 0.0,
            extra_rules: Vec::new(),
        }
    }
}

/// Finest accepted sampling step over the suitability universe.
pub const MIN_RESOLUTION: f64 = 0.001;

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_RESOLUTION..=100.0).contains(&self.resolution) {
            return Err(EngineError::InvalidConfig(format!(
                "resolution must be in [{MIN_RESOLUTION}, 100], got {}",
                self.resolution
            )));
        }
        if !(0.0..=100.0).contains(&self.empty_output_score) {
            return Err(EngineError::InvalidConfig(format!(
                "empty_output_score must be in [0, 100], got {}",
                self.empty_output_score
            )));
        }
        Ok(())
    }
}

/// Weights of suitability and preference match in the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub suitability: f64,
    pub preference: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            suitability: 0.6,
            preference: 0.4,
        }
    }
}

impl BlendWeights {
    pub fn validate(&self) -> Result<(), EngineError> {
        let in_unit = |w: f64| w.is_finite() && (0.0..=1.0).contains(&w);
        if !in_unit(self.suitability)
            || !in_unit(self.preference)
            || (self.suitability + self.preference - 1.0).abs() > 1e-6
        {
            return Err(EngineError::InvalidBlendWeights {
                suitability: self.suitability,
                preference: self.preference,
            });
        }
        Ok(())
    }

    pub fn blend(&self, suitability: f64, preference: f64) -> f64 {
        self.suitability * suitability + self.preference * preference
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub blend_weights: BlendWeights,
    /// Keep only the top `limit` recommendations.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// External catalog file (.json or .toml). Bundled heroes when unset.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: Option<String>,
}

impl StoreConfig {
    pub fn db_path(&self) -> PathBuf {
        self.path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(paths::db_path)
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
