// src/infra/errors.rs — Error types for HeroPick

use thiserror::Error;

/// Per-hero evaluation failures. Recoverable: batch ranking skips the hero,
/// single-hero evaluation turns it into an error payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Hero '{hero}' is missing attribute '{attribute}'")]
    MissingAttribute { hero: String, attribute: String },

    #[error("Hero '{hero}' has {attribute} = {value} outside [{min}, {max}]")]
    OutOfRangeAttribute {
        hero: String,
        attribute: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Preference for '{attribute}' is not a number: {value}")]
    InvalidPreference { attribute: String, value: f64 },

    #[error("Evaluation failed: {0}")]
    EvaluationFailure(String),
}

impl EvaluationError {
    /// The attribute the error is about, if any.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            EvaluationError::MissingAttribute { attribute, .. }
            | EvaluationError::OutOfRangeAttribute { attribute, .. }
            | EvaluationError::InvalidPreference { attribute, .. } => Some(attribute),
            EvaluationError::EvaluationFailure(_) => None,
        }
    }
}

/// Engine construction failures. Fatal: an engine is never built from a bad
/// rule bank or bad weights.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Rule '{rule}' is invalid: {reason}")]
    InvalidRuleBank { rule: String, reason: String },

    #[error("Blend weights must be in [0, 1] and sum to 1.0 (suitability {suitability}, preference {preference})")]
    InvalidBlendWeights { suitability: f64, preference: f64 },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate hero id '{0}'")]
    DuplicateId(String),

    #[error("Unsupported catalog format '{0}' (expected .json or .toml)")]
    UnknownFormat(String),

    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lookup failures raised by the store and the CLI. Everything else reaches
/// the binary as an `anyhow::Error` wrapping the layer's own error type.
#[derive(Error, Debug)]
pub enum HeroPickError {
    #[error("Hero '{0}' not found")]
    HeroNotFound(String),

    #[error("Preference set {0} not found")]
    PreferenceNotFound(i64),
}
