// src/evaluator/preference.rs — Preference vectors and distance-based matching

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Attribute, CoreAttributes};
use crate::infra::errors::EvaluationError;

/// Value assumed for a core attribute the user left out.
pub const DEFAULT_PREFERENCE: f64 = 5.0;

/// Desired attribute values, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(BTreeMap<Attribute, f64>);

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same value for all five core attributes.
    pub fn uniform(value: f64) -> Self {
        Self(Attribute::CORE.iter().map(|a| (*a, value)).collect())
    }

    /// Exactly the given core values.
    pub fn from_core(core: &CoreAttributes) -> Self {
        Self(
            Attribute::CORE
                .iter()
                .filter_map(|a| core.get(*a).map(|v| (*a, v)))
                .collect(),
        )
    }

    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        self.0.insert(attribute, value);
        self
    }

    pub fn set(&mut self, attribute: Attribute, value: f64) {
        self.0.insert(attribute, value);
    }

    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        self.0.get(&attribute).copied()
    }

    /// Stated value, or `DEFAULT_PREFERENCE` when omitted.
    pub fn value_or_default(&self, attribute: Attribute) -> f64 {
        self.get(attribute).unwrap_or(DEFAULT_PREFERENCE)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        self.0.iter().map(|(a, v)| (*a, *v))
    }

    /// Values must be finite. Range is not checked: distant preferences
    /// simply match at 0.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        match self.0.iter().find(|(_, v)| !v.is_finite()) {
            Some((attribute, value)) => Err(EvaluationError::InvalidPreference {
                attribute: attribute.name().to_string(),
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(Attribute, f64)> for Preferences {
    fn from_iter<I: IntoIterator<Item = (Attribute, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Similarity of one attribute on a 0-100 scale: 10 points lost per unit of
/// distance.
pub fn attribute_match(preferred: f64, actual: f64) -> f64 {
    (100.0 - (preferred - actual).abs() / 10.0 * 100.0).clamp(0.0, 100.0)
}

/// Mean `attribute_match` over the five core attributes.
///
/// An empty preference set compares nothing and scores 0.
pub fn preference_match(core: &CoreAttributes, preferences: &Preferences) -> f64 {
    if preferences.is_empty() {
        return 0.0;
    }

    let scores: Vec<f64> = Attribute::CORE
        .iter()
        .filter_map(|a| {
            core.get(*a)
                .map(|actual| attribute_match(preferences.value_or_default(*a), actual))
        })
        .collect();

    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
