// src/fuzzy/variable.rs — Linguistic variables (a universe plus named terms)

use super::membership::{auto_partition, MembershipFn};

/// One named category of a linguistic variable, e.g. `durability is high`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub name: String,
    pub mf: MembershipFn,
}

impl Term {
    pub fn new(name: impl Into<String>, mf: MembershipFn) -> Self {
        Self {
            name: name.into(),
            mf,
        }
    }
}

/// A crisp universe `[min, max]` partitioned into named fuzzy terms.
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    min: f64,
    max: f64,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, min: f64, max: f64, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            terms,
        }
    }

    /// Evenly partition the universe into one term per name.
    pub fn automatic(name: impl Into<String>, min: f64, max: f64, names: &[&str]) -> Self {
        let terms = names
            .iter()
            .zip(auto_partition(min, max, names.len()))
            .map(|(n, mf)| Term::new(*n, mf))
            .collect();
        Self::new(name, min, max, terms)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == term)
    }

    /// Degree of `x` in the term at `index` (0.0 for an unknown index).
    pub fn degree(&self, index: usize, x: f64) -> f64 {
        self.terms.get(index).map_or(0.0, |t| t.mf.degree(x))
    }

    /// Degrees of `x` in every term, in declaration order.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.mf.degree(x)).collect()
    }

    /// Universe non-empty, at least one term, unique term names, sane shapes.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.min.is_finite() && self.max.is_finite() && self.max > self.min) {
            return Err(format!(
                "variable '{}' has an empty universe [{}, {}]",
                self.name, self.min, self.max
            ));
        }
        if self.terms.is_empty() {
            return Err(format!("variable '{}' has no terms", self.name));
        }
        for (i, term) in self.terms.iter().enumerate() {
            if !term.mf.is_well_formed() {
                return Err(format!(
                    "term '{}' of '{}' is not a valid shape",
                    term.name, self.name
                ));
            }
            if self.terms[..i].iter().any(|t| t.name == term.name) {
                return Err(format!(
                    "term '{}' declared twice on '{}'",
                    term.name, self.name
                ));
            }
        }
        Ok(())
    }
}
