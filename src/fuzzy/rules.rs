// src/fuzzy/rules.rs — Index-resolved rules and firing strengths

use serde::{Deserialize, Serialize};

/// How a rule combines the degrees of its clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connective {
    /// Minimum of the clause degrees.
    #[default]
    And,
    /// Maximum of the clause degrees.
    Or,
}

impl Connective {
    /// Combine clause degrees. `None` when there is nothing to combine.
    pub fn combine<I>(self, degrees: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = degrees.into_iter();
        let first = iter.next()?;
        Some(match self {
            Connective::And => iter.fold(first, f64::min),
            Connective::Or => iter.fold(first, f64::max),
        })
    }
}

/// `variable is term`, both resolved to indices into the owning system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub variable: usize,
    pub term: usize,
}

/// A compiled rule: clauses joined by one connective, pointing at one
/// output term.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub connective: Connective,
    pub clauses: Vec<Clause>,
    pub consequent: usize,
}

impl Rule {
    /// Antecedent degree, or `None` if any clause has no input available.
    pub fn strength<F>(&self, mut degree: F) -> Option<f64>
    where
        F: FnMut(&Clause) -> Option<f64>,
    {
        let degrees = self
            .clauses
            .iter()
            .map(&mut degree)
            .collect::<Option<Vec<f64>>>()?;
        self.connective.combine(degrees)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiringStrength {
    pub rule: usize,
    pub consequent: usize,
    pub strength: f64,
    /// False when the rule was skipped because an input was unavailable.
    pub applicable: bool,
}

/// Fire every rule in parallel against the same inputs.
///
/// `degree` maps a clause to the membership degree of the current input in
/// that clause's term. Rules with an unavailable input fire at 0.
pub fn fire_all<F>(rules: &[Rule], mut degree: F) -> Vec<FiringStrength>
where
    F: FnMut(&Clause) -> Option<f64>,
{
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            let strength = rule.strength(&mut degree);
            FiringStrength {
                rule: i,
                consequent: rule.consequent,
                strength: strength.unwrap_or(0.0),
                applicable: strength.is_some(),
            }
        })
        .collect()
}

/// Per-output-term activation: the strongest rule pointing at each term.
pub fn activations(firings: &[FiringStrength], output_terms: usize) -> Vec<f64> {
    let mut levels = vec![0.0; output_terms];
    for f in firings {
        if let Some(level) = levels.get_mut(f.consequent) {
            *level = f64::max(*level, f.strength);
        }
    }
    levels
}
