// src/evaluator/schema.rs — Attribute schemas and their linguistic variables

use serde::{Deserialize, Serialize};

use crate::catalog::Attribute;
use crate::fuzzy::{LinguisticVariable, MembershipFn, Term};

/// Which attribute set (and matching rule bank) the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeSchema {
    /// The five core attributes and the 27 role rules.
    #[default]
    Basic,
    /// Core + extended attributes + performance statistics.
    Extended,
}

impl AttributeSchema {
    pub fn name(self) -> &'static str {
        match self {
            AttributeSchema::Basic => "basic",
            AttributeSchema::Extended => "extended",
        }
    }

    /// Input attributes, in variable-index order.
    pub fn attributes(self) -> Vec<Attribute> {
        match self {
            AttributeSchema::Basic => Attribute::CORE.to_vec(),
            AttributeSchema::Extended => Attribute::all().collect(),
        }
    }

    pub fn includes(self, attribute: Attribute) -> bool {
        self.attributes().contains(&attribute)
    }
}

const LOW_MEDIUM_HIGH: [&str; 3] = ["low", "medium", "high"];

/// The linguistic variable the engine fuzzifies `attribute` with.
///
/// 0-10 attributes use an automatic three-way partition. Statistics have
/// hand-placed breakpoints because their useful range is not linear.
pub fn input_variable(attribute: Attribute) -> LinguisticVariable {
    let name = attribute.name();
    let (lo, hi) = attribute.universe();
    let tri = MembershipFn::triangular;

    match attribute {
        Attribute::Difficulty => {
            LinguisticVariable::automatic(name, lo, hi, &["easy", "medium", "hard"])
        }
        Attribute::SkillEffectOverall => {
            LinguisticVariable::automatic(name, lo, hi, &["weak", "medium", "strong"])
        }
        Attribute::MovementSpd => {
            LinguisticVariable::automatic(name, lo, hi, &["slow", "medium", "fast"])
        }
        Attribute::WinRate => LinguisticVariable::new(
            name,
            lo,
            hi,
            vec![
                Term::new("low", tri(40.0, 40.0, 50.0)),
                Term::new("medium", tri(45.0, 50.0, 55.0)),
                Term::new("high", tri(50.0, 60.0, 60.0)),
            ],
        ),
        Attribute::ProfitFactor => LinguisticVariable::new(
            name,
            lo,
            hi,
            vec![
                Term::new("poor", tri(0.5, 0.5, 1.0)),
                Term::new("fair", tri(0.75, 1.0, 1.5)),
                Term::new("good", tri(1.0, 2.0, 2.0)),
            ],
        ),
        Attribute::MaxDrawdown => LinguisticVariable::new(
            name,
            lo,
            hi,
            vec![
                Term::new("small", tri(0.0, 0.0, 20.0)),
                Term::new("moderate", tri(10.0, 25.0, 40.0)),
                Term::new("large", tri(30.0, 50.0, 50.0)),
            ],
        ),
        Attribute::MaxConsecutiveLoss => LinguisticVariable::new(
            name,
            lo,
            hi,
            vec![
                Term::new("few", tri(0.0, 0.0, 4.0)),
                Term::new("some", tri(2.0, 5.0, 8.0)),
                Term::new("many", tri(6.0, 10.0, 10.0)),
            ],
        ),
        _ => LinguisticVariable::automatic(name, lo, hi, &LOW_MEDIUM_HIGH),
    }
}

/// Output variable: suitability on [0, 100].
pub fn suitability_variable() -> LinguisticVariable {
    let tri = MembershipFn::triangular;
    LinguisticVariable::new(
        "suitability",
        0.0,
        100.0,
        vec![
            Term::new("low", tri(0.0, 0.0, 50.0)),
            Term::new("medium", tri(25.0, 50.0, 75.0)),
            Term::new("high", tri(50.0, 100.0, 100.0)),
        ],
    )
}
