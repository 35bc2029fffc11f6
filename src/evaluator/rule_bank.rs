// src/evaluator/rule_bank.rs — Declarative rule tables and their compiled form

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schema::{input_variable, suitability_variable, AttributeSchema};
use crate::catalog::{Attribute, Role};
use crate::fuzzy::rules::{Clause, Rule};
use crate::fuzzy::{Connective, LinguisticVariable};
use crate::infra::errors::EngineError;
use Attribute::*;
use Connective::{And, Or};

/// `attribute is term`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub attribute: Attribute,
    pub term: String,
}

/// One rule as data: conditions joined by a connective, implying one
/// suitability category. `role` only documents which play style the rule
/// models; every rule fires for every hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub connective: Connective,
    pub conditions: Vec<Condition>,
    pub consequent: String,
}

type Row = (
    &'static str,
    Option<&'static str>,
    Connective,
    &'static [(Attribute, &'static str)],
    &'static str,
);

// One rule per row.
#[rustfmt::skip]
const ROLE_RULES: &[Row] = &[
    ("tank.durable_controller", Some("Tank"), And, &[(Durability, "high"), (CrowdControl, "high")], "high"),
    ("tank.durable_partial_control", Some("Tank"), And, &[(Durability, "high"), (CrowdControl, "medium")], "medium"),
    ("tank.controller_medium_durability", Some("Tank"), And, &[(Durability, "medium"), (CrowdControl, "high")], "medium"),
    ("tank.fragile_or_no_control", Some("Tank"), Or, &[(Durability, "low"), (CrowdControl, "low")], "low"),
    ("fighter.balanced", Some("Fighter"), And, &[(Damage, "medium"), (Durability, "medium")], "medium"),
    ("fighter.damage_bruiser", Some("Fighter"), And, &[(Damage, "high"), (Durability, "medium")], "high"),
    ("fighter.durable_bruiser", Some("Fighter"), And, &[(Damage, "medium"), (Durability, "high")], "high"),
    ("fighter.weak", Some("Fighter"), And, &[(Damage, "low"), (Durability, "low")], "low"),
    ("assassin.burst_mobile", Some("Assassin"), And, &[(Damage, "high"), (Mobility, "high")], "high"),
    ("assassin.burst_medium_mobility", Some("Assassin"), And, &[(Damage, "high"), (Mobility, "medium")], "medium"),
    ("assassin.mobile_medium_damage", Some("Assassin"), And, &[(Damage, "medium"), (Mobility, "high")], "medium"),
    ("assassin.low_threat", Some("Assassin"), Or, &[(Damage, "low"), (Mobility, "low")], "low"),
    ("mage.burst_with_control", Some("Mage"), And, &[(Damage, "high"), (CrowdControl, "medium")], "high"),
    ("mage.burst_no_control", Some("Mage"), And, &[(Damage, "high"), (CrowdControl, "low")], "medium"),
    ("mage.control_mage", Some("Mage"), And, &[(Damage, "medium"), (CrowdControl, "high")], "high"),
    ("mage.weak", Some("Mage"), And, &[(Damage, "low"), (CrowdControl, "low")], "low"),
    ("marksman.glass_cannon", Some("Marksman"), And, &[(Damage, "high"), (Durability, "low")], "high"),
    ("marksman.balanced", Some("Marksman"), And, &[(Damage, "medium"), (Mobility, "medium")], "medium"),
    ("marksman.mobile_carry", Some("Marksman"), And, &[(Damage, "high"), (Mobility, "high")], "high"),
    ("marksman.low_damage", Some("Marksman"), And, &[(Damage, "low")], "low"),
    ("support.durable_controller", Some("Support"), And, &[(CrowdControl, "high"), (Durability, "medium")], "high"),
    ("support.roaming", Some("Support"), And, &[(CrowdControl, "medium"), (Mobility, "high")], "high"),
    ("support.balanced", Some("Support"), And, &[(CrowdControl, "medium"), (Mobility, "medium")], "medium"),
    ("support.fragile_no_control", Some("Support"), And, &[(CrowdControl, "low"), (Durability, "low")], "low"),
    ("general.hard_carry", None, And, &[(Difficulty, "hard"), (Damage, "high")], "medium"),
    ("general.easy_mobile", None, And, &[(Difficulty, "easy"), (Mobility, "high")], "high"),
    ("general.all_round", None, And, &[(Difficulty, "medium"), (Durability, "medium"), (CrowdControl, "medium")], "medium"),
];

#[rustfmt::skip]
const QUALITY_RULES: &[Row] = &[
    ("quality.tanky", None, And, &[(DefenseOverall, "high"), (MagicDefense, "high")], "high"),
    ("quality.armored", None, And, &[(PhysicalDefense, "high"), (Durability, "high")], "high"),
    ("quality.hard_hitting", None, And, &[(OffenseOverall, "high"), (PhysicalAtk, "high")], "high"),
    ("quality.skill_control", None, And, &[(SkillEffectOverall, "strong"), (CrowdControl, "high")], "high"),
    ("quality.fast_mobile", None, And, &[(MovementSpd, "fast"), (Mobility, "high")], "high"),
    ("quality.paper_defense", None, And, &[(PhysicalDefense, "low"), (MagicDefense, "low")], "low"),
    ("quality.toothless", None, And, &[(OffenseOverall, "low"), (SkillEffectOverall, "weak")], "low"),
    ("quality.balanced", None, And, &[(DefenseOverall, "medium"), (OffenseOverall, "medium")], "medium"),
];

#[rustfmt::skip]
const STATISTIC_RULES: &[Row] = &[
    ("stats.winning_profitable", None, And, &[(WinRate, "high"), (ProfitFactor, "good")], "high"),
    ("stats.average", None, And, &[(WinRate, "medium"), (ProfitFactor, "fair")], "medium"),
    ("stats.losing", None, Or, &[(WinRate, "low"), (ProfitFactor, "poor")], "low"),
    ("stats.volatile", None, And, &[(MaxDrawdown, "large"), (MaxConsecutiveLoss, "many")], "low"),
    ("stats.steady", None, And, &[(MaxDrawdown, "small"), (MaxConsecutiveLoss, "few")], "high"),
    ("stats.contested", None, And, &[(PickRate, "high"), (BanRate, "high")], "high"),
];

fn expand(rows: &[Row]) -> impl Iterator<Item = RuleDef> + '_ {
    rows.iter()
        .map(|(id, role, connective, conditions, consequent)| RuleDef {
            id: id.to_string(),
            role: role.map(Role::parse),
            connective: *connective,
            conditions: conditions
                .iter()
                .map(|(attribute, term)| Condition {
                    attribute: *attribute,
                    term: term.to_string(),
                })
                .collect(),
            consequent: consequent.to_string(),
        })
}

/// The built-in rule table for a schema.
pub fn builtin_rules(schema: AttributeSchema) -> Vec<RuleDef> {
    match schema {
        AttributeSchema::Basic => expand(ROLE_RULES).collect(),
        AttributeSchema::Extended => expand(ROLE_RULES)
            .chain(expand(QUALITY_RULES))
            .chain(expand(STATISTIC_RULES))
            .collect(),
    }
}

/// A rule bank resolved against its schema's variables.
///
/// Built once and shared read-only between evaluations.
#[derive(Debug, Clone)]
pub struct CompiledRuleBank {
    schema: AttributeSchema,
    attributes: Vec<Attribute>,
    inputs: Vec<LinguisticVariable>,
    output: LinguisticVariable,
    definitions: Vec<RuleDef>,
    rules: Vec<Rule>,
}

impl CompiledRuleBank {
    /// Built-in rules for `schema` followed by `extra`.
    pub fn for_schema(schema: AttributeSchema, extra: &[RuleDef]) -> Result<Self, EngineError> {
        let mut definitions = builtin_rules(schema);
        definitions.extend(extra.iter().cloned());
        Self::compile(schema, definitions)
    }

    pub fn compile(schema: AttributeSchema, definitions: Vec<RuleDef>) -> Result<Self, EngineError> {
        let attributes = schema.attributes();
        let inputs: Vec<LinguisticVariable> =
            attributes.iter().map(|a| input_variable(*a)).collect();
        let output = suitability_variable();

        for var in inputs.iter().chain(std::iter::once(&output)) {
            var.validate().map_err(|reason| EngineError::InvalidRuleBank {
                rule: var.name().to_string(),
                reason,
            })?;
        }

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(definitions.len());
        for def in &definitions {
            let invalid = |reason: String| EngineError::InvalidRuleBank {
                rule: def.id.clone(),
                reason,
            };

            if def.id.trim().is_empty() {
                return Err(invalid("rule id is empty".into()));
            }
            if !seen.insert(def.id.as_str()) {
                return Err(invalid("rule id is declared twice".into()));
            }
            if def.conditions.is_empty() {
                return Err(invalid("rule has no conditions".into()));
            }

            let mut clauses = Vec::with_capacity(def.conditions.len());
            for cond in &def.conditions {
                let variable = attributes
                    .iter()
                    .position(|a| *a == cond.attribute)
                    .ok_or_else(|| {
                        invalid(format!(
                            "attribute '{}' is not part of the {} schema",
                            cond.attribute,
                            schema.name()
                        ))
                    })?;
                let term = inputs[variable].term_index(&cond.term).ok_or_else(|| {
                    invalid(format!(
                        "'{}' has no term '{}'",
                        cond.attribute, cond.term
                    ))
                })?;
                clauses.push(Clause { variable, term });
            }

            let consequent = output.term_index(&def.consequent).ok_or_else(|| {
                invalid(format!("unknown suitability category '{}'", def.consequent))
            })?;

            rules.push(Rule {
                connective: def.connective,
                clauses,
                consequent,
            });
        }

        debug!(
            "Compiled {} rule bank: {} rules over {} inputs",
            schema.name(),
            rules.len(),
            inputs.len()
        );

        Ok(Self {
            schema,
            attributes,
            inputs,
            output,
            definitions,
            rules,
        })
    }

    pub fn schema(&self) -> AttributeSchema {
        self.schema
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn definitions(&self) -> &[RuleDef] {
        &self.definitions
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether any rule reads the input at `variable`.
    pub fn is_referenced(&self, variable: usize) -> bool {
        self.rules
            .iter()
            .any(|r| r.clauses.iter().any(|c| c.variable == variable))
    }
}
