// src/catalog/types.rs — Hero records, roles and attribute names

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Hero role. The six standard roles plus any other tag a catalog uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Tank,
    Fighter,
    Assassin,
    Mage,
    Marksman,
    Support,
    Other(String),
}

impl Role {
    pub const STANDARD: [Role; 6] = [
        Role::Tank,
        Role::Fighter,
        Role::Assassin,
        Role::Mage,
        Role::Marksman,
        Role::Support,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Role::Tank => "Tank",
            Role::Fighter => "Fighter",
            Role::Assassin => "Assassin",
            Role::Mage => "Mage",
            Role::Marksman => "Marksman",
            Role::Support => "Support",
            Role::Other(s) => s,
        }
    }

    /// Known names match case-insensitively; anything else is kept verbatim.
    pub fn parse(s: &str) -> Role {
        let trimmed = s.trim();
        Role::STANDARD
            .iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Role::Other(trimmed.to_string()))
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s)
    }
}

impl From<Role> for String {
    fn from(r: Role) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Core,
    Extended,
    Statistic,
}

/// Every numeric hero attribute the engine knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Damage,
    Durability,
    CrowdControl,
    Mobility,
    Difficulty,
    DefenseOverall,
    OffenseOverall,
    SkillEffectOverall,
    MovementSpd,
    MagicDefense,
    PhysicalAtk,
    PhysicalDefense,
    WinRate,
    PickRate,
    BanRate,
    ProfitFactor,
    MaxDrawdown,
    MaxConsecutiveLoss,
}

impl Attribute {
    pub const CORE: [Attribute; 5] = [
        Attribute::Damage,
        Attribute::Durability,
        Attribute::CrowdControl,
        Attribute::Mobility,
        Attribute::Difficulty,
    ];

    pub const EXTENDED: [Attribute; 7] = [
        Attribute::DefenseOverall,
        Attribute::OffenseOverall,
        Attribute::SkillEffectOverall,
        Attribute::MovementSpd,
        Attribute::MagicDefense,
        Attribute::PhysicalAtk,
        Attribute::PhysicalDefense,
    ];

    pub const STATISTICS: [Attribute; 6] = [
        Attribute::WinRate,
        Attribute::PickRate,
        Attribute::BanRate,
        Attribute::ProfitFactor,
        Attribute::MaxDrawdown,
        Attribute::MaxConsecutiveLoss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Damage => "damage",
            Attribute::Durability => "durability",
            Attribute::CrowdControl => "crowd_control",
            Attribute::Mobility => "mobility",
            Attribute::Difficulty => "difficulty",
            Attribute::DefenseOverall => "defense_overall",
            Attribute::OffenseOverall => "offense_overall",
            Attribute::SkillEffectOverall => "skill_effect_overall",
            Attribute::MovementSpd => "movement_spd",
            Attribute::MagicDefense => "magic_defense",
            Attribute::PhysicalAtk => "physical_atk",
            Attribute::PhysicalDefense => "physical_defense",
            Attribute::WinRate => "win_rate",
            Attribute::PickRate => "pick_rate",
            Attribute::BanRate => "ban_rate",
            Attribute::ProfitFactor => "profit_factor",
            Attribute::MaxDrawdown => "max_drawdown",
            Attribute::MaxConsecutiveLoss => "max_consecutive_loss",
        }
    }

    pub fn kind(self) -> AttributeKind {
        if Self::CORE.contains(&self) {
            AttributeKind::Core
        } else if Self::EXTENDED.contains(&self) {
            AttributeKind::Extended
        } else {
            AttributeKind::Statistic
        }
    }

    /// Declared universe `(min, max)` of the attribute.
    pub fn universe(self) -> (f64, f64) {
        match self {
            Attribute::WinRate => (40.0, 60.0),
            Attribute::PickRate | Attribute::BanRate => (0.0, 20.0),
            Attribute::ProfitFactor => (0.5, 2.0),
            Attribute::MaxDrawdown => (0.0, 50.0),
            _ => (0.0, 10.0),
        }
    }

    pub fn all() -> impl Iterator<Item = Attribute> {
        Self::CORE
            .into_iter()
            .chain(Self::EXTENDED)
            .chain(Self::STATISTICS)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Attribute::all()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| format!("unknown attribute '{s}'"))
    }
}

/// The five attributes every hero carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreAttributes {
    pub damage: f64,
    pub durability: f64,
    pub crowd_control: f64,
    pub mobility: f64,
    pub difficulty: f64,
}

impl CoreAttributes {
    pub fn new(
        damage: f64,
        durability: f64,
        crowd_control: f64,
        mobility: f64,
        difficulty: f64,
    ) -> Self {
        Self {
            damage,
            durability,
            crowd_control,
            mobility,
            difficulty,
        }
    }

    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::Damage => Some(self.damage),
            Attribute::Durability => Some(self.durability),
            Attribute::CrowdControl => Some(self.crowd_control),
            Attribute::Mobility => Some(self.mobility),
            Attribute::Difficulty => Some(self.difficulty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_overall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offense_overall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_effect_overall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_spd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_defense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_atk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_defense: Option<f64>,
}

impl ExtendedAttributes {
    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::DefenseOverall => self.defense_overall,
            Attribute::OffenseOverall => self.offense_overall,
            Attribute::SkillEffectOverall => self.skill_effect_overall,
            Attribute::MovementSpd => self.movement_spd,
            Attribute::MagicDefense => self.magic_defense,
            Attribute::PhysicalAtk => self.physical_atk,
            Attribute::PhysicalDefense => self.physical_defense,
            _ => None,
        }
    }
}

/// Ranked-play performance numbers. All optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_loss: Option<f64>,
}

impl Statistics {
    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::WinRate => self.win_rate,
            Attribute::PickRate => self.pick_rate,
            Attribute::BanRate => self.ban_rate,
            Attribute::ProfitFactor => self.profit_factor,
            Attribute::MaxDrawdown => self.max_drawdown,
            Attribute::MaxConsecutiveLoss => self.max_consecutive_loss,
            _ => None,
        }
    }
}

/// One hero record as stored in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub core: CoreAttributes,
    #[serde(flatten)]
    pub extended: ExtendedAttributes,
    #[serde(flatten)]
    pub statistics: Statistics,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

impl Hero {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<Role>,
        core: CoreAttributes,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            description: String::new(),
            core,
            extended: ExtendedAttributes::default(),
            statistics: Statistics::default(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        }
    }

    pub fn with_extended(mut self, extended: ExtendedAttributes) -> Self {
        self.extended = extended;
        self
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_traits(mut self, strengths: &[&str], weaknesses: &[&str]) -> Self {
        self.strengths = strengths.iter().map(|s| s.to_string()).collect();
        self.weaknesses = weaknesses.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Value of any attribute, `None` if the record does not carry it.
    pub fn attribute(&self, attribute: Attribute) -> Option<f64> {
        match attribute.kind() {
            AttributeKind::Core => self.core.get(attribute),
            AttributeKind::Extended => self.extended.get(attribute),
            AttributeKind::Statistic => self.statistics.get(attribute),
        }
    }
}
