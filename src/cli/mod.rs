// src/cli/mod.rs — CLI definition (clap derive)

pub mod db;
pub mod evaluate;
pub mod heroes;

use std::path::Path;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::catalog::{Attribute, Catalog};
use crate::evaluator::{Preferences, DEFAULT_PREFERENCE};
use crate::infra::config::Config;
use crate::store::HeroStore;

#[derive(Parser)]
#[command(
    name = "heropick",
    about = "Fuzzy-logic hero evaluation and recommendation",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Hero catalog file (.json or .toml), overrides the config
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Read heroes from the SQLite store instead of a catalog file
    #[arg(long, global = true)]
    pub db: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List heroes
    Heroes {
        /// Only heroes of this role
        #[arg(long)]
        role: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the distinct roles in the catalog
    Roles,
    /// Evaluate one hero against your preferences
    Evaluate {
        /// Hero id
        hero_id: String,
        #[command(flatten)]
        prefs: PreferenceArgs,
        /// Show which rules fired
        #[arg(long)]
        explain: bool,
        #[arg(long)]
        json: bool,
    },
    /// Rank heroes by how well they suit your preferences
    Recommend {
        /// Only heroes of this role
        #[arg(long)]
        role: Option<String>,
        /// Show at most this many heroes
        #[arg(short, long)]
        limit: Option<usize>,
        #[command(flatten)]
        prefs: PreferenceArgs,
        /// Save the preference set to the store
        #[arg(long)]
        save: bool,
        #[arg(long)]
        json: bool,
    },
    /// Manage the hero database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum DbAction {
    /// Create the database and config directory, then apply migrations
    Init,
    /// Load the bundled heroes into an empty database
    Seed,
    /// Insert or replace heroes from a catalog file
    Import {
        /// Catalog file (.json or .toml)
        path: String,
    },
    /// Delete a hero and its strengths and weaknesses
    Delete {
        /// Hero id
        id: String,
    },
}

/// Desired core attribute values on the 0-10 scale.
#[derive(Args, Debug, Clone, Default)]
pub struct PreferenceArgs {
    #[arg(long)]
    pub damage: Option<f64>,
    #[arg(long)]
    pub durability: Option<f64>,
    #[arg(long)]
    pub crowd_control: Option<f64>,
    #[arg(long)]
    pub mobility: Option<f64>,
    #[arg(long)]
    pub difficulty: Option<f64>,
    /// Start from a saved preference set
    #[arg(long, value_name = "ID")]
    pub saved: Option<i64>,
}

impl PreferenceArgs {
    /// Flags given on the command line, layered over a saved set if any.
    /// Core attributes named by neither start at `DEFAULT_PREFERENCE`.
    pub fn resolve(&self, config: &Config) -> anyhow::Result<Preferences> {
        let mut prefs = Preferences::uniform(DEFAULT_PREFERENCE);
        if let Some(id) = self.saved {
            let saved = open_store(config)?.get_preference(id)?.preferences;
            for (attribute, value) in saved.iter() {
                prefs.set(attribute, value);
            }
        }
        let flags = [
            (Attribute::Damage, self.damage),
            (Attribute::Durability, self.durability),
            (Attribute::CrowdControl, self.crowd_control),
            (Attribute::Mobility, self.mobility),
            (Attribute::Difficulty, self.difficulty),
        ];
        for (attribute, value) in flags {
            if let Some(v) = value {
                prefs.set(attribute, v);
            }
        }
        Ok(prefs)
    }
}

/// Open the configured store, creating it if needed.
pub fn open_store(config: &Config) -> anyhow::Result<HeroStore> {
    HeroStore::open(&config.store.db_path())
}

/// Heroes to work with: the store (seeded on first use), a catalog file, or
/// the bundled catalog.
pub fn load_catalog(cli: &Cli, config: &Config) -> anyhow::Result<Catalog> {
    if cli.db {
        let store = open_store(config)?;
        store.seed_if_empty(&Catalog::builtin()?)?;
        return store.load_catalog();
    }

    match cli.catalog.as_deref().or(config.catalog.path.as_deref()) {
        Some(path) => Ok(Catalog::from_path(Path::new(path))?),
        None => Ok(Catalog::builtin()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend_flags() {
        let cli = Cli::parse_from([
            "heropick",
            "recommend",
            "--role",
            "tank",
            "--limit",
            "3",
            "--damage",
            "4",
            "--crowd-control",
            "9",
        ]);
        let Commands::Recommend { role, limit, prefs, .. } = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(role.as_deref(), Some("tank"));
        assert_eq!(limit, Some(3));
        let resolved = prefs.resolve(&Config::default()).unwrap();
        assert_eq!(resolved.get(Attribute::Damage), Some(4.0));
        assert_eq!(resolved.get(Attribute::CrowdControl), Some(9.0));
        assert_eq!(resolved.get(Attribute::Mobility), Some(DEFAULT_PREFERENCE));
    }

    #[test]
    fn test_evaluate_without_flags_uses_midpoint_preferences() {
        let cli = Cli::parse_from(["heropick", "evaluate", "1"]);
        let Commands::Evaluate { hero_id, prefs, .. } = cli.command else {
            panic!("expected evaluate");
        };
        let prefs = prefs.resolve(&Config::default()).unwrap();
        assert_eq!(prefs, Preferences::uniform(5.0));

        let catalog = Catalog::builtin().unwrap();
        let tigreal = catalog.get_by_id(&hero_id).unwrap();
        let result = crate::evaluator::evaluate_hero(tigreal, &prefs);
        assert_eq!(result.preference_match, 74.0);
        assert!((result.final_score - 61.86).abs() < 0.011, "{}", result.final_score);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["heropick", "roles", "--db", "-vv"]);
        assert!(cli.db);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_catalog_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.toml");
        std::fs::write(
            &path,
            r#"
[[heroes]]
id = "a"
name = "Alpha"
role = "Tank"
damage = 1
durability = 9
crowd_control = 8
mobility = 2
difficulty = 3
"#,
        )
        .unwrap();
        let cli = Cli::parse_from(["heropick", "--catalog", path.to_str().unwrap(), "heroes"]);
        let catalog = load_catalog(&cli, &Config::default()).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
