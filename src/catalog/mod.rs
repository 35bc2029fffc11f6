// src/catalog/mod.rs — Immutable hero catalog

pub mod types;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::infra::errors::CatalogError;
pub use types::*;

const BUILTIN_HEROES: &str = include_str!("../../data/heroes.json");

/// An ordered, read-only collection of heroes with unique ids.
///
/// Catalog order is the order heroes were supplied in; ranking ties fall
/// back to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    heroes: Vec<Hero>,
}

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    heroes: Vec<Hero>,
}

impl Catalog {
    pub fn new(heroes: Vec<Hero>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for hero in &heroes {
            if !seen.insert(hero.id.as_str()) {
                return Err(CatalogError::DuplicateId(hero.id.clone()));
            }
        }
        Ok(Self { heroes })
    }

    /// The bundled roster: five heroes for each standard role.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_HEROES)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let heroes: Vec<Hero> =
            serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(heroes)
    }

    /// TOML catalogs list heroes as `[[heroes]]` tables.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(parsed.heroes)
    }

    /// Load a catalog file, picking the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;
        let catalog = match ext.as_str() {
            "json" => Self::from_json(&content)?,
            "toml" => Self::from_toml(&content)?,
            other => return Err(CatalogError::UnknownFormat(other.to_string())),
        };
        tracing::debug!(
            "Loaded {} heroes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn get_all(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id == id)
    }

    /// Heroes of one role, in catalog order.
    pub fn get_by_role(&self, role: &Role) -> Vec<Hero> {
        self.heroes
            .iter()
            .filter(|h| &h.role == role)
            .cloned()
            .collect()
    }

    /// Distinct roles present in the catalog, sorted by name.
    pub fn get_all_roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = Vec::new();
        for hero in &self.heroes {
            if !roles.contains(&hero.role) {
                roles.push(hero.role.clone());
            }
        }
        roles.sort();
        roles
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hero> {
        self.heroes.iter()
    }

    pub fn into_heroes(self) -> Vec<Hero> {
        self.heroes
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Hero;
    type IntoIter = std::slice::Iter<'a, Hero>;

    fn into_iter(self) -> Self::IntoIter {
        self.heroes.iter()
    }
}
