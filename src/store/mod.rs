// src/store/mod.rs — SQLite hero store

pub mod schema;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::catalog::{Catalog, CoreAttributes, ExtendedAttributes, Hero, Role, Statistics};
use crate::evaluator::Preferences;
use crate::infra::errors::HeroPickError;

const HERO_COLUMNS: &str = "id, name, role, description,
    damage, durability, crowd_control, mobility, difficulty,
    defense_overall, offense_overall, skill_effect_overall, movement_spd,
    magic_defense, physical_atk, physical_defense,
    win_rate, pick_rate, ban_rate, profit_factor, max_drawdown, max_consecutive_loss";

/// A saved preference set.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPreference {
    pub id: i64,
    pub role: Option<Role>,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
}

/// Flat record store for heroes and saved preferences.
pub struct HeroStore {
    conn: Connection,
}

impl HeroStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        debug!("Opened hero store at {}", path.display());
        Self::new(conn)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> anyhow::Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Wrap a connection, enabling foreign keys and applying migrations.
    pub fn new(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // -- Heroes --

    pub fn insert_hero(&self, hero: &Hero) -> anyhow::Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        insert_row(&tx, hero, &Utc::now().to_rfc3339())?;
        tx.commit()?;
        Ok(())
    }

    /// Replace every field of an existing hero, keyed by id.
    pub fn update_hero(&self, hero: &Hero) -> anyhow::Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        update_row(&tx, hero, &Utc::now().to_rfc3339())?;
        tx.commit()?;
        Ok(())
    }

    /// Delete a hero together with its strengths and weaknesses.
    pub fn delete_hero(&self, id: &str) -> anyhow::Result<()> {
        let deleted = self.conn.execute("DELETE FROM heroes WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(HeroPickError::HeroNotFound(id.to_string()).into());
        }
        Ok(())
    }

    pub fn get_hero(&self, id: &str) -> anyhow::Result<Option<Hero>> {
        let hero = self
            .conn
            .query_row(
                &format!("SELECT {HERO_COLUMNS} FROM heroes WHERE id = ?1"),
                [id],
                hero_from_row,
            )
            .optional()?;
        match hero {
            Some(hero) => Ok(Some(self.with_traits(hero)?)),
            None => Ok(None),
        }
    }

    /// All heroes in insertion order.
    pub fn list_heroes(&self) -> anyhow::Result<Vec<Hero>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {HERO_COLUMNS} FROM heroes ORDER BY rowid"))?;
        let heroes = stmt
            .query_map([], hero_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        heroes.into_iter().map(|h| self.with_traits(h)).collect()
    }

    pub fn list_by_role(&self, role: &Role) -> anyhow::Result<Vec<Hero>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HERO_COLUMNS} FROM heroes WHERE role = ?1 ORDER BY rowid"
        ))?;
        let heroes = stmt
            .query_map([role.as_str()], hero_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        heroes.into_iter().map(|h| self.with_traits(h)).collect()
    }

    /// Distinct roles, sorted.
    pub fn list_roles(&self) -> anyhow::Result<Vec<Role>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT role FROM heroes")?;
        let mut roles = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|r| r.map(Role::from))
            .collect::<Result<Vec<_>, _>>()?;
        roles.sort();
        Ok(roles)
    }

    pub fn count_heroes(&self) -> anyhow::Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM heroes", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Insert every catalog hero if the store holds none. Returns how many
    /// were inserted.
    pub fn seed_if_empty(&self, catalog: &Catalog) -> anyhow::Result<usize> {
        if self.count_heroes()? > 0 {
            debug!("Hero store already seeded");
            return Ok(0);
        }
        self.import(catalog)
    }

    /// Insert or replace every catalog hero in one transaction. Returns how
    /// many were written; on error nothing is.
    pub fn import(&self, catalog: &Catalog) -> anyhow::Result<usize> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.unchecked_transaction()?;
        for hero in catalog {
            let exists = tx
                .query_row("SELECT 1 FROM heroes WHERE id = ?1", [&hero.id], |_| Ok(()))
                .optional()?
                .is_some();
            if exists {
                update_row(&tx, hero, &now)?;
            } else {
                insert_row(&tx, hero, &now)?;
            }
        }
        tx.commit()?;
        info!("Imported {} heroes", catalog.len());
        Ok(catalog.len())
    }

    /// Snapshot the stored heroes as a catalog.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        Ok(Catalog::new(self.list_heroes()?)?)
    }

    // -- Preferences --

    pub fn save_preference(
        &self,
        role: Option<&Role>,
        preferences: &Preferences,
    ) -> anyhow::Result<i64> {
        let now = Utc::now().to_rfc3339();
        let json = serde_json::to_string(preferences)?;
        self.conn.execute(
            "INSERT INTO user_preferences (role, preferences, created_at) VALUES (?1, ?2, ?3)",
            params![role.map(|r| r.as_str()), json, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_preference(&self, id: i64) -> anyhow::Result<SavedPreference> {
        let row = self
            .conn
            .query_row(
                "SELECT role, preferences, created_at FROM user_preferences WHERE id = ?1",
                [id],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        let Some((role, json, created_at)) = row else {
            return Err(HeroPickError::PreferenceNotFound(id).into());
        };

        Ok(SavedPreference {
            id,
            role: role.map(Role::from),
            preferences: serde_json::from_str(&json)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
        })
    }

    fn with_traits(&self, mut hero: Hero) -> anyhow::Result<Hero> {
        hero.strengths = self.traits("hero_strengths", "strength", &hero.id)?;
        hero.weaknesses = self.traits("hero_weaknesses", "weakness", &hero.id)?;
        Ok(hero)
    }

    fn traits(&self, table: &str, column: &str, hero_id: &str) -> anyhow::Result<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {column} FROM {table} WHERE hero_id = ?1 ORDER BY position"
        ))?;
        let items = stmt
            .query_map([hero_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(items)
    }
}

fn insert_row(conn: &Connection, hero: &Hero, now: &str) -> anyhow::Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO heroes ({HERO_COLUMNS}, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                     ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?23)"
        ),
        params![
            hero.id,
            hero.name,
            hero.role.as_str(),
            hero.description,
            hero.core.damage,
            hero.core.durability,
            hero.core.crowd_control,
            hero.core.mobility,
            hero.core.difficulty,
            hero.extended.defense_overall,
            hero.extended.offense_overall,
            hero.extended.skill_effect_overall,
            hero.extended.movement_spd,
            hero.extended.magic_defense,
            hero.extended.physical_atk,
            hero.extended.physical_defense,
            hero.statistics.win_rate,
            hero.statistics.pick_rate,
            hero.statistics.ban_rate,
            hero.statistics.profit_factor,
            hero.statistics.max_drawdown,
            hero.statistics.max_consecutive_loss,
            now
        ],
    )?;
    write_traits(conn, hero)?;
    Ok(())
}

fn update_row(conn: &Connection, hero: &Hero, now: &str) -> anyhow::Result<()> {
    let changed = conn.execute(
        "UPDATE heroes SET name = ?2, role = ?3, description = ?4,
         damage = ?5, durability = ?6, crowd_control = ?7, mobility = ?8, difficulty = ?9,
         defense_overall = ?10, offense_overall = ?11, skill_effect_overall = ?12,
         movement_spd = ?13, magic_defense = ?14, physical_atk = ?15, physical_defense = ?16,
         win_rate = ?17, pick_rate = ?18, ban_rate = ?19, profit_factor = ?20,
         max_drawdown = ?21, max_consecutive_loss = ?22, updated_at = ?23
         WHERE id = ?1",
        params![
            hero.id,
            hero.name,
            hero.role.as_str(),
            hero.description,
            hero.core.damage,
            hero.core.durability,
            hero.core.crowd_control,
            hero.core.mobility,
            hero.core.difficulty,
            hero.extended.defense_overall,
            hero.extended.offense_overall,
            hero.extended.skill_effect_overall,
            hero.extended.movement_spd,
            hero.extended.magic_defense,
            hero.extended.physical_atk,
            hero.extended.physical_defense,
            hero.statistics.win_rate,
            hero.statistics.pick_rate,
            hero.statistics.ban_rate,
            hero.statistics.profit_factor,
            hero.statistics.max_drawdown,
            hero.statistics.max_consecutive_loss,
            now
        ],
    )?;
    if changed == 0 {
        return Err(HeroPickError::HeroNotFound(hero.id.clone()).into());
    }
    conn.execute("DELETE FROM hero_strengths WHERE hero_id = ?1", [&hero.id])?;
    conn.execute("DELETE FROM hero_weaknesses WHERE hero_id = ?1", [&hero.id])?;
    write_traits(conn, hero)?;
    Ok(())
}

fn write_traits(conn: &Connection, hero: &Hero) -> rusqlite::Result<()> {
    for (position, strength) in hero.strengths.iter().enumerate() {
        conn.execute(
            "INSERT INTO hero_strengths (hero_id, position, strength) VALUES (?1, ?2, ?3)",
            params![hero.id, position as i64, strength],
        )?;
    }
    for (position, weakness) in hero.weaknesses.iter().enumerate() {
        conn.execute(
            "INSERT INTO hero_weaknesses (hero_id, position, weakness) VALUES (?1, ?2, ?3)",
            params![hero.id, position as i64, weakness],
        )?;
    }
    Ok(())
}

fn hero_from_row(row: &Row<'_>) -> rusqlite::Result<Hero> {
    Ok(Hero {
        id: row.get(0)?,
        name: row.get(1)?,
        role: Role::from(row.get::<_, String>(2)?),
        description: row.get(3)?,
        core: CoreAttributes::new(row.get(4)?, row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?),
        extended: ExtendedAttributes {
            defense_overall: row.get(9)?,
            offense_overall: row.get(10)?,
            skill_effect_overall: row.get(11)?,
            movement_spd: row.get(12)?,
            magic_defense: row.get(13)?,
            physical_atk: row.get(14)?,
            physical_defense: row.get(15)?,
        },
        statistics: Statistics {
            win_rate: row.get(16)?,
            pick_rate: row.get(17)?,
            ban_rate: row.get(18)?,
            profit_factor: row.get(19)?,
            max_drawdown: row.get(20)?,
            max_consecutive_loss: row.get(21)?,
        },
        strengths: Vec::new(),
        weaknesses: Vec::new(),
    })
}
