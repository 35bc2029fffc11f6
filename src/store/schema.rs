// src/store/schema.rs — Schema + migrations

use rusqlite::{params, Connection};
use tracing::info;

/// A database migration with version, name, and SQL statements.
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    up: include_str!("migrations/001_initial_schema.up.sql"),
    down: include_str!("migrations/001_initial_schema.down.sql"),
}];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let current = current_version(conn)?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        info!(
            "Applying migration {}: {}",
            migration.version, migration.name
        );

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.up)?;
        tx.execute(
            "INSERT INTO _migrations (version, name) VALUES (?1, ?2)",
            params![migration.version, migration.name],
        )?;
        tx.commit()?;
    }

    Ok(())
}

/// Highest applied migration, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> anyhow::Result<u32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM _migrations",
        [],
        |r| r.get(0),
    )?;
    Ok(version)
}

/// Undo the most recent migration. Returns the version rolled back, if any.
pub fn rollback_last(conn: &Connection) -> anyhow::Result<Option<u32>> {
    let current = current_version(conn)?;
    let Some(migration) = MIGRATIONS.iter().find(|m| m.version == current) else {
        return Ok(None);
    };

    info!(
        "Rolling back migration {}: {}",
        migration.version, migration.name
    );
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.down)?;
    tx.execute(
        "DELETE FROM _migrations WHERE version = ?1",
        params![migration.version],
    )?;
    tx.commit()?;
    Ok(Some(migration.version))
}
