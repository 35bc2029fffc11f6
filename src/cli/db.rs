// src/cli/db.rs — Hero database management

use std::path::Path;

use crate::catalog::Catalog;
use crate::infra::config::Config;
use crate::infra::paths;

use super::{open_store, DbAction};

pub fn run_db(action: &DbAction, config: &Config) -> anyhow::Result<()> {
    let db_path = config.store.db_path();
    let store = open_store(config)?;

    match action {
        DbAction::Init => {
            paths::ensure_dirs()?;
            println!("Database ready at {}", db_path.display());
            println!("Config file: {}", paths::config_file_path().display());
        }
        DbAction::Seed => {
            let inserted = store.seed_if_empty(&Catalog::builtin()?)?;
            if inserted == 0 {
                println!("Database already holds {} heroes.", store.count_heroes()?);
            } else {
                println!("Seeded {inserted} heroes.");
            }
        }
        DbAction::Import { path } => {
            let catalog = Catalog::from_path(Path::new(path))?;
            let written = store.import(&catalog)?;
            println!("Imported {written} heroes from {path}.");
        }
        DbAction::Delete { id } => {
            store.delete_hero(id)?;
            println!("Deleted hero {id}.");
        }
    }
    Ok(())
}
