// src/cli/heroes.rs — Hero and role listings

use crate::catalog::{Catalog, Hero, Role};

pub fn run_heroes(catalog: &Catalog, role: Option<&str>, json: bool) -> anyhow::Result<()> {
    let heroes: Vec<Hero> = match role {
        Some(r) => catalog.get_by_role(&Role::parse(r)),
        None => catalog.get_all().to_vec(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&heroes)?);
        return Ok(());
    }

    if heroes.is_empty() {
        println!("No heroes found.");
        return Ok(());
    }

    println!(
        "  {:<4} {:<14} {:<10} {:>4} {:>4} {:>4} {:>4} {:>4}",
        "ID", "NAME", "ROLE", "DMG", "DUR", "CC", "MOB", "DIFF"
    );
    for hero in &heroes {
        let c = &hero.core;
        println!(
            "  {:<4} {:<14} {:<10} {:>4} {:>4} {:>4} {:>4} {:>4}",
            hero.id,
            hero.name,
            hero.role.as_str(),
            c.damage,
            c.durability,
            c.crowd_control,
            c.mobility,
            c.difficulty
        );
    }
    Ok(())
}

pub fn run_roles(catalog: &Catalog) -> anyhow::Result<()> {
    for role in catalog.get_all_roles() {
        let count = catalog.get_by_role(&role).len();
        println!("  {:<10} {} heroes", role.as_str(), count);
    }
    Ok(())
}
