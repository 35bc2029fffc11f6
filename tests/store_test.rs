// tests/store_test.rs — Integration test: SQLite round-trip (hero store CRUD)

use pretty_assertions::assert_eq;
use rusqlite::Connection;

use heropick::catalog::{Attribute, Catalog, CoreAttributes, Hero, Role, Statistics};
use heropick::evaluator::{get_hero_recommendations, Preferences};
use heropick::infra::errors::HeroPickError;
use heropick::store::{schema, HeroStore};

/// Create an in-memory store with schema applied.
fn test_store() -> HeroStore {
    let conn = Connection::open_in_memory().unwrap();
    schema::run_migrations(&conn).unwrap();
    HeroStore::new(conn).unwrap()
}

fn count(store: &HeroStore, table: &str) -> i64 {
    store
        .conn()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .unwrap()
}

#[test]
fn test_seed_and_load_matches_builtin() {
    let store = test_store();
    let builtin = Catalog::builtin().unwrap();

    assert_eq!(store.seed_if_empty(&builtin).unwrap(), 30);
    assert_eq!(store.seed_if_empty(&builtin).unwrap(), 0);
    assert_eq!(count(&store, "hero_strengths"), 90);

    let loaded = store.load_catalog().unwrap();
    assert_eq!(loaded, builtin);
    assert_eq!(store.list_roles().unwrap(), builtin.get_all_roles());
}

#[test]
fn test_store_catalog_ranks_like_builtin() {
    let store = test_store();
    let builtin = Catalog::builtin().unwrap();
    store.seed_if_empty(&builtin).unwrap();

    let prefs = Preferences::uniform(5.0);
    assert_eq!(
        get_hero_recommendations(store.load_catalog().unwrap().get_all(), &prefs),
        get_hero_recommendations(builtin.get_all(), &prefs)
    );
}

#[test]
fn test_list_by_role_in_insertion_order() {
    let store = test_store();
    store.seed_if_empty(&Catalog::builtin().unwrap()).unwrap();
    let names: Vec<String> = store
        .list_by_role(&Role::Marksman)
        .unwrap()
        .into_iter()
        .map(|h| h.name)
        .collect();
    assert_eq!(names, vec!["Granger", "Claude", "Wanwan", "Brody", "Beatrix"]);
}

#[test]
fn test_update_replaces_fields_and_traits() {
    let store = test_store();
    let hero = Hero::new("z", "Zed", "Fighter", CoreAttributes::new(6.0, 6.0, 4.0, 5.0, 5.0))
        .with_traits(&["Sustain"], &["Kited", "Slowed"]);
    store.insert_hero(&hero).unwrap();

    let updated = Hero::new("z", "Zed", "Tank", CoreAttributes::new(4.0, 9.0, 7.0, 3.0, 4.0))
        .with_statistics(Statistics {
            win_rate: Some(51.0),
            ..Default::default()
        })
        .with_traits(&["Frontline"], &[]);
    store.update_hero(&updated).unwrap();

    assert_eq!(store.get_hero("z").unwrap(), Some(updated));
    assert_eq!(count(&store, "hero_weaknesses"), 0);

    let ghost = Hero::new("ghost", "Ghost", "Mage", CoreAttributes::new(1.0, 1.0, 1.0, 1.0, 1.0));
    let err = store.update_hero(&ghost).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HeroPickError>(),
        Some(HeroPickError::HeroNotFound(_))
    ));
}

#[test]
fn test_delete_cascades() {
    let store = test_store();
    store.seed_if_empty(&Catalog::builtin().unwrap()).unwrap();
    store.delete_hero("1").unwrap();

    assert!(store.get_hero("1").unwrap().is_none());
    assert_eq!(store.list_heroes().unwrap().len(), 29);
    assert_eq!(count(&store, "hero_strengths"), 87);
    assert_eq!(count(&store, "hero_weaknesses"), 87);
}

#[test]
fn test_import_upserts() {
    let store = test_store();
    store.seed_if_empty(&Catalog::builtin().unwrap()).unwrap();

    let mut tigreal = store.get_hero("1").unwrap().unwrap();
    tigreal.description = "Rebalanced".into();
    let extra = Hero::new("31", "Nova", "Jungler", CoreAttributes::new(7.0, 4.0, 2.0, 9.0, 6.0));
    let patch = Catalog::new(vec![tigreal, extra]).unwrap();

    assert_eq!(store.import(&patch).unwrap(), 2);
    assert_eq!(store.count_heroes().unwrap(), 31);
    assert_eq!(store.get_hero("1").unwrap().unwrap().description, "Rebalanced");
    assert!(store.list_roles().unwrap().contains(&Role::Other("Jungler".into())));
}

#[test]
fn test_failed_import_writes_nothing() {
    let store = test_store();
    store.seed_if_empty(&Catalog::builtin().unwrap()).unwrap();
    store
        .conn()
        .execute_batch(
            "CREATE TRIGGER reject_bad BEFORE INSERT ON heroes WHEN NEW.id = 'bad'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

    let mut tigreal = store.get_hero("1").unwrap().unwrap();
    tigreal.description = "Rebalanced".into();
    let nova = Hero::new("31", "Nova", "Jungler", CoreAttributes::new(7.0, 4.0, 2.0, 9.0, 6.0));
    let bad = Hero::new("bad", "Bad", "Mage", CoreAttributes::new(1.0, 1.0, 1.0, 1.0, 1.0));
    let patch = Catalog::new(vec![tigreal, nova, bad]).unwrap();

    assert!(store.import(&patch).is_err());
    assert_eq!(store.count_heroes().unwrap(), 30);
    assert!(store.get_hero("31").unwrap().is_none());
    assert_ne!(store.get_hero("1").unwrap().unwrap().description, "Rebalanced");
    assert_eq!(count(&store, "hero_strengths"), 90);
}

#[test]
fn test_saved_preferences() {
    let store = test_store();
    let prefs = Preferences::new()
        .with(Attribute::Damage, 8.0)
        .with(Attribute::Mobility, 9.5);

    let first = store.save_preference(Some(&Role::Assassin), &prefs).unwrap();
    let second = store.save_preference(None, &Preferences::uniform(5.0)).unwrap();
    assert!(second > first);

    let saved = store.get_preference(first).unwrap();
    assert_eq!(saved.role, Some(Role::Assassin));
    assert_eq!(saved.preferences, prefs);
    assert!(store.get_preference(second).unwrap().role.is_none());

    let err = store.get_preference(999).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HeroPickError>(),
        Some(HeroPickError::PreferenceNotFound(999))
    ));
}

#[test]
fn test_on_disk_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("heropick.db");
    {
        let store = HeroStore::open(&path).unwrap();
        store.seed_if_empty(&Catalog::builtin().unwrap()).unwrap();
    }
    let reopened = HeroStore::open(&path).unwrap();
    assert_eq!(reopened.count_heroes().unwrap(), 30);
    assert_eq!(schema::current_version(reopened.conn()).unwrap(), 1);
}
