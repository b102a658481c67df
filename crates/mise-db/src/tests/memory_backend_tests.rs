//! Repository behaviour over the in-memory backend.
//!
//! These exercise the ownership, cascade and autocomplete rules through the
//! `Database` handle, the same way the API uses it.

use crate::{
    CreateDirectionRequest, CreateEquipmentRequest, CreateRecipeRequest, CreateTagRequest,
    CreateTimeRequest, Database, Error, UpdateRecipeRequest, User,
};
use mise_core::defaults::MAX_AUTOCOMPLETE_MATCHES;

async fn user(db: &Database, name: &str) -> User {
    db.users
        .create(name, "hash", &format!("token-{}", name))
        .await
        .expect("create user")
}

async fn recipe(db: &Database, user_id: i64, title: &str) -> i64 {
    db.recipes
        .create(
            user_id,
            CreateRecipeRequest {
                title: title.to_string(),
                ..Default::default()
            },
        )
        .await
        .expect("create recipe")
}

fn equipment(description: &str) -> CreateEquipmentRequest {
    CreateEquipmentRequest {
        description: description.to_string(),
    }
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let db = Database::in_memory();
    user(&db, "alice").await;
    let err = db.users.create("alice", "hash", "other").await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn test_token_resolves_to_owner() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    db.users.issue_token(alice.id, "second").await.unwrap();

    let first = db.users.resolve_token("token-alice").await.unwrap();
    let second = db.users.resolve_token("second").await.unwrap();
    assert_eq!(first.map(|u| u.id), Some(alice.id));
    assert_eq!(second.map(|u| u.id), Some(alice.id));
    assert!(db.users.resolve_token("unknown").await.unwrap().is_none());
}

#[tokio::test]
async fn test_recipe_of_other_user_is_not_found() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let bob = user(&db, "bob").await;
    let id = recipe(&db, alice.id, "Focaccia").await;

    assert!(matches!(
        db.recipes.get(bob.id, id).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        db.recipes.delete(bob.id, id).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        db.tags
            .create(
                bob.id,
                id,
                CreateTagRequest {
                    name: "bread".to_string()
                }
            )
            .await,
        Err(Error::NotFound(_))
    ));
    // Still intact for the owner.
    assert_eq!(db.recipes.get(alice.id, id).await.unwrap().title, "Focaccia");
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let id = db
        .recipes
        .create(
            alice.id,
            CreateRecipeRequest {
                title: "Soup".to_string(),
                notes: Some("salty".to_string()),
                rating: Some(3),
                servings: Some(4),
            },
        )
        .await
        .unwrap();

    db.recipes
        .update(
            alice.id,
            id,
            UpdateRecipeRequest {
                rating: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = db.recipes.get(alice.id, id).await.unwrap();
    assert_eq!(updated.title, "Soup");
    assert_eq!(updated.notes, "salty");
    assert_eq!(updated.rating, Some(5));
    assert_eq!(updated.servings, Some(4));
}

#[tokio::test]
async fn test_recipe_delete_cascades_to_components() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let id = recipe(&db, alice.id, "Stew").await;
    let pot = db.equipment.create(alice.id, id, equipment("Pot")).await.unwrap();
    let tag = db
        .tags
        .create(
            alice.id,
            id,
            CreateTagRequest {
                name: "winter".to_string(),
            },
        )
        .await
        .unwrap();
    let time = db
        .times
        .create(
            alice.id,
            id,
            CreateTimeRequest {
                category: "Cook".to_string(),
                hours: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let step = db
        .directions
        .create(
            alice.id,
            id,
            CreateDirectionRequest {
                description: "Simmer".to_string(),
            },
        )
        .await
        .unwrap();

    let detail = db.recipes.get_detail(alice.id, id).await.unwrap();
    assert_eq!(detail.equipment.len(), 1);
    assert_eq!(detail.tags.len(), 1);
    assert_eq!(detail.times.len(), 1);

    db.recipes.delete(alice.id, id).await.unwrap();

    assert!(matches!(
        db.equipment.delete(alice.id, pot).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        db.tags.delete(alice.id, tag).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        db.times.delete(alice.id, time).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        db.directions.delete(alice.id, step).await,
        Err(Error::NotFound(_))
    ));
    assert!(db.equipment.search(alice.id, "pot", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_component_delete_requires_owning_recipe() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let bob = user(&db, "bob").await;
    let id = recipe(&db, alice.id, "Stew").await;
    let pot = db.equipment.create(alice.id, id, equipment("Pot")).await.unwrap();

    assert!(matches!(
        db.equipment.delete(bob.id, pot).await,
        Err(Error::NotFound(_))
    ));
    assert_eq!(db.equipment.list_for_recipe(alice.id, id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unit_search_is_scoped_and_ordered() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let bob = user(&db, "bob").await;
    db.units.create(alice.id, "Cupful").await.unwrap();
    db.units.create(alice.id, "Cup").await.unwrap();
    db.units.create(alice.id, "Gram").await.unwrap();
    db.units.create(bob.id, "Cup").await.unwrap();

    let matches = db.units.search(alice.id, "cu", 10).await.unwrap();
    let names: Vec<&str> = matches.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Cup", "Cupful"]);
    assert!(matches.iter().all(|u| u.user_id == alice.id));
}

#[tokio::test]
async fn test_empty_search_term_returns_nothing() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    db.units.create(alice.id, "Cup").await.unwrap();
    let id = recipe(&db, alice.id, "Stew").await;
    db.equipment.create(alice.id, id, equipment("Pot")).await.unwrap();

    assert!(db.units.search(alice.id, "", 10).await.unwrap().is_empty());
    assert!(db.equipment.search(alice.id, "", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_is_capped() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    for i in 0..15 {
        db.units
            .create(alice.id, &format!("unit {}", i))
            .await
            .unwrap();
    }
    let matches = db
        .units
        .search(alice.id, "unit", MAX_AUTOCOMPLETE_MATCHES)
        .await
        .unwrap();
    assert_eq!(matches.len(), MAX_AUTOCOMPLETE_MATCHES as usize);
}

#[tokio::test]
async fn test_equipment_search_deduplicates_across_recipes() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let bob = user(&db, "bob").await;
    let stew = recipe(&db, alice.id, "Stew").await;
    let soup = recipe(&db, alice.id, "Soup").await;
    let other = recipe(&db, bob.id, "Pasta").await;
    db.equipment.create(alice.id, stew, equipment("Stock pot")).await.unwrap();
    db.equipment.create(alice.id, soup, equipment("Stock pot")).await.unwrap();
    db.equipment.create(alice.id, soup, equipment("Pot")).await.unwrap();
    db.equipment.create(bob.id, other, equipment("Pot lid")).await.unwrap();

    let matches = db.equipment.search(alice.id, "POT", 10).await.unwrap();
    assert_eq!(matches, vec!["Pot".to_string(), "Stock pot".to_string()]);
}

#[tokio::test]
async fn test_duplicate_brand_conflicts_per_user() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let bob = user(&db, "bob").await;
    db.brands.create(alice.id, "Acme").await.unwrap();

    let err = db.brands.create(alice.id, "Acme").await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    db.brands.create(bob.id, "Acme").await.unwrap();
}

#[tokio::test]
async fn test_user_delete_cascades() {
    let db = Database::in_memory();
    let alice = user(&db, "alice").await;
    let id = recipe(&db, alice.id, "Stew").await;
    let brand = db.brands.create(alice.id, "Acme").await.unwrap();

    db.users.delete(alice.id).await.unwrap();

    assert!(db.users.resolve_token("token-alice").await.unwrap().is_none());
    assert!(matches!(
        db.recipes.get(alice.id, id).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        db.brands.get(alice.id, brand.id).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_in_memory_migrate_is_noop() {
    let db = Database::in_memory();
    assert!(db.pool().is_none());
    assert_eq!(db.backend_name(), "memory");
    #[cfg(feature = "migrations")]
    db.migrate().await.unwrap();
}
