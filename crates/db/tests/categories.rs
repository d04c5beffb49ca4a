//! Integration tests for the category registry.

use notekeep_core::categories::SEED_CATEGORIES;
use notekeep_db::models::category::{CreateCategory, UpdateCategory};
use notekeep_db::repositories::CategoryRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_and_description_clear(pool: PgPool) {
    let created = CategoryRepo::create(
        &pool,
        &CreateCategory {
            name: Some(" Travel ".into()),
            description: Some("Trips".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(created.name, "Travel");
    assert_eq!(created.description.as_deref(), Some("Trips"));

    // Absent description is left alone.
    let recolored = CategoryRepo::update(
        &pool,
        created.id,
        &UpdateCategory {
            color: Some("#000000".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(recolored.description.as_deref(), Some("Trips"));
    assert_eq!(recolored.color, "#000000");

    // A blank description clears it.
    let cleared = CategoryRepo::update(
        &pool,
        created.id,
        &UpdateCategory {
            description: Some("  ".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.name, "Travel");

    assert!(CategoryRepo::update(&pool, 999_999, &UpdateCategory::default())
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_upsert_restores_defaults(pool: PgPool) {
    sqlx::query("UPDATE categories SET color = '#123456' WHERE name = 'Work'")
        .execute(&pool)
        .await
        .unwrap();

    for seed in SEED_CATEGORIES {
        CategoryRepo::upsert_seed(&pool, seed).await.unwrap();
    }

    let all = CategoryRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), SEED_CATEGORIES.len());
    let work = all.iter().find(|c| c.name == "Work").unwrap();
    assert_eq!(work.color, "#3b82f6");
}
