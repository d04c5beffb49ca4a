//! Integration tests for the tag registry and note store.
//!
//! - Tag find-or-create normalization and concurrency
//! - Tag deletion detaching notes
//! - Note filters, ordering, and tag replacement

use notekeep_core::roles::Role;
use notekeep_core::types::DbId;
use notekeep_db::models::note::{CreateNote, Note, NoteFilter, UpdateNote};
use notekeep_db::models::user::CreateUser;
use notekeep_db::repositories::{NoteRepo, TagRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: Role::User,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_note(title: &str, category: &str) -> CreateNote {
    CreateNote {
        title: Some(title.to_string()),
        content: Some(format!("{title} body")),
        category: Some(category.to_string()),
        ..Default::default()
    }
}

fn tagged_note(title: &str, category: &str, tags: &[&str]) -> CreateNote {
    CreateNote {
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        ..new_note(title, category)
    }
}

async fn create(pool: &PgPool, user: DbId, input: &CreateNote) -> Note {
    NoteRepo::create(pool, user, input)
        .await
        .unwrap()
        .expect("owner exists")
}

async fn tag_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM tags")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_case_and_whitespace_variants_resolve_to_one_tag(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let ids = TagRepo::resolve_names(&mut conn, &["Work", "work ", "WORK", " Home"])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);

    let again = TagRepo::resolve_names(&mut conn, &["  wOrK  "]).await.unwrap();
    assert_eq!(again, vec![ids[0]]);

    let tag = TagRepo::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
    assert_eq!(tag.name, "work");
    assert_eq!(tag.color, "#3b82f6");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_find_or_create_yields_one_row(pool: PgPool) {
    let (a, b, c) = tokio::join!(
        TagRepo::find_or_create(&pool, "Race", None),
        TagRepo::find_or_create(&pool, "race", None),
        TagRepo::find_or_create(&pool, " RACE ", None),
    );
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
    assert_eq!(a.id, b.id);
    assert_eq!(b.id, c.id);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE name = 'race'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_or_create_keeps_existing_color(pool: PgPool) {
    let first = TagRepo::create(&pool, "Urgent", Some("#ff0000")).await.unwrap();
    let second = TagRepo::find_or_create(&pool, "urgent", Some("#00ff00"))
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.color, "#ff0000");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_explicit_duplicate_tag_violates_unique(pool: PgPool) {
    TagRepo::create(&pool, "dup", None).await.unwrap();
    let err = TagRepo::create(&pool, " DUP", None).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_tags_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_update_renormalizes_name(pool: PgPool) {
    let tag = TagRepo::create(&pool, "old", None).await.unwrap();
    let updated = TagRepo::update(&pool, tag.id, Some("  New Name "), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "new name");
    assert_eq!(updated.color, tag.color);

    assert!(TagRepo::update(&pool, 999_999, Some("x"), None)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_tag_detaches_it_from_notes(pool: PgPool) {
    let user = new_user(&pool, "tagger@example.com").await;
    let note = create(&pool, user, &tagged_note("Tagged", "Work", &["keep", "drop"])).await;
    assert_eq!(note.tags.len(), 2);
    let dropped = TagRepo::find_by_name(&pool, "drop").await.unwrap().unwrap();

    assert!(TagRepo::delete(&pool, dropped.id).await.unwrap());
    assert!(!TagRepo::delete(&pool, dropped.id).await.unwrap());

    let reloaded = NoteRepo::find_by_id(&pool, note.id, None)
        .await
        .unwrap()
        .expect("note must survive tag deletion");
    let names: Vec<_> = reloaded.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["keep"]);
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults_and_trims(pool: PgPool) {
    let user = new_user(&pool, "defaults@example.com").await;
    let input = CreateNote {
        title: Some("  Spaced  ".into()),
        content: Some(" body ".into()),
        category: None,
        ..Default::default()
    };
    let note = create(&pool, user, &input).await;
    assert_eq!(note.title, "Spaced");
    assert_eq!(note.content, "body");
    assert_eq!(note.category, "Other");
    assert_eq!(note.color, "#ffffff");
    assert!(!note.is_pinned);
    assert!(note.tags.is_empty());
    assert_eq!(note.user_id, user);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_scoped_lookup_hides_other_users_notes(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;
    let note = create(&pool, alice, &new_note("Private", "Personal")).await;

    assert!(NoteRepo::find_by_id(&pool, note.id, Some(alice)).await.unwrap().is_some());
    assert!(NoteRepo::find_by_id(&pool, note.id, Some(bob)).await.unwrap().is_none());
    assert!(NoteRepo::find_by_id(&pool, note.id, None).await.unwrap().is_some());
    assert_eq!(NoteRepo::find_owner(&pool, note.id).await.unwrap(), Some(alice));
    assert_eq!(NoteRepo::find_owner(&pool, 999_999).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_pinned_first_then_newest(pool: PgPool) {
    let user = new_user(&pool, "order@example.com").await;
    let first = create(&pool, user, &new_note("first", "Work")).await;
    let second = create(&pool, user, &new_note("second", "Work")).await;
    let pinned_input = CreateNote {
        is_pinned: Some(true),
        ..new_note("pinned", "Work")
    };
    let pinned = create(&pool, user, &pinned_input).await;

    let filter = NoteFilter {
        owner_id: Some(user),
        ..Default::default()
    };
    let ids: Vec<_> = NoteRepo::list(&pool, &filter)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec![pinned.id, second.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_combine(pool: PgPool) {
    let user = new_user(&pool, "filters@example.com").await;
    let other = new_user(&pool, "other@example.com").await;
    let tagged = create(&pool, user, &tagged_note("Borrow checker", "Study", &["rust"])).await;
    create(&pool, user, &new_note("Shopping list", "Todo")).await;
    create(&pool, other, &tagged_note("Borrow money", "Study", &["Rust"])).await;
    let rust = tagged.tags[0].id;

    let by_tag = NoteFilter {
        owner_id: Some(user),
        tag_id: Some(rust),
        ..Default::default()
    };
    let found = NoteRepo::list(&pool, &by_tag).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, tagged.id);

    let by_category = NoteFilter {
        owner_id: Some(user),
        category: Some("Todo".into()),
        ..Default::default()
    };
    assert_eq!(NoteRepo::list(&pool, &by_category).await.unwrap().len(), 1);

    let search_everyone = NoteFilter {
        search: Some("borrow".into()),
        ..Default::default()
    };
    assert_eq!(NoteRepo::list(&pool, &search_everyone).await.unwrap().len(), 2);

    let pinned_only = NoteFilter {
        owner_id: Some(user),
        is_pinned: Some(true),
        ..Default::default()
    };
    assert!(NoteRepo::list(&pool, &pinned_only).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_clears_or_keeps_tags(pool: PgPool) {
    let user = new_user(&pool, "retag@example.com").await;
    let note = create(&pool, user, &tagged_note("Retag", "Ideas", &["a", "b"])).await;

    let rename = UpdateNote {
        title: Some("Renamed".into()),
        ..Default::default()
    };
    let kept = NoteRepo::update(&pool, note.id, &rename).await.unwrap().unwrap();
    assert_eq!(kept.title, "Renamed");
    assert_eq!(kept.content, note.content);
    assert_eq!(kept.tags.len(), 2);

    let retag = UpdateNote {
        tags: Some(vec!["B".into(), "c".into()]),
        ..Default::default()
    };
    let replaced = NoteRepo::update(&pool, note.id, &retag).await.unwrap().unwrap();
    let names: Vec<_> = replaced.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);

    let clear = UpdateNote {
        tags: Some(Vec::new()),
        ..Default::default()
    };
    let cleared = NoteRepo::update(&pool, note.id, &clear).await.unwrap().unwrap();
    assert!(cleared.tags.is_empty());

    assert!(NoteRepo::update(&pool, 999_999, &rename).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_missing_note_creates_no_tags(pool: PgPool) {
    let retag = UpdateNote {
        tags: Some(vec!["phantom".into()]),
        ..Default::default()
    };
    assert!(NoteRepo::update(&pool, 999_999, &retag).await.unwrap().is_none());
    assert_eq!(tag_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_for_deleted_owner_writes_nothing(pool: PgPool) {
    let user = new_user(&pool, "gone@example.com").await;
    UserRepo::delete_with_notes(&pool, user).await.unwrap();

    let input = tagged_note("Orphan", "Work", &["leak"]);
    assert!(NoteRepo::create(&pool, user, &input).await.unwrap().is_none());

    assert_eq!(tag_count(&pool).await, 0);
    let notes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(notes, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_listing_resolves_owner_email(pool: PgPool) {
    let user = new_user(&pool, "owner@example.com").await;
    for i in 0..7 {
        create(&pool, user, &new_note(&format!("n{i}"), "Other")).await;
    }

    let all = NoteRepo::list_all_with_owner(&pool).await.unwrap();
    assert_eq!(all.len(), 7);
    assert!(all.iter().all(|n| n.owner_email.as_deref() == Some("owner@example.com")));

    let recent = NoteRepo::list_recent_with_owner(&pool, 5).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].note.title, "n6");
}
