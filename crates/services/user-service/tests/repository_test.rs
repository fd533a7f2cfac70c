//! Repository tests against an in-memory SQLite database.

use common::{AppError, DatabaseConfig};
use domain::User;
use user_service_lib::infra::Database;
use user_service_lib::repository::{UserRepository, UserStore};

async fn seeded_store() -> UserStore {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = Database::connect(&config).await.expect("in-memory database");
    let store = UserStore::new(db.get_connection());
    store.init().await.expect("schema and seed");
    store
}

fn sorted(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| a.login.cmp(&b.login));
    users
}

// =============================================================================
// Seed
// =============================================================================

#[tokio::test]
async fn test_init_seeds_exactly_four_users_with_accents() {
    let store = seeded_store().await;

    let users = sorted(store.find_all().await.unwrap());

    assert_eq!(
        users,
        sorted(vec![
            User::new("smaldini", "Stéphane", "Maldini"),
            User::new("sdeleuze", "Sébastien", "Deleuze"),
            User::new("jlong", "Joshua", "Long"),
            User::new("bclozel", "Brian", "Clozel"),
        ])
    );
}

#[tokio::test]
async fn test_init_is_repeatable_and_resets_the_table() {
    let store = seeded_store().await;
    store.save(User::new("extra", "Ex", "Tra")).await.unwrap();
    store.delete_one("jlong").await.unwrap();

    store.init().await.unwrap();

    assert_eq!(store.count().await.unwrap(), 4);
    assert!(store.find_one("extra").await.unwrap().is_none());
    assert!(store.find_one("jlong").await.unwrap().is_some());
}

// =============================================================================
// Reads and inserts
// =============================================================================

#[tokio::test]
async fn test_save_then_find_one_round_trips() {
    let store = seeded_store().await;
    let user = User::new("jhoeller", "Jürgen", "Höller");

    let stored = store.save(user.clone()).await.unwrap();
    let found = store.find_one("jhoeller").await.unwrap();

    assert_eq!(stored, user);
    assert_eq!(found, Some(user));
}

#[tokio::test]
async fn test_find_one_for_unknown_login_is_none() {
    let store = seeded_store().await;

    let result = store.find_one("nobody").await;

    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_count_tracks_adds_and_deletes() {
    let store = seeded_store().await;

    for login in ["a", "b", "c"] {
        store.save(User::new(login, "First", "Last")).await.unwrap();
    }
    store.delete_one("a").await.unwrap();
    store.delete_one("smaldini").await.unwrap();

    assert_eq!(store.count().await.unwrap(), 4 + 3 - 2);
}

#[tokio::test]
async fn test_duplicate_login_is_a_conflict_and_row_kept() {
    let store = seeded_store().await;

    let result = store.save(User::new("jlong", "Someone", "Else")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(
        store.find_one("jlong").await.unwrap(),
        Some(User::new("jlong", "Joshua", "Long"))
    );
    assert_eq!(store.count().await.unwrap(), 4);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_changes_only_the_target_row() {
    let store = seeded_store().await;
    let before: Vec<User> = sorted(store.find_all().await.unwrap())
        .into_iter()
        .filter(|u| u.login != "jlong")
        .collect();

    let updated = store
        .update("jlong", User::new("jlong", "Josh", "Long"))
        .await
        .unwrap();

    assert_eq!(updated, Some(User::new("jlong", "Josh", "Long")));
    let after: Vec<User> = sorted(store.find_all().await.unwrap())
        .into_iter()
        .filter(|u| u.login != "jlong")
        .collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_can_change_login() {
    let store = seeded_store().await;

    let updated = store
        .update("jlong", User::new("starbuxman", "Josh", "Long"))
        .await
        .unwrap();

    assert_eq!(updated, Some(User::new("starbuxman", "Josh", "Long")));
    assert!(store.find_one("jlong").await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_update_of_unknown_login_reports_none() {
    let store = seeded_store().await;

    let updated = store
        .update("nobody", User::new("smaldini", "X", "Y"))
        .await
        .unwrap();

    assert!(updated.is_none());
    assert_eq!(
        store.find_one("smaldini").await.unwrap(),
        Some(User::new("smaldini", "Stéphane", "Maldini"))
    );
}

#[tokio::test]
async fn test_update_onto_taken_login_is_a_conflict() {
    let store = seeded_store().await;

    let result = store
        .update("jlong", User::new("bclozel", "Josh", "Long"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(
        store.find_one("bclozel").await.unwrap(),
        Some(User::new("bclozel", "Brian", "Clozel"))
    );
}

// =============================================================================
// Deletes
// =============================================================================

#[tokio::test]
async fn test_delete_one_reports_affected_rows() {
    let store = seeded_store().await;

    let first = store.delete_one("bclozel").await.unwrap();
    let second = store.delete_one("bclozel").await.unwrap();

    assert_eq!(first.rows_affected, 1);
    assert_eq!(second.rows_affected, 0);
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_delete_all_empties_the_table() {
    let store = seeded_store().await;

    let outcome = store.delete_all().await.unwrap();

    assert_eq!(outcome.rows_affected, 4);
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.find_all().await.unwrap().is_empty());
}

// =============================================================================
// Bind parameters
// =============================================================================

#[tokio::test]
async fn test_sql_metacharacters_in_login_match_literally() {
    let store = seeded_store().await;

    assert!(store.find_one("' OR '1'='1").await.unwrap().is_none());
    assert!(store.find_one("jlong' --").await.unwrap().is_none());

    let outcome = store.delete_one("x' OR '1'='1").await.unwrap();
    assert_eq!(outcome.rows_affected, 0);
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_login_with_quote_is_stored_verbatim() {
    let store = seeded_store().await;
    let user = User::new("o'brien; DROP TABLE users", "Conan", "O'Brien");

    store.save(user.clone()).await.unwrap();

    assert_eq!(store.find_one(&user.login).await.unwrap(), Some(user.clone()));
    assert!(store.find_one("o'brien").await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 5);

    assert_eq!(store.delete_one(&user.login).await.unwrap().rows_affected, 1);
    assert_eq!(store.count().await.unwrap(), 4);
}
