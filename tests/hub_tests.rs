//! Application root tests
//!
//! Adoption flow, leaderboard freshness and persistence across restarts.
//! Run with: cargo test --test hub_tests

use reviveboard::auth::{AnonymousProvider, FixedIdentityProvider};
use reviveboard::catalog::SearchFilters;
use reviveboard::router::{BrowserEvent, LinkActivation, MemoryHistory};
use reviveboard::storage::{ADOPTED_REPOSITORIES_KEY, FileStore, KeyValueStore, MemoryStore};
use reviveboard::{AdoptionStatus, AppConfig, AppError, ReviveHub, ViewId, seed};
use std::sync::Arc;
use tempfile::TempDir;

fn hub_for(login: &str, kv: Arc<dyn KeyValueStore>) -> ReviveHub {
    ReviveHub::with_parts(
        MemoryHistory::new("/"),
        kv,
        Arc::new(FixedIdentityProvider::new(100, login)),
        seed::repositories().to_vec(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_adopt_requires_login() {
    let mut hub = hub_for("alice", Arc::new(MemoryStore::new()));

    let err = hub.adopt(1).unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));
    assert!(hub.repositories().adopted().is_empty());

    hub.login().await.unwrap();
    let record = hub.adopt(1).unwrap();
    assert_eq!(record.adopted_by, "alice");
    assert_eq!(record.status, Some(AdoptionStatus::Adopted));
}

#[tokio::test]
async fn test_leaderboard_follows_every_mutation() {
    let mut hub = hub_for("alice", Arc::new(MemoryStore::new()));
    hub.login().await.unwrap();
    assert!(hub.leaderboard().entries().is_empty());

    hub.adopt(1).unwrap();
    assert_eq!(hub.leaderboard().entries()[0].score, 10);

    hub.adopt(2).unwrap();
    assert_eq!(hub.leaderboard().entries()[0].score, 20);

    hub.update_status(2, AdoptionStatus::Revived, Some("released 2.0".to_string()))
        .unwrap();
    let entry = &hub.leaderboard().entries()[0];
    assert_eq!((entry.adopts_count, entry.revivals_count, entry.score), (2, 1, 70));
}

#[tokio::test]
async fn test_reviving_an_existing_adoption_adds_exactly_fifty() {
    let mut hub = hub_for("alice", Arc::new(MemoryStore::new()));
    hub.login().await.unwrap();
    hub.adopt(3).unwrap();
    let before = hub.leaderboard().entries()[0].score;

    hub.update_status(3, AdoptionStatus::Revived, None).unwrap();
    assert_eq!(hub.leaderboard().entries()[0].score, before + 50);
}

#[tokio::test]
async fn test_signed_in_identity_shows_on_leaderboard() {
    let mut hub = hub_for("alice", Arc::new(MemoryStore::new()));
    hub.login().await.unwrap();
    hub.adopt(1).unwrap();

    let user = &hub.leaderboard().entries()[0].user;
    assert_eq!(user.id, 100);
    assert_eq!(user.avatar_url, "https://avatars.githubusercontent.com/u/100");
}

#[tokio::test]
async fn test_double_adoption_by_same_user_is_rejected() {
    let mut hub = hub_for("alice", Arc::new(MemoryStore::new()));
    hub.login().await.unwrap();
    hub.adopt(1).unwrap();

    assert!(matches!(hub.adopt(1), Err(AppError::InvalidInput(_))));
    assert!(matches!(hub.adopt(404), Err(AppError::NotFound(_))));
    assert_eq!(hub.repositories().adopted().len(), 1);
}

#[tokio::test]
async fn test_two_users_share_the_store() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let mut alice = hub_for("alice", kv.clone());
    alice.login().await.unwrap();
    alice.adopt(1).unwrap();

    let mut bob = hub_for("bob", kv.clone());
    bob.login().await.unwrap();
    bob.adopt(1).unwrap();
    bob.adopt(2).unwrap();

    let logins: Vec<_> = bob
        .leaderboard()
        .entries()
        .iter()
        .map(|e| e.user.login.clone())
        .collect();
    assert_eq!(logins, vec!["bob", "alice"]);
    assert_eq!(bob.my_adoptions().unwrap().len(), 2);

    // alice's hub still holds the old list until it reloads
    assert_eq!(alice.leaderboard().entries().len(), 1);
    alice.reload().unwrap();
    assert_eq!(alice.leaderboard().entries().len(), 2);
}

#[tokio::test]
async fn test_corrupt_record_keeps_previous_leaderboard() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut hub = hub_for("alice", kv.clone());
    hub.login().await.unwrap();
    hub.adopt(1).unwrap();

    let mut records = hub.repositories().adopted().to_vec();
    records[0].adopted_by.clear();
    kv.set_raw(ADOPTED_REPOSITORIES_KEY, &serde_json::to_string(&records).unwrap())
        .unwrap();

    hub.reload().unwrap();
    assert!(hub.leaderboard().error().unwrap().contains("adoptedBy"));
    assert_eq!(hub.leaderboard().entries()[0].user.login, "alice");
}

#[tokio::test]
async fn test_stored_record_without_status_does_not_block_startup() {
    let temp_dir = TempDir::new().unwrap();
    let mut stored = serde_json::to_value(&seed::repositories()[0]).unwrap();
    stored["adoptedAt"] = "2024-01-01T00:00:00Z".into();
    stored["adoptedBy"] = "alice".into();
    FileStore::open(temp_dir.path())
        .unwrap()
        .set_raw(ADOPTED_REPOSITORIES_KEY, &serde_json::json!([stored]).to_string())
        .unwrap();

    let config = AppConfig::new().data_dir(temp_dir.path()).identity(100, "alice");
    let mut hub = ReviveHub::open(&config).await.unwrap();

    assert_eq!(hub.repositories().adopted().len(), 1);
    assert!(hub.leaderboard().entries().is_empty());
    let error = hub.leaderboard().error().unwrap();
    assert!(error.contains("Malformed") && error.contains("status"));
    assert_eq!(hub.my_adoptions().unwrap().len(), 1);

    // giving the record a status repairs the leaderboard
    hub.update_status(1, AdoptionStatus::Revived, None).unwrap();
    assert!(hub.leaderboard().error().is_none());
    assert_eq!(hub.leaderboard().entries()[0].score, 60);
}

#[tokio::test]
async fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::new().data_dir(temp_dir.path()).identity(5, "maya");

    {
        let mut hub = ReviveHub::open(&config).await.unwrap();
        assert_eq!(hub.user().unwrap().login, "maya");
        hub.adopt(2).unwrap();
        hub.update_status(2, AdoptionStatus::InProgress, None).unwrap();
    }

    let anonymous = config.clone().anonymous();
    let hub = ReviveHub::open(&anonymous).await.unwrap();
    assert_eq!(hub.user().unwrap().login, "maya");
    let mine = hub.my_adoptions().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, Some(AdoptionStatus::InProgress));
    assert!(hub.repositories().repositories().iter().any(|r| r.id == 2 && r.is_adopted));
    assert_eq!(hub.leaderboard().entries()[0].score, 10);
}

#[tokio::test]
async fn test_logout_then_anonymous_restore_stays_signed_out() {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut hub = hub_for("alice", kv.clone());
    hub.login().await.unwrap();
    hub.logout().unwrap();

    let mut hub = ReviveHub::with_parts(
        MemoryHistory::new("/adopted"),
        kv,
        Arc::new(AnonymousProvider),
        seed::repositories().to_vec(),
    )
    .unwrap();
    assert!(hub.restore().await.is_none());
    assert!(matches!(hub.my_adoptions(), Err(AppError::Unauthenticated(_))));
    assert_eq!(hub.current_view(), ViewId::Adopted);
}

#[tokio::test]
async fn test_router_is_mounted_at_startup() {
    let mut hub = hub_for("alice", Arc::new(MemoryStore::new()));
    assert!(hub.router().is_mounted());
    assert!(!hub.router_mut().mount());

    let mut click = LinkActivation::new("/leaderboard");
    assert!(hub.router_mut().dispatch(BrowserEvent::Click(&mut click)));
    assert_eq!(hub.current_view(), ViewId::Leaderboard);
}

#[tokio::test]
async fn test_search_marks_adopted_repositories() {
    let mut hub = hub_for("alice", Arc::new(MemoryStore::new()));
    hub.login().await.unwrap();
    hub.adopt(3).unwrap();

    let results = hub.search(Some(SearchFilters::default().language("Python")));
    assert_eq!(results.len(), 1);
    assert!(results[0].is_adopted);
}
