//! Leaderboard aggregation tests
//!
//! Run with: cargo test --test leaderboard_tests

use chrono::{TimeZone, Utc};
use reviveboard::core::{AdoptedRepository, AdoptionStatus, AppError};
use reviveboard::leaderboard::{Leaderboard, compute_leaderboard};
use reviveboard::seed;

fn record(login: &str, status: AdoptionStatus) -> AdoptedRepository {
    let adopted_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut record = AdoptedRepository::new(seed::repositories()[0].clone(), login, adopted_at);
    record.status = Some(status);
    record
}

#[test]
fn test_empty_input_gives_empty_leaderboard() {
    assert!(compute_leaderboard(&[]).unwrap().is_empty());
}

#[test]
fn test_alice_and_bob_example() {
    let records = vec![
        record("alice", AdoptionStatus::Adopted),
        record("alice", AdoptionStatus::Revived),
        record("bob", AdoptionStatus::Adopted),
    ];

    let entries = compute_leaderboard(&records).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].user.login, "alice");
    assert_eq!((entries[0].adopts_count, entries[0].revivals_count, entries[0].score), (2, 1, 70));
    assert_eq!(entries[1].user.login, "bob");
    assert_eq!((entries[1].adopts_count, entries[1].revivals_count, entries[1].score), (1, 0, 10));
}

#[test]
fn test_in_progress_counts_as_adoption_only() {
    let entries = compute_leaderboard(&[record("x", AdoptionStatus::InProgress)]).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user.login, "x");
    assert_eq!(entries[0].adopts_count, 1);
    assert_eq!(entries[0].revivals_count, 0);
    assert_eq!(entries[0].score, 10);
}

#[test]
fn test_recomputation_is_idempotent() {
    let records = vec![
        record("carol", AdoptionStatus::Revived),
        record("dan", AdoptionStatus::Adopted),
        record("carol", AdoptionStatus::InProgress),
    ];
    let snapshot = records.clone();

    let first = compute_leaderboard(&records).unwrap();
    let second = compute_leaderboard(&records).unwrap();

    assert_eq!(first, second);
    assert_eq!(records, snapshot);
}

#[test]
fn test_extra_revival_adds_fifty_plus_adoption_and_leaves_others_alone() {
    let mut records = vec![
        record("alice", AdoptionStatus::Adopted),
        record("bob", AdoptionStatus::Revived),
        record("carol", AdoptionStatus::Adopted),
    ];
    let before = compute_leaderboard(&records).unwrap();

    records.push(record("alice", AdoptionStatus::Revived));
    let after = compute_leaderboard(&records).unwrap();

    let find = |entries: &[reviveboard::LeaderboardEntry], login: &str| {
        entries.iter().find(|e| e.user.login == login).cloned().unwrap()
    };
    let alice_before = find(&before, "alice");
    let alice_after = find(&after, "alice");
    assert!(alice_after.score > alice_before.score);
    assert_eq!(alice_after.revivals_count, alice_before.revivals_count + 1);
    assert_eq!(alice_after.score - alice_before.score, 10 + 50);
    for login in ["bob", "carol"] {
        assert_eq!(find(&before, login), find(&after, login));
    }
}

#[test]
fn test_handles_are_kept_verbatim() {
    let entries = compute_leaderboard(&[record("  Mixed-Case_user ", AdoptionStatus::Adopted)]).unwrap();
    assert_eq!(entries[0].user.login, "  Mixed-Case_user ");
}

#[test]
fn test_ties_are_ordered_by_login() {
    let records = vec![
        record("zed", AdoptionStatus::Revived),
        record("amy", AdoptionStatus::Revived),
        record("mo", AdoptionStatus::Revived),
    ];
    let logins: Vec<_> = compute_leaderboard(&records)
        .unwrap()
        .into_iter()
        .map(|e| e.user.login)
        .collect();
    assert_eq!(logins, vec!["amy", "mo", "zed"]);
}

#[test]
fn test_record_without_adopter_is_reported() {
    let raw = serde_json::json!([{
        "id": 1,
        "name": "awesome-project",
        "fullName": "developer/awesome-project",
        "description": "",
        "url": "",
        "htmlUrl": "",
        "owner": { "login": "developer", "avatarUrl": "" },
        "stars": 245,
        "forks": 35,
        "openIssues": 12,
        "openPullRequests": 6,
        "lastCommitDate": "2022-05-15T10:30:00Z",
        "language": "JavaScript",
        "staleness": { "score": 75, "daysSinceLastCommit": 450 },
        "adoptedAt": "2024-01-01T00:00:00Z",
        "status": "adopted"
    }]);
    let records: Vec<AdoptedRepository> = serde_json::from_value(raw).unwrap();

    let err = compute_leaderboard(&records).unwrap_err();
    assert!(matches!(err, AppError::MalformedRecord(_)));

    let mut board = Leaderboard::new();
    board.refresh(&[record("alice", AdoptionStatus::Adopted)]);
    board.refresh(&records);
    assert!(board.error().is_some());
    assert_eq!(board.entries().len(), 1);
}
