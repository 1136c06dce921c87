use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AppError, Result};

/// A GitHub-style user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub url: String,
}

impl User {
    /// Identity synthesized from a bare handle when nothing richer is known.
    ///
    /// Deterministic for a given login, so two aggregation passes over the
    /// same records compare equal.
    pub fn placeholder(login: &str) -> Self {
        Self {
            id: 0,
            login: login.to_string(),
            avatar_url: format!("https://github.com/{}.png", login),
            name: None,
            bio: None,
            url: format!("https://github.com/{}", login),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staleness {
    /// 0 (fresh) ..= 100 (abandoned)
    pub score: u32,
    pub days_since_last_commit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_freshness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub url: String,
    pub html_url: String,
    pub owner: Owner,
    pub stars: u32,
    pub forks: u32,
    pub open_issues: u32,
    pub open_pull_requests: u32,
    pub last_commit_date: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub language: String,
    pub staleness: Staleness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub is_adopted: bool,
}

/// Lifecycle of one adoption claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStatus {
    Adopted,
    InProgress,
    Revived,
}

impl AdoptionStatus {
    pub const ALL: [AdoptionStatus; 3] = [Self::Adopted, Self::InProgress, Self::Revived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adopted => "adopted",
            Self::InProgress => "in_progress",
            Self::Revived => "revived",
        }
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdoptionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown adoption status '{}'", s)))
    }
}

/// One user's claim on one repository.
///
/// `adopted_at`, `adopted_by` and `status` tolerate being absent from stored
/// data. The leaderboard reports such records as malformed; loading the
/// list never fails on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptedRepository {
    #[serde(flatten)]
    pub repository: Repository,
    #[serde(default)]
    pub adopted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub adopted_by: String,
    #[serde(default)]
    pub status: Option<AdoptionStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
}

impl AdoptedRepository {
    pub fn new(repository: Repository, adopted_by: &str, adopted_at: DateTime<Utc>) -> Self {
        let mut repository = repository;
        repository.is_adopted = true;
        Self {
            repository,
            adopted_at: Some(adopted_at),
            adopted_by: adopted_by.to_string(),
            status: Some(AdoptionStatus::Adopted),
            improvements: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.repository.id
    }

    /// Whether this record currently counts as revived.
    pub fn is_revived(&self) -> bool {
        self.status == Some(AdoptionStatus::Revived)
    }

    /// First required field absent from this record, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.adopted_by.trim().is_empty() {
            Some("adoptedBy")
        } else if self.status.is_none() {
            Some("status")
        } else if self.adopted_at.is_none() {
            Some("adoptedAt")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user: User,
    pub adopts_count: u32,
    pub revivals_count: u32,
    pub score: u32,
}
