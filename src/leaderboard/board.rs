use super::aggregator::compute_leaderboard_with;
use crate::auth::{IdentityDirectory, PlaceholderDirectory};
use crate::core::{AdoptedRepository, LeaderboardEntry};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owner of the current leaderboard snapshot.
///
/// A failed recomputation keeps the previous snapshot and exposes the
/// failure through [`Leaderboard::error`] until the next success.
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    error: Option<String>,
    directory: Arc<dyn IdentityDirectory>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::with_directory(Arc::new(PlaceholderDirectory))
    }

    pub fn with_directory(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self {
            entries: Vec::new(),
            error: None,
            directory,
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Recomputation is synchronous and finishes inside [`Leaderboard::refresh`],
    /// so this always reads `false`.
    pub fn is_loading(&self) -> bool {
        false
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Recompute from the full record list.
    pub fn refresh(&mut self, records: &[AdoptedRepository]) -> &[LeaderboardEntry] {
        self.error = None;

        match compute_leaderboard_with(records, self.directory.as_ref()) {
            Ok(entries) => {
                debug!(records = records.len(), users = entries.len(), "leaderboard recomputed");
                self.entries = entries;
            }
            Err(err) => {
                warn!(error = %err, "leaderboard recomputation failed, keeping previous snapshot");
                self.error = Some(err.to_string());
            }
        }

        &self.entries
    }

    /// 1-based rank of `login`, if present.
    pub fn rank_of(&self, login: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.user.login == login)
            .map(|index| index + 1)
    }

    /// Top three entries.
    pub fn podium(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(3)]
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}
