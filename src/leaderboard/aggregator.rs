// ============================================================================
// Leaderboard aggregation
// ============================================================================
//
// Group adoption records by `adopted_by`, count adoptions and revivals,
// score, and rank. Pure: the same records always give the same entries.
//
// ============================================================================

use crate::auth::{IdentityDirectory, PlaceholderDirectory};
use crate::core::{AdoptedRepository, AppError, LeaderboardEntry, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Points per adopted repository.
pub const ADOPTION_POINTS: u32 = 10;
/// Bonus points per revived repository.
pub const REVIVAL_POINTS: u32 = 50;

pub fn score(adopts_count: u32, revivals_count: u32) -> u32 {
    adopts_count * ADOPTION_POINTS + revivals_count * REVIVAL_POINTS
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    adopts: u32,
    revivals: u32,
}

/// Rank every distinct `adopted_by` handle, using placeholder identities.
pub fn compute_leaderboard(records: &[AdoptedRepository]) -> Result<Vec<LeaderboardEntry>> {
    compute_leaderboard_with(records, &PlaceholderDirectory)
}

/// Rank every distinct `adopted_by` handle, looking display identities up in
/// `directory`.
///
/// Handles are grouped case-sensitively and kept verbatim. Entries are
/// ordered by score descending, then by login ascending.
///
/// # Errors
///
/// [`AppError::MalformedRecord`] when a record lacks its adopter, status or
/// adoption time.
pub fn compute_leaderboard_with(
    records: &[AdoptedRepository],
    directory: &dyn IdentityDirectory,
) -> Result<Vec<LeaderboardEntry>> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for record in records {
        if let Some(field) = record.missing_field() {
            return Err(AppError::MalformedRecord(format!(
                "repository {} ('{}') has no {}",
                record.repository.id, record.repository.full_name, field
            )));
        }

        let tally = tallies.entry(record.adopted_by.as_str()).or_default();
        tally.adopts += 1;
        if record.is_revived() {
            tally.revivals += 1;
        }
    }

    let mut entries: Vec<LeaderboardEntry> = tallies
        .into_iter()
        .map(|(login, tally)| {
            let mut user = directory.lookup(login).unwrap_or_else(|| directory.placeholder(login));
            // Grouping key wins over whatever the directory returned.
            user.login = login.to_string();
            LeaderboardEntry {
                user,
                adopts_count: tally.adopts,
                revivals_count: tally.revivals,
                score: score(tally.adopts, tally.revivals),
            }
        })
        .collect();

    entries.sort_by(compare_entries);
    Ok(entries)
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.user.login.cmp(&b.user.login))
}
