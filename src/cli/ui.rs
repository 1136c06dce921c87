use chrono::{DateTime, Utc};
use reviveboard::AdoptedRepository;
use reviveboard::catalog::SearchFilters;
use reviveboard::core::{LeaderboardEntry, Repository};
use reviveboard::format::{StalenessBand, format_date, time_ago, truncate};
use std::fmt::Write;

const DESCRIPTION_WIDTH: usize = 60;

pub fn repositories(repos: &[Repository], filters: &SearchFilters, now: &DateTime<Utc>) -> String {
    let mut out = String::new();
    let active = filters.active_filter_count();
    let _ = writeln!(
        out,
        "{} repositories (sort: {} {:?}, {} active filter{})",
        repos.len(),
        filters.sort_by,
        filters.sort_direction,
        active,
        if active == 1 { "" } else { "s" }
    );

    if repos.is_empty() {
        out.push_str("No repositories found. Try adjusting your filters to see more results.\n");
        return out;
    }

    for repo in repos {
        let adopted = if repo.is_adopted { " [adopted]" } else { "" };
        let _ = writeln!(out, "#{:<4} {}{}", repo.id, repo.full_name, adopted);
        let _ = writeln!(out, "      {}", truncate(&repo.description, DESCRIPTION_WIDTH));
        let _ = writeln!(
            out,
            "      {} | {} stars | {} forks | {} issues | staleness {} ({}) | last commit {}",
            repo.language,
            repo.stars,
            repo.forks,
            repo.open_issues,
            repo.staleness.score,
            StalenessBand::from_score(repo.staleness.score),
            time_ago(&repo.last_commit_date, now)
        );
    }
    out
}

pub fn suggestions(repo: &Repository) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", repo.full_name);
    if let Some(summary) = &repo.ai_summary {
        let _ = writeln!(out, "  {}", summary);
    }
    for suggestion in repo.ai_suggestions.iter().flatten() {
        let _ = writeln!(out, "  - {}", suggestion);
    }
    out
}

pub fn adopted(records: &[&AdoptedRepository]) -> String {
    if records.is_empty() {
        return "You haven't adopted any repositories yet.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "#{:<4} {} ({}) adopted on {}",
            record.id(),
            record.repository.full_name,
            record.status.map_or("unknown", |status| status.as_str()),
            record.adopted_at.as_ref().map_or_else(|| "unknown date".to_string(), format_date)
        );
        for improvement in &record.improvements {
            let _ = writeln!(out, "      * {}", improvement);
        }
    }
    out
}

fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "gold",
        2 => "silver",
        3 => "bronze",
        _ => "",
    }
}

pub fn leaderboard(entries: &[LeaderboardEntry], error: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(error) = error {
        let _ = writeln!(out, "warning: {}", error);
    }
    if entries.is_empty() {
        out.push_str("No entries yet. Be the first to adopt and revive a repository!\n");
        return out;
    }

    let _ = writeln!(out, "{:<6} {:<24} {:>9} {:>9} {:>7}", "Rank", "User", "Adoptions", "Revivals", "Score");
    for (index, entry) in entries.iter().enumerate() {
        let rank = index + 1;
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:>9} {:>9} {:>7} {}",
            rank,
            entry.user.login,
            entry.adopts_count,
            entry.revivals_count,
            entry.score,
            medal(rank)
        );
    }
    out
}
