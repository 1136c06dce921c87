//! Text helpers shared by the CLI views.

use chrono::{DateTime, Utc};
use std::fmt;

/// "May 15, 2022"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {} ago", count, unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Coarse relative time: seconds, minutes, hours, days, 30-day months, 12-month years.
pub fn time_ago(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *then).num_seconds();
    if seconds < 60 {
        return format!("{} seconds ago", seconds);
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }
    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StalenessBand {
    Fresh,
    Moderate,
    Elevated,
    High,
    Critical,
}

impl StalenessBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Critical,
            70..=89 => Self::High,
            50..=69 => Self::Elevated,
            30..=49 => Self::Moderate,
            _ => Self::Fresh,
        }
    }
}

impl fmt::Display for StalenessBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Fresh => "fresh",
            Self::Moderate => "moderate",
            Self::Elevated => "elevated",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}
