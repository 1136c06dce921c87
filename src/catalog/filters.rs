// ============================================================================
// Catalog filtering and sorting
// ============================================================================
//
// Filters are conjunctive. Sorting is stable, so repositories with equal
// keys keep catalog order in both directions.
//
// ============================================================================

use crate::core::{AppError, Repository, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Star threshold applied by default.
pub const DEFAULT_MIN_STARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Staleness,
    Stars,
    Forks,
    Issues,
}

impl SortBy {
    fn key(&self, repository: &Repository) -> u32 {
        match self {
            Self::Staleness => repository.staleness.score,
            Self::Stars => repository.stars,
            Self::Forks => repository.forks,
            Self::Issues => repository.open_issues,
        }
    }
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "staleness" => Ok(Self::Staleness),
            "stars" => Ok(Self::Stars),
            "forks" => Ok(Self::Forks),
            "issues" => Ok(Self::Issues),
            other => Err(AppError::InvalidInput(format!("unknown sort key '{}'", other))),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Staleness => "staleness",
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Issues => "issues",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AppError::InvalidInput(format!("unknown sort direction '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stars: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_forks: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            language: None,
            min_stars: Some(DEFAULT_MIN_STARS),
            min_forks: None,
            topics: Vec::new(),
            sort_by: SortBy::Staleness,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl SearchFilters {
    /// No thresholds at all, default ordering.
    pub fn unfiltered() -> Self {
        Self {
            min_stars: None,
            ..Self::default()
        }
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn min_stars(mut self, stars: u32) -> Self {
        self.min_stars = Some(stars);
        self
    }

    pub fn min_forks(mut self, forks: u32) -> Self {
        self.min_forks = Some(forks);
        self
    }

    pub fn topic(mut self, topic: &str) -> Self {
        self.topics.push(topic.to_string());
        self
    }

    pub fn sort(mut self, sort_by: SortBy, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = direction;
        self
    }

    /// Number of filters that differ from the defaults.
    pub fn active_filter_count(&self) -> usize {
        [
            self.language.is_some(),
            self.min_stars.is_some_and(|stars| stars != DEFAULT_MIN_STARS),
            self.min_forks.is_some_and(|forks| forks > 0),
            !self.topics.is_empty(),
            self.sort_by != SortBy::Staleness,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn matches(&self, repository: &Repository) -> bool {
        if let Some(language) = &self.language {
            if !repository.language.eq_ignore_ascii_case(language) {
                return false;
            }
        }
        if self.min_stars.is_some_and(|min| repository.stars < min) {
            return false;
        }
        if self.min_forks.is_some_and(|min| repository.forks < min) {
            return false;
        }
        self.topics.iter().all(|wanted| {
            repository
                .topics
                .iter()
                .any(|topic| topic.eq_ignore_ascii_case(wanted))
        })
    }

    pub fn compare(&self, a: &Repository, b: &Repository) -> Ordering {
        let ordering = self.sort_by.key(a).cmp(&self.sort_by.key(b));
        match self.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Matching repositories in sorted order.
    pub fn apply<'a, I>(&self, repositories: I) -> Vec<Repository>
    where
        I: IntoIterator<Item = &'a Repository>,
    {
        let mut matched: Vec<Repository> = repositories
            .into_iter()
            .filter(|repository| self.matches(repository))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
    }
}
