//! Seeded catalog used in place of a live repository search.

use crate::core::{Owner, Repository, Staleness};
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;

lazy_static! {
    static ref SEED_REPOSITORIES: Vec<Repository> = build_seed();
}

/// The seeded repositories, in catalog order.
pub fn repositories() -> &'static [Repository] {
    &SEED_REPOSITORIES
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn repository(
    id: u64,
    owner: &str,
    name: &str,
    owner_id: u64,
    description: &str,
    counts: [u32; 4],
) -> Repository {
    let [stars, forks, open_issues, open_pull_requests] = counts;
    Repository {
        id,
        name: name.to_string(),
        full_name: format!("{}/{}", owner, name),
        description: description.to_string(),
        url: format!("https://api.github.com/repos/{}/{}", owner, name),
        html_url: format!("https://github.com/{}/{}", owner, name),
        owner: Owner {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/u/{}", owner_id),
        },
        stars,
        forks,
        open_issues,
        open_pull_requests,
        last_commit_date: DateTime::<Utc>::MIN_UTC,
        topics: Vec::new(),
        language: String::new(),
        staleness: Staleness {
            score: 0,
            days_since_last_commit: 0,
            dependency_freshness: None,
        },
        ai_summary: None,
        ai_suggestions: None,
        is_adopted: false,
    }
}

fn build_seed() -> Vec<Repository> {
    let mut awesome = repository(
        1,
        "developer",
        "awesome-project",
        12345678,
        "A utility library for handling complex data structures with ease and performance",
        [245, 35, 12, 6],
    );
    awesome.last_commit_date = at(2022, 5, 15, 10, 30);
    awesome.topics = strings(&["javascript", "utilities", "performance"]);
    awesome.language = "JavaScript".to_string();
    awesome.staleness = Staleness {
        score: 75,
        days_since_last_commit: 450,
        dependency_freshness: Some(0.3),
    };
    awesome.ai_summary = Some(
        "A JavaScript utility library focused on efficiently manipulating complex data structures with a minimal footprint."
            .to_string(),
    );
    awesome.ai_suggestions = Some(strings(&[
        "Update dependencies to address security vulnerabilities",
        "Migrate to TypeScript for better type safety",
        "Add more comprehensive test coverage",
    ]));

    let mut viz = repository(
        2,
        "viz-team",
        "data-viz-framework",
        87654321,
        "A declarative framework for building interactive data visualizations",
        [912, 105, 43, 18],
    );
    viz.last_commit_date = at(2021, 11, 2, 15, 45);
    viz.topics = strings(&["visualization", "d3", "svg", "charts"]);
    viz.language = "TypeScript".to_string();
    viz.staleness = Staleness {
        score: 88,
        days_since_last_commit: 650,
        dependency_freshness: Some(0.1),
    };
    viz.ai_summary = Some(
        "A TypeScript framework for building interactive data visualizations based on D3, with a declarative API."
            .to_string(),
    );
    viz.ai_suggestions = Some(strings(&[
        "Update D3 dependency to latest version",
        "Implement React integration",
        "Add support for modern browser features like Web Components",
    ]));

    let mut toolkit = repository(
        3,
        "ai-lab",
        "ml-toolkit",
        55555555,
        "A collection of machine learning algorithms and utilities for data preprocessing",
        [1250, 320, 67, 28],
    );
    toolkit.last_commit_date = at(2022, 3, 11, 9, 15);
    toolkit.topics = strings(&["machine-learning", "data-science", "python", "algorithms"]);
    toolkit.language = "Python".to_string();
    toolkit.staleness = Staleness {
        score: 70,
        days_since_last_commit: 520,
        dependency_freshness: Some(0.4),
    };
    toolkit.ai_summary = Some(
        "A Python toolkit providing implementations of common machine learning algorithms and data preprocessing utilities."
            .to_string(),
    );
    toolkit.ai_suggestions = Some(strings(&[
        "Update scikit-learn dependencies",
        "Add GPU acceleration support",
        "Implement newer algorithms from recent papers",
    ]));

    vec![awesome, viz, toolkit]
}
