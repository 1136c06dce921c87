//! Maintenance suggestions for a repository.

use crate::core::{Repository, Result};
use async_trait::async_trait;

/// Generated text for a repository: a one-line summary and a list of
/// maintenance suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub summary: String,
    pub suggestions: Vec<String>,
}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, repository: &Repository) -> Result<Suggestions>;
}

/// Builds suggestions from the repository's own metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateSuggestions;

impl TemplateSuggestions {
    pub fn summary_for(repository: &Repository) -> String {
        format!(
            "A {} library that provides {} functionality with a focus on developer experience and performance.",
            repository.language,
            repository.topics.join(", ")
        )
    }

    pub fn suggestions_for(repository: &Repository) -> Vec<String> {
        vec![
            "Update dependencies to latest versions to fix security vulnerabilities".to_string(),
            "Add more comprehensive test coverage, especially for edge cases".to_string(),
            format!("Migrate to newer language features available in {}", repository.language),
            "Improve documentation with more examples and use cases".to_string(),
        ]
    }
}

#[async_trait]
impl SuggestionProvider for TemplateSuggestions {
    async fn suggest(&self, repository: &Repository) -> Result<Suggestions> {
        Ok(Suggestions {
            summary: Self::summary_for(repository),
            suggestions: Self::suggestions_for(repository),
        })
    }
}
