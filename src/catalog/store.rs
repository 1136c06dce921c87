use super::filters::SearchFilters;
use crate::core::{AdoptedRepository, AdoptionStatus, AppError, Repository, Result, User};
use crate::storage::{ADOPTED_REPOSITORIES_KEY, KeyValueStore, KeyValueStoreExt};
use crate::suggest::{SuggestionProvider, TemplateSuggestions};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Results per page; a full page means more may follow.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Browsable catalog plus the persisted adoption records.
pub struct RepositoryStore {
    kv: Arc<dyn KeyValueStore>,
    suggestions: Arc<dyn SuggestionProvider>,
    source: Vec<Repository>,
    repositories: Vec<Repository>,
    adopted: Vec<AdoptedRepository>,
    filters: SearchFilters,
    current_page: usize,
    page_size: usize,
    has_more: bool,
    is_loading: bool,
    error: Option<String>,
}

impl RepositoryStore {
    /// Open over `source`, loading previously persisted adoptions.
    pub fn open(kv: Arc<dyn KeyValueStore>, source: Vec<Repository>) -> Result<Self> {
        let adopted: Vec<AdoptedRepository> = kv.get_or(ADOPTED_REPOSITORIES_KEY, Vec::new())?;
        debug!(catalog = source.len(), adopted = adopted.len(), "repository store opened");

        let mut store = Self {
            kv,
            suggestions: Arc::new(TemplateSuggestions),
            repositories: source.clone(),
            source,
            adopted,
            filters: SearchFilters::default(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            has_more: true,
            is_loading: false,
            error: None,
        };
        store.mark_adopted();
        Ok(store)
    }

    pub fn with_suggestions(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.suggestions = provider;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn adopted(&self) -> &[AdoptedRepository] {
        &self.adopted
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// True only while [`RepositoryStore::generate_suggestions`] awaits its
    /// provider. Search and paging finish synchronously and never set it.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, repo_id: u64) -> Option<&Repository> {
        self.repositories
            .iter()
            .chain(self.source.iter())
            .find(|repo| repo.id == repo_id)
    }

    /// Re-run the search, optionally with new filters. Paging restarts at 1.
    pub fn search(&mut self, filters: Option<SearchFilters>) -> &[Repository] {
        self.error = None;
        self.current_page = 1;
        if let Some(filters) = filters {
            self.filters = filters;
        }

        self.repositories = self.filters.apply(&self.source);
        self.mark_adopted();
        self.has_more = self.repositories.len() >= self.page_size;

        debug!(results = self.repositories.len(), filters = ?self.filters, "catalog searched");
        &self.repositories
    }

    /// Append the next page. Returns how many repositories were added;
    /// zero when nothing more is available.
    ///
    /// Page ids follow the current list, so the same search and paging
    /// always produce the same ids. They exist only in this store and are
    /// not persisted.
    pub fn load_more(&mut self) -> usize {
        if !self.has_more {
            return 0;
        }

        let next = self.current_page + 1;
        let base_id = self.repositories.iter().map(|repo| repo.id).max().unwrap_or(0);
        let page: Vec<Repository> = self
            .repositories
            .iter()
            .enumerate()
            .map(|(index, repo)| {
                let mut copy = repo.clone();
                copy.id = base_id + index as u64 + 1;
                copy.name = format!("{}-{}", repo.name, next);
                copy.full_name = format!("{}-{}", repo.full_name, next);
                copy
            })
            .collect();

        let added = page.len();
        self.has_more = added >= self.page_size;
        self.repositories.extend(page);
        self.mark_adopted();
        self.current_page = next;

        debug!(page = next, added, "loaded more repositories");
        added
    }

    /// Record that `user` adopts `repo_id`.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for an unknown repository, [`AppError::InvalidInput`]
    /// when this user already adopted it, storage errors when persisting fails.
    pub fn adopt(&mut self, repo_id: u64, user: &User, now: DateTime<Utc>) -> Result<&AdoptedRepository> {
        let repository = self
            .find(repo_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(repo_id.to_string()))?;

        if self.position_of(repo_id, &user.login).is_some() {
            return Err(AppError::InvalidInput(format!(
                "{} already adopted {}",
                user.login, repository.name
            )));
        }

        let record = AdoptedRepository::new(repository, &user.login, now);
        let mut next = self.adopted.clone();
        next.push(record);
        self.commit(next)?;

        for repo in self.repositories.iter_mut().filter(|repo| repo.id == repo_id) {
            repo.is_adopted = true;
        }

        let record = self.adopted.last().ok_or_else(|| AppError::NotFound(repo_id.to_string()))?;
        info!(repo = %record.repository.full_name, login = %user.login, "repository adopted");
        Ok(record)
    }

    /// Move `login`'s adoption of `repo_id` to `status`, optionally noting an improvement.
    pub fn update_status(
        &mut self,
        repo_id: u64,
        login: &str,
        status: AdoptionStatus,
        improvement: Option<String>,
    ) -> Result<&AdoptedRepository> {
        let index = self
            .position_of(repo_id, login)
            .ok_or_else(|| AppError::NotFound(format!("{} (adopted by {})", repo_id, login)))?;

        let mut next = self.adopted.clone();
        let record = &mut next[index];
        record.status = Some(status);
        if let Some(note) = improvement.filter(|note| !note.trim().is_empty()) {
            record.improvements.push(note);
        }
        self.commit(next)?;

        let record = &self.adopted[index];
        info!(repo = %record.repository.full_name, %login, %status, "adoption status updated");
        Ok(record)
    }

    /// Adoptions belonging to `login`, oldest first.
    pub fn adopted_by(&self, login: &str) -> Vec<&AdoptedRepository> {
        self.adopted
            .iter()
            .filter(|record| record.adopted_by == login)
            .collect()
    }

    /// Fill in the summary and suggestions of `repo_id` when either is missing.
    pub async fn generate_suggestions(&mut self, repo_id: u64) -> Result<&Repository> {
        let index = self
            .repositories
            .iter()
            .position(|repo| repo.id == repo_id)
            .ok_or_else(|| AppError::NotFound(repo_id.to_string()))?;

        let current = &self.repositories[index];
        if current.ai_summary.is_some() && current.ai_suggestions.is_some() {
            return Ok(&self.repositories[index]);
        }

        self.is_loading = true;
        let generated = self.suggestions.suggest(current).await;
        self.is_loading = false;

        let generated = match generated {
            Ok(generated) => generated,
            Err(err) => {
                warn!(repo_id, error = %err, "failed to generate suggestions");
                let message = format!("Failed to generate suggestions for {}: {}", current.name, err);
                self.error = Some(message.clone());
                return Err(AppError::Suggestion(message));
            }
        };
        self.error = None;

        let repo = &mut self.repositories[index];
        repo.ai_summary.get_or_insert(generated.summary);
        repo.ai_suggestions.get_or_insert(generated.suggestions);
        Ok(&self.repositories[index])
    }

    /// Reload adoption records from storage, replacing the in-memory list.
    pub fn reload(&mut self) -> Result<&[AdoptedRepository]> {
        self.adopted = self.kv.get_or(ADOPTED_REPOSITORIES_KEY, Vec::new())?;
        self.mark_adopted();
        Ok(&self.adopted)
    }

    fn position_of(&self, repo_id: u64, login: &str) -> Option<usize> {
        self.adopted
            .iter()
            .position(|record| record.id() == repo_id && record.adopted_by == login)
    }

    /// Persist first, then swap in memory, so a storage failure leaves
    /// both sides at the previous list.
    fn commit(&mut self, next: Vec<AdoptedRepository>) -> Result<()> {
        self.kv.set(ADOPTED_REPOSITORIES_KEY, &next)?;
        self.adopted = next;
        Ok(())
    }

    fn mark_adopted(&mut self) {
        for repo in &mut self.repositories {
            repo.is_adopted = self.adopted.iter().any(|record| record.id() == repo.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::storage::MemoryStore;

    fn open() -> RepositoryStore {
        RepositoryStore::open(Arc::new(MemoryStore::new()), seed::repositories().to_vec()).unwrap()
    }

    #[test]
    fn test_load_more_synthesizes_unique_ids() {
        let mut store = open().with_page_size(3);
        store.search(Some(SearchFilters::unfiltered()));
        assert!(store.has_more());

        assert_eq!(store.load_more(), 3);
        assert_eq!(store.current_page(), 2);
        let mut ids: Vec<_> = store.repositories().iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        assert!(store.repositories().iter().any(|r| r.name == "ml-toolkit-2"));
    }

    #[test]
    fn test_adopted_page_repository_stays_adopted_across_searches() {
        let mut store = open().with_page_size(3);
        store.search(Some(SearchFilters::unfiltered()));
        store.load_more();

        let extra = store.repositories()[3].clone();
        assert_eq!(extra.id, 4);
        assert!(!extra.is_adopted);
        store.adopt(extra.id, &User::placeholder("alice"), Utc::now()).unwrap();

        store.search(None);
        assert!(store.find(4).is_none());
        store.load_more();

        let again = store.find(4).unwrap();
        assert_eq!(again.name, extra.name);
        assert!(again.is_adopted);
        assert_eq!(again.name, "data-viz-framework-2");
        let others: Vec<_> = store.repositories()[3..].iter().filter(|r| r.id != 4).collect();
        assert_eq!(others.len(), 2);
        assert!(others.iter().all(|r| !r.is_adopted));
    }

    #[test]
    fn test_load_more_stops_without_more() {
        let mut store = open();
        store.search(None);
        assert!(!store.has_more());
        assert_eq!(store.load_more(), 0);
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn test_update_status_requires_own_adoption() {
        let mut store = open();
        let alice = User::placeholder("alice");
        store.adopt(1, &alice, Utc::now()).unwrap();

        let err = store.update_status(1, "bob", AdoptionStatus::Revived, None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let record = store
            .update_status(1, "alice", AdoptionStatus::InProgress, Some("bumped deps".to_string()))
            .unwrap();
        assert_eq!(record.status, Some(AdoptionStatus::InProgress));
        assert_eq!(record.improvements, vec!["bumped deps".to_string()]);
    }

    #[tokio::test]
    async fn test_suggestions_fill_only_missing_fields() {
        let mut store = open();
        let repo = store.repositories()[0].clone();
        let mut bare = repo.clone();
        bare.ai_suggestions = None;
        store.repositories[0] = bare;

        let updated = store.generate_suggestions(repo.id).await.unwrap();
        assert_eq!(updated.ai_summary, repo.ai_summary);
        assert_eq!(updated.ai_suggestions.as_ref().unwrap().len(), 4);
    }
}
