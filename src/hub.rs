//! Application root.
//!
//! [`ReviveHub`] owns the router, the auth session, the repository store and
//! the leaderboard. Every change to the adoption records goes through it and
//! recomputes the leaderboard before returning, so a reader never sees a
//! leaderboard older than the records.

use crate::auth::{
    AnonymousProvider, AuthSession, FixedIdentityProvider, IdentityProvider, UserDirectory,
};
use crate::catalog::{RepositoryStore, SearchFilters};
use crate::config::AppConfig;
use crate::core::{AdoptedRepository, AdoptionStatus, LeaderboardEntry, Repository, Result, User};
use crate::leaderboard::Leaderboard;
use crate::router::{History, MemoryHistory, NavigationRouter, ViewId};
use crate::seed;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct ReviveHub<H: History = MemoryHistory> {
    router: NavigationRouter<H>,
    auth: AuthSession,
    repositories: RepositoryStore,
    leaderboard: Leaderboard,
    directory: Arc<UserDirectory>,
}

impl ReviveHub<MemoryHistory> {
    /// Build from configuration over the seeded catalog and restore any session.
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// use reviveboard::{AppConfig, ReviveHub};
    ///
    /// let mut hub = ReviveHub::open(&AppConfig::new().in_memory()).await.unwrap();
    /// hub.adopt(1).unwrap();
    /// assert_eq!(hub.leaderboard().entries()[0].score, 10);
    /// # });
    /// ```
    pub async fn open(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let kv: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        let provider: Arc<dyn IdentityProvider> = match &config.identity {
            Some(identity) => Arc::new(FixedIdentityProvider::new(identity.id, &identity.login)),
            None => Arc::new(AnonymousProvider),
        };

        let mut hub = Self::with_parts(
            MemoryHistory::new(&config.initial_path),
            kv,
            provider,
            seed::repositories().to_vec(),
        )?;
        hub.repositories.set_page_size(config.page_size);
        hub.restore().await;
        Ok(hub)
    }
}

impl<H: History> ReviveHub<H> {
    /// Assemble from explicit collaborators. Registers the router listeners
    /// and computes the first leaderboard.
    pub fn with_parts(
        history: H,
        kv: Arc<dyn KeyValueStore>,
        provider: Arc<dyn IdentityProvider>,
        catalog: Vec<Repository>,
    ) -> Result<Self> {
        let directory = Arc::new(UserDirectory::new());
        let auth = AuthSession::open(kv.clone(), provider)?;
        if let Some(user) = auth.user() {
            directory.remember(user.clone());
        }

        let repositories = RepositoryStore::open(kv, catalog)?;
        let mut leaderboard = Leaderboard::with_directory(directory.clone());
        leaderboard.refresh(repositories.adopted());

        let mut router = NavigationRouter::new(history);
        router.mount();

        Ok(Self {
            router,
            auth,
            repositories,
            leaderboard,
            directory,
        })
    }

    pub fn router(&self) -> &NavigationRouter<H> {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut NavigationRouter<H> {
        &mut self.router
    }

    pub fn current_view(&self) -> ViewId {
        self.router.current_view()
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn repositories(&self) -> &RepositoryStore {
        &self.repositories
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    pub async fn restore(&mut self) -> Option<&User> {
        if let Some(user) = self.auth.restore().await.cloned() {
            self.remember(user);
        }
        self.auth.user()
    }

    pub async fn login(&mut self) -> Result<User> {
        let user = self.auth.login().await?.clone();
        self.remember(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.auth.logout()
    }

    pub fn search(&mut self, filters: Option<SearchFilters>) -> &[Repository] {
        self.repositories.search(filters)
    }

    pub fn load_more(&mut self) -> usize {
        self.repositories.load_more()
    }

    pub async fn generate_suggestions(&mut self, repo_id: u64) -> Result<&Repository> {
        self.repositories.generate_suggestions(repo_id).await
    }

    /// Adopt `repo_id` as the signed-in user.
    pub fn adopt(&mut self, repo_id: u64) -> Result<AdoptedRepository> {
        let user = self.auth.require_user("adopt a repository")?.clone();
        let record = self.repositories.adopt(repo_id, &user, Utc::now())?.clone();
        self.refresh_leaderboard();
        Ok(record)
    }

    /// Move the signed-in user's adoption of `repo_id` to `status`.
    pub fn update_status(
        &mut self,
        repo_id: u64,
        status: AdoptionStatus,
        improvement: Option<String>,
    ) -> Result<AdoptedRepository> {
        let login = self.auth.require_user("update an adoption")?.login.clone();
        let record = self
            .repositories
            .update_status(repo_id, &login, status, improvement)?
            .clone();
        self.refresh_leaderboard();
        Ok(record)
    }

    /// The signed-in user's adoptions.
    pub fn my_adoptions(&self) -> Result<Vec<&AdoptedRepository>> {
        let user = self.auth.require_user("view adopted repositories")?;
        Ok(self.repositories.adopted_by(&user.login))
    }

    /// Manual recomputation trigger.
    pub fn refresh_leaderboard(&mut self) -> &[LeaderboardEntry] {
        self.leaderboard.refresh(self.repositories.adopted())
    }

    /// Re-read adoption records from storage and recompute.
    pub fn reload(&mut self) -> Result<&[LeaderboardEntry]> {
        self.repositories.reload()?;
        Ok(self.refresh_leaderboard())
    }

    fn remember(&mut self, user: User) {
        info!(login = %user.login, "identity known to leaderboard");
        self.directory.remember(user);
        self.refresh_leaderboard();
    }
}
