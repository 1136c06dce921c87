use super::provider::IdentityProvider;
use crate::core::{AppError, Result, User};
use crate::storage::{AUTH_USER_KEY, KeyValueStore, KeyValueStoreExt};
use std::sync::Arc;
use tracing::{info, warn};

/// Signed-in state of this client.
///
/// The user is persisted, so a restart keeps the session.
pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
    provider: Arc<dyn IdentityProvider>,
    user: Option<User>,
    is_loading: bool,
    error: Option<String>,
}

impl AuthSession {
    /// Open the session, picking up a previously persisted user.
    pub fn open(store: Arc<dyn KeyValueStore>, provider: Arc<dyn IdentityProvider>) -> Result<Self> {
        let user = store.get::<User>(AUTH_USER_KEY)?;
        Ok(Self {
            store,
            provider,
            user,
            is_loading: false,
            error: None,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The signed-in user, or [`AppError::Unauthenticated`] naming `action`.
    pub fn require_user(&self, action: &str) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthenticated(action.to_string()))
    }

    /// Silent sign-in: adopt the provider's identity when nobody is signed in.
    ///
    /// Provider failures are logged, not surfaced.
    pub async fn restore(&mut self) -> Option<&User> {
        if self.user.is_none() {
            match self.fetch_user().await {
                Ok(Some(user)) => {
                    if let Err(err) = self.persist(user) {
                        warn!(error = %err, "failed to persist restored user");
                    }
                }
                Ok(None) => {}
                Err(err) => warn!(error = %err, "failed to check user status"),
            }
        }
        self.user.as_ref()
    }

    /// Interactive sign-in. On failure the message is kept in [`AuthSession::error`].
    pub async fn login(&mut self) -> Result<&User> {
        self.is_loading = true;
        self.error = None;

        let outcome = match self.fetch_user().await {
            Ok(Some(user)) => self.persist(user),
            Ok(None) => Err(AppError::Identity("Failed to get user information".to_string())),
            Err(err) => Err(err),
        };
        self.is_loading = false;

        match outcome {
            Ok(()) => {
                let user = self.require_user("log in")?;
                info!(login = %user.login, "signed in");
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.delete(AUTH_USER_KEY)?;
        if let Some(user) = self.user.take() {
            info!(login = %user.login, "signed out");
        }
        self.is_loading = false;
        self.error = None;
        Ok(())
    }

    async fn fetch_user(&self) -> Result<Option<User>> {
        match self.provider.current_user().await? {
            Some(identity) => Ok(Some(identity.into_user()?)),
            None => Ok(None),
        }
    }

    fn persist(&mut self, user: User) -> Result<()> {
        self.store.set(AUTH_USER_KEY, &user)?;
        self.user = Some(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AnonymousProvider, FixedIdentityProvider};
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_login_persists_user() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut session = AuthSession::open(store.clone(), Arc::new(FixedIdentityProvider::new(7, "maya"))).unwrap();

        assert!(session.user().is_none());
        let user = session.login().await.unwrap();
        assert_eq!(user.login, "maya");

        let reopened = AuthSession::open(store, Arc::new(AnonymousProvider)).unwrap();
        assert_eq!(reopened.user().unwrap().login, "maya");
    }

    #[tokio::test]
    async fn test_login_without_identity_sets_error() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut session = AuthSession::open(store, Arc::new(AnonymousProvider)).unwrap();

        assert!(session.login().await.is_err());
        assert!(session.error().unwrap().contains("Failed to get user information"));
        assert!(!session.is_loading());
        assert!(matches!(session.require_user("adopt a repository"), Err(AppError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_logout_clears_persisted_user() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut session = AuthSession::open(store.clone(), Arc::new(FixedIdentityProvider::new(1, "kai"))).unwrap();
        session.restore().await;
        assert!(session.user().is_some());

        session.logout().unwrap();
        assert!(session.user().is_none());
        assert!(store.get_raw(AUTH_USER_KEY).unwrap().is_none());
    }
}
