use crate::core::{AppError, Result, User};
use async_trait::async_trait;

/// Identity as reported by the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    /// Numeric account id, as the provider's string.
    pub id: String,
    pub login: String,
    pub avatar_url: String,
}

impl ProviderIdentity {
    /// Convert to the application's user record.
    ///
    /// # Errors
    ///
    /// [`AppError::Identity`] when the login is empty or the id is not numeric.
    pub fn into_user(self) -> Result<User> {
        if self.login.trim().is_empty() {
            return Err(AppError::Identity("provider returned an empty login".to_string()));
        }
        let id = self
            .id
            .parse::<u64>()
            .map_err(|_| AppError::Identity(format!("provider returned non-numeric id '{}'", self.id)))?;

        Ok(User {
            id,
            url: format!("https://github.com/{}", self.login),
            login: self.login,
            avatar_url: self.avatar_url,
            name: None,
            bio: None,
        })
    }
}

/// Source of the signed-in identity (a GitHub OAuth flow in a real deployment).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The provider's current user, or `None` when nobody is signed in there.
    async fn current_user(&self) -> Result<Option<ProviderIdentity>>;
}

/// Always reports the same identity.
#[derive(Debug, Clone)]
pub struct FixedIdentityProvider {
    identity: ProviderIdentity,
}

impl FixedIdentityProvider {
    pub fn new(id: u64, login: &str) -> Self {
        Self {
            identity: ProviderIdentity {
                id: id.to_string(),
                login: login.to_string(),
                avatar_url: format!("https://avatars.githubusercontent.com/u/{}", id),
            },
        }
    }

    pub fn from_identity(identity: ProviderIdentity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn current_user(&self) -> Result<Option<ProviderIdentity>> {
        Ok(Some(self.identity.clone()))
    }
}

/// Nobody is ever signed in.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousProvider;

#[async_trait]
impl IdentityProvider for AnonymousProvider {
    async fn current_user(&self) -> Result<Option<ProviderIdentity>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        let user = FixedIdentityProvider::new(42, "octo").identity.into_user().unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.url, "https://github.com/octo");
        assert_eq!(user.avatar_url, "https://avatars.githubusercontent.com/u/42");
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let identity = ProviderIdentity {
            id: "abc".to_string(),
            login: "octo".to_string(),
            avatar_url: String::new(),
        };
        assert!(matches!(identity.into_user(), Err(AppError::Identity(_))));
    }
}
