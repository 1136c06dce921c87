use crate::core::User;
use std::collections::HashMap;
use std::sync::RwLock;

/// Display identities for bare handles.
pub trait IdentityDirectory: Send + Sync {
    /// Richer identity for `login`, when known.
    fn lookup(&self, login: &str) -> Option<User>;

    /// Stand-in used when `lookup` has nothing.
    fn placeholder(&self, login: &str) -> User {
        User::placeholder(login)
    }
}

/// Knows nobody; every handle gets a placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderDirectory;

impl IdentityDirectory for PlaceholderDirectory {
    fn lookup(&self, _login: &str) -> Option<User> {
        None
    }
}

/// Users seen by this client, e.g. everyone who signed in.
#[derive(Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `user.login`.
    pub fn remember(&self, user: User) {
        // A poisoned map only loses avatars; placeholders still work.
        if let Ok(mut users) = self.users.write() {
            users.insert(user.login.clone(), user);
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdentityDirectory for UserDirectory {
    fn lookup(&self, login: &str) -> Option<User> {
        self.users.read().ok()?.get(login).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remembered_users_are_found() {
        let directory = UserDirectory::new();
        assert!(directory.lookup("octocat").is_none());

        let mut user = User::placeholder("octocat");
        user.id = 583231;
        directory.remember(user.clone());

        assert_eq!(directory.lookup("octocat"), Some(user));
        assert!(directory.lookup("Octocat").is_none());
        assert_eq!(directory.len(), 1);
    }
}
