use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::core::{AppError, Result};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "REVIVEBOARD_DATA_DIR";
pub const ENV_LOGIN: &str = "REVIVEBOARD_LOGIN";
pub const ENV_USER_ID: &str = "REVIVEBOARD_USER_ID";
pub const ENV_PAGE_SIZE: &str = "REVIVEBOARD_PAGE_SIZE";

/// Identity the built-in provider signs in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub id: u64,
    pub login: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory for persisted state; `None` keeps everything in memory
    pub data_dir: Option<PathBuf>,

    /// Catalog page size
    pub page_size: usize,

    /// Identity returned by the login provider; `None` means nobody can sign in
    pub identity: Option<IdentityConfig>,

    /// Location the router starts from
    pub initial_path: String,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            data_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            identity: Some(IdentityConfig {
                id: 1,
                login: "revive-dev".to_string(),
            }),
            initial_path: "/".to_string(),
        }
    }

    /// Persist state under `dir`
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Keep state in memory only
    pub fn in_memory(mut self) -> Self {
        self.data_dir = None;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sign in as `login`
    pub fn identity(mut self, id: u64, login: &str) -> Self {
        self.identity = Some(IdentityConfig {
            id,
            login: login.to_string(),
        });
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.identity = None;
        self
    }

    pub fn initial_path(mut self, path: &str) -> Self {
        self.initial_path = path.to_string();
        self
    }

    /// Defaults overridden by `REVIVEBOARD_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|dir| !dir.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.page_size = raw
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| AppError::InvalidInput(format!("invalid {}='{}'", ENV_PAGE_SIZE, raw)))?;
        }

        if let Some(login) = lookup(ENV_LOGIN) {
            config.identity = if login.is_empty() {
                None
            } else {
                let id = match lookup(ENV_USER_ID) {
                    Some(raw) => raw
                        .parse::<u64>()
                        .map_err(|_| AppError::InvalidInput(format!("invalid {}='{}'", ENV_USER_ID, raw)))?,
                    None => 1,
                };
                Some(IdentityConfig { id, login })
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AppError::InvalidInput("page size must be positive".to_string()));
        }
        if let Some(identity) = &self.identity {
            if identity.login.trim().is_empty() {
                return Err(AppError::InvalidInput("login must not be blank".to_string()));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
