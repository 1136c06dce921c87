// ============================================================================
// reviveboard Library
// ============================================================================

pub mod auth;
pub mod catalog;
pub mod config;
pub mod core;
pub mod format;
pub mod hub;
pub mod leaderboard;
pub mod router;
pub mod seed;
pub mod storage;
pub mod suggest;

// Re-export main types for convenience
pub use config::AppConfig;
pub use crate::core::{
    AdoptedRepository, AdoptionStatus, AppError, LeaderboardEntry, Repository, Result, User,
};
pub use hub::ReviveHub;
pub use leaderboard::{Leaderboard, compute_leaderboard};
pub use router::{LinkActivation, MemoryHistory, NavigationRouter, ViewId};
