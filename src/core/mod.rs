pub mod error;
pub mod types;

pub use error::{AppError, Result};
pub use types::{
    AdoptedRepository, AdoptionStatus, LeaderboardEntry, Owner, Repository, Staleness, User,
};
