pub mod aggregator;
pub mod board;

pub use aggregator::{
    ADOPTION_POINTS, REVIVAL_POINTS, compute_leaderboard, compute_leaderboard_with, score,
};
pub use board::Leaderboard;
