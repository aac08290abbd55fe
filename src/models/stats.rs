use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived per-user statistics, recomputed from the attempt history at read
/// time. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub total_attempts: usize,
    /// Ratio-of-sums: total correct over total possible, as a percentage.
    pub average_percentage: f64,
    pub best_score: i32,
}

impl UserStatistics {
    pub fn zero() -> Self {
        Self {
            total_attempts: 0,
            average_percentage: 0.0,
            best_score: 0,
        }
    }
}

/// One leaderboard row. Users with no attempts appear with zero stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub name: String,
    pub total_quizzes: usize,
    pub total_score: i64,
    pub average_percentage: f64,
    pub best_score: i32,
}

/// Key the leaderboard is ranked by, always descending. Ties keep the
/// deterministic input order (user id ascending from the store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankKey {
    #[default]
    #[serde(alias = "total_score")]
    Total,
    Average,
    Best,
}
