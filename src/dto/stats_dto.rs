use serde::{Deserialize, Serialize};

use crate::models::attempt::AttemptRecord;
use crate::models::stats::{LeaderboardEntry, RankKey, UserStatistics};

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub statistics: UserStatistics,
    /// Most recent attempts, newest first.
    pub recent_attempts: Vec<AttemptRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub sort: RankKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub sort: RankKey,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MyRankResponse {
    pub sort: RankKey,
    pub rank: u32,
    pub total_users: usize,
}
