use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::attempt::AttemptRecord;
use crate::models::stats::{LeaderboardEntry, RankKey, UserStatistics};
use crate::models::user::UserSummary;
use crate::services::store::AttemptStore;

/// Per-user statistics over an attempt history. Input order is irrelevant.
///
/// The average is the ratio of sums (total correct over total possible),
/// applied uniformly here and on the leaderboard. An empty history is all
/// zeros; there is no division by zero.
pub fn user_statistics(records: &[AttemptRecord]) -> UserStatistics {
    if records.is_empty() {
        return UserStatistics::zero();
    }

    let total_correct: i64 = records.iter().map(|r| r.score as i64).sum();
    let total_possible: i64 = records.iter().map(|r| r.total_questions as i64).sum();
    let average_percentage = if total_possible > 0 {
        total_correct as f64 / total_possible as f64 * 100.0
    } else {
        0.0
    };

    UserStatistics {
        total_attempts: records.len(),
        average_percentage,
        best_score: records.iter().map(|r| r.score).max().unwrap_or(0),
    }
}

/// Folds every user's history into ranked leaderboard rows.
///
/// Users with no attempts are included with zero stats. The sort is stable
/// and descending on the chosen key, so ties keep the deterministic input
/// order (user id ascending from the store); ranks are the 1-based position
/// in the sorted order.
pub fn leaderboard(
    histories: &[(UserSummary, Vec<AttemptRecord>)],
    key: RankKey,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = histories
        .iter()
        .map(|(user, records)| {
            let stats = user_statistics(records);
            LeaderboardEntry {
                rank: 0,
                user_id: user.id,
                name: user.name.clone(),
                total_quizzes: stats.total_attempts,
                total_score: records.iter().map(|r| r.score as i64).sum(),
                average_percentage: stats.average_percentage,
                best_score: stats.best_score,
            }
        })
        .collect();

    match key {
        RankKey::Total => entries.sort_by(|a, b| b.total_score.cmp(&a.total_score)),
        RankKey::Average => {
            entries.sort_by(|a, b| b.average_percentage.total_cmp(&a.average_percentage))
        }
        RankKey::Best => entries.sort_by(|a, b| b.best_score.cmp(&a.best_score)),
    }

    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }
    entries
}

/// Read-side aggregation over the persistence gateway.
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn AttemptStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn AttemptStore>) -> Self {
        Self { store }
    }

    /// A user's statistics plus their most recent attempts, newest first.
    pub async fn profile(
        &self,
        user_id: Uuid,
        recent_limit: usize,
    ) -> Result<(UserStatistics, Vec<AttemptRecord>)> {
        let records = self.store.attempts_for_user(user_id).await?;
        let stats = user_statistics(&records);
        let recent = records.into_iter().take(recent_limit).collect();
        Ok((stats, recent))
    }

    /// Full leaderboard for the given ranking key.
    ///
    /// A user whose history cannot be loaded is kept with zero stats rather
    /// than failing the whole board; one bad history never hides everyone
    /// else's.
    pub async fn leaderboard(&self, key: RankKey) -> Result<Vec<LeaderboardEntry>> {
        let users = self.store.list_users().await?;

        let mut histories = Vec::with_capacity(users.len());
        for user in users {
            let records = match self.store.attempts_for_user(user.id).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(
                        user_id = %user.id,
                        error = %e,
                        "Skipping unreadable attempt history for leaderboard"
                    );
                    Vec::new()
                }
            };
            histories.push((user, records));
        }

        Ok(leaderboard(&histories, key))
    }

    /// The requesting user's rank, computed from the same sort and
    /// tie-break as the full leaderboard.
    pub async fn rank_of(&self, user_id: Uuid, key: RankKey) -> Result<(u32, usize)> {
        let board = self.leaderboard(key).await?;
        let total_users = board.len();
        let rank = board
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.rank)
            .ok_or_else(|| Error::NotFound("User not on the leaderboard".to_string()))?;
        Ok((rank, total_users))
    }
}
