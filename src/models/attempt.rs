use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One finished quiz, reduced to its outcome. Created exactly once when a
/// session is finalized and appended to the owning user's history; never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttemptRecord {
    pub user_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub category: String,
    pub recorded_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Percentage of correct answers for this single attempt.
    pub fn percentage(&self) -> f64 {
        if self.total_questions <= 0 {
            return 0.0;
        }
        self.score as f64 / self.total_questions as f64 * 100.0
    }
}
