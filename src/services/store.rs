use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::attempt::AttemptRecord;
use crate::models::user::{User, UserSummary};

/// Persistence gateway. The core only consumes this read/write contract;
/// the backing store is injected so tests can swap in an in-memory fake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Appends one finalized attempt to the owning user's history.
    async fn record_attempt(&self, record: &AttemptRecord) -> Result<()>;

    /// A user's attempt history, newest first.
    async fn attempts_for_user(&self, user_id: Uuid) -> Result<Vec<AttemptRecord>>;

    /// All users, ordered by id ascending. The ordering is part of the
    /// contract: leaderboard tie-breaks rely on it being deterministic.
    async fn list_users(&self) -> Result<Vec<UserSummary>>;
}

#[derive(Clone)]
pub struct PgAttemptStore {
    pool: PgPool,
}

impl PgAttemptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptStore for PgAttemptStore {
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false)
            {
                Error::Conflict(format!("An account with email '{}' already exists", email))
            } else {
                Error::from(e)
            }
        })?;

        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn record_attempt(&self, record: &AttemptRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO quiz_attempts (user_id, score, total_questions, category, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.user_id)
        .bind(record.score)
        .bind(record.total_questions)
        .bind(&record.category)
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn attempts_for_user(&self, user_id: Uuid) -> Result<Vec<AttemptRecord>> {
        let records = sqlx::query_as::<_, AttemptRecord>(
            r#"
            SELECT user_id, score, total_questions, category, recorded_at
            FROM quiz_attempts
            WHERE user_id = $1
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let users =
            sqlx::query_as::<_, UserSummary>(r#"SELECT id, name, email FROM users ORDER BY id"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }
}
