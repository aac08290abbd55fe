use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use brainquest_backend::error::{Error, Result};
use brainquest_backend::models::attempt::AttemptRecord;
use brainquest_backend::models::question::{Question, QuizConfig};
use brainquest_backend::models::user::{User, UserSummary};
use brainquest_backend::services::store::AttemptStore;
use brainquest_backend::services::trivia::QuestionSource;
use brainquest_backend::{routes, AppState};

static INIT: Once = Once::new();

pub fn init_test_config() {
    INIT.call_once(|| {
        std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        std::env::set_var("DATABASE_URL", "postgres://unused/test");
        std::env::set_var("JWT_SECRET", "test_secret_key");
    });
    let _ = brainquest_backend::config::init_config();
}

/// In-memory stand-in for the Postgres-backed gateway.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    attempts: Mutex<Vec<AttemptRecord>>,
}

impl MemoryStore {
    pub fn seed_attempt(&self, user_id: Uuid, score: i32, total: i32, category: &str) {
        self.attempts.lock().unwrap().push(AttemptRecord {
            user_id,
            score,
            total_questions: total,
            category: category.to_string(),
            recorded_at: Utc::now(),
        });
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(Error::Conflict(format!(
                "An account with email '{}' already exists",
                email
            )));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn record_attempt(&self, record: &AttemptRecord) -> Result<()> {
        self.attempts.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn attempts_for_user(&self, user_id: Uuid) -> Result<Vec<AttemptRecord>> {
        let mut records: Vec<AttemptRecord> = self
            .attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let users = self.users.lock().unwrap();
        let mut summaries: Vec<UserSummary> = users
            .values()
            .map(|u| UserSummary {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .collect();
        summaries.sort_by_key(|u| u.id);
        Ok(summaries)
    }
}

/// Question source serving a fixed batch.
pub struct FixedSource {
    pub questions: Vec<Question>,
}

#[async_trait]
impl QuestionSource for FixedSource {
    async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>> {
        let amount = config.clamped_amount() as usize;
        Ok(self.questions.iter().take(amount).cloned().collect())
    }
}

pub fn question(prompt: &str, correct: &str, incorrect: &[&str]) -> Question {
    Question {
        question: prompt.to_string(),
        correct_answer: correct.to_string(),
        incorrect_answers: incorrect.iter().map(|s| s.to_string()).collect(),
        category: "Geography".to_string(),
        difficulty: "easy".to_string(),
        question_type: "multiple".to_string(),
    }
}

pub fn capitals_batch() -> Vec<Question> {
    vec![
        question("Capital of France?", "Paris", &["Lyon", "Nice", "Lille"]),
        question("Capital of Italy?", "Rome", &["Milan", "Turin", "Naples"]),
        question("Capital of Spain?", "Madrid", &["Seville", "Bilbao", "Valencia"]),
    ]
}

pub fn test_app(questions: Vec<Question>) -> (Router, Arc<MemoryStore>) {
    init_test_config();
    let store = Arc::new(MemoryStore::default());
    let source = Arc::new(FixedSource { questions });
    let state = AppState::new(source, store.clone());
    (routes::create_router(state, 10_000), store)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

/// Registers a user and returns (token, user_id).
pub async fn signup(app: &Router, name: &str, email: &str) -> (String, Uuid) {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "correct-horse-battery"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = Uuid::parse_str(body["user_id"].as_str().unwrap()).unwrap();
    (token, user_id)
}
