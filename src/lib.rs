pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::services::session::SessionService;
use crate::services::stats::StatsService;
use crate::services::store::AttemptStore;
use crate::services::trivia::QuestionSource;

/// Shared application state. Both gateways are injected as trait objects so
/// tests can substitute in-memory fakes for the trivia provider and the
/// attempt store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AttemptStore>,
    pub sessions: Arc<SessionService>,
    pub stats: StatsService,
}

impl AppState {
    pub fn new(source: Arc<dyn QuestionSource>, store: Arc<dyn AttemptStore>) -> Self {
        let sessions = Arc::new(SessionService::new(source, store.clone()));
        let stats = StatsService::new(store.clone());
        Self {
            store,
            sessions,
            stats,
        }
    }
}
