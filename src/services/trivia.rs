use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::question::{Question, QuizConfig};

/// Batch question provider. Injected into the session layer so tests can
/// substitute a fake; never reached through a global handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetches one batch for the given configuration. An empty batch is a
    /// valid result; the caller decides how to surface it.
    async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>>;
}

/// Open Trivia DB response envelope.
///
/// `response_code` 0 is success and 1 means the database has too few
/// questions for the requested configuration, which we pass through as an
/// empty batch. Anything else is a provider-side failure.
#[derive(Debug, Deserialize)]
struct OpenTdbResponse {
    response_code: i32,
    #[serde(default)]
    results: Vec<Question>,
}

const NO_RESULTS: i32 = 1;

#[derive(Clone)]
pub struct OpenTdbClient {
    client: Client,
    base_url: String,
}

impl OpenTdbClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the request URL. The amount is clamped to the provider's
    /// accepted range here, before the request goes out; `Any` selections
    /// omit their parameter entirely.
    fn request_url(&self, config: &QuizConfig) -> String {
        let mut url = format!("{}/api.php?amount={}", self.base_url, config.clamped_amount());
        if let Some(id) = config.category.api_id() {
            url.push_str(&format!("&category={}", id));
        }
        if let Some(difficulty) = config.difficulty.api_value() {
            url.push_str(&format!("&difficulty={}", difficulty));
        }
        if let Some(kind) = config.question_type.api_value() {
            url.push_str(&format!("&type={}", kind));
        }
        url
    }
}

#[async_trait]
impl QuestionSource for OpenTdbClient {
    async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>> {
        let url = self.request_url(config);
        tracing::debug!("Fetching trivia batch: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::FetchFailure(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailure(format!(
                "provider answered with status {}",
                status
            )));
        }

        let body: OpenTdbResponse = response
            .json()
            .await
            .map_err(|e| Error::FetchFailure(format!("malformed response: {}", e)))?;

        match body.response_code {
            0 => Ok(body.results),
            NO_RESULTS => Ok(Vec::new()),
            code => Err(Error::FetchFailure(format!(
                "provider response code {}",
                code
            ))),
        }
    }
}
