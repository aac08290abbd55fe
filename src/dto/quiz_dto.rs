use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartQuizResponse {
    pub total_questions: usize,
    pub current_index: usize,
    pub score: i32,
}

/// The question currently in front of the user. Options come pre-shuffled
/// for display; the correct answer is only present once the question has
/// been answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentQuestionResponse {
    pub index: usize,
    pub total_questions: usize,
    pub question: String,
    pub category: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub is_last: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub index: usize,
    pub correct: bool,
    pub correct_answer: String,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceResponse {
    pub current_index: usize,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub active: bool,
    pub current_index: Option<usize>,
    pub total_questions: usize,
    pub answered: usize,
    pub score: i32,
    pub complete: bool,
    pub finalized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeResponse {
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub category: String,
    /// False when the gateway write failed; the outcome above is final
    /// regardless.
    pub persisted: bool,
}
