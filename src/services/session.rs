use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::dto::quiz_dto::{
    AdvanceResponse, CurrentQuestionResponse, FinalizeResponse, SessionStatusResponse,
    StartQuizResponse, SubmitAnswerResponse,
};
use crate::error::{Error, Result};
use crate::models::attempt::AttemptRecord;
use crate::models::question::{Question, QuizConfig};
use crate::services::store::AttemptStore;
use crate::services::trivia::QuestionSource;

/// Fallback attempt category for the degenerate case of a batch whose first
/// question carries no category (the provider always sets one in practice).
const DEFAULT_CATEGORY: &str = "General Knowledge";

/// In-memory state of one quiz run over a fixed question batch.
///
/// The current index stays within `0..questions.len()` at all times;
/// completion is the last index plus a recorded answer, and finalization is
/// a separate one-way flag. Unanswered questions are `None`, never an empty
/// string, so a legitimately empty answer text can't be mistaken for
/// "unanswered". The score is always recomputed from (questions, answers) and
/// can't drift.
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<String>>,
    finalized: bool,
}

impl QuizSession {
    /// Callers must not pass an empty batch; the service layer maps that to
    /// `Error::EmptyBatch` before a session is ever constructed.
    pub fn new(questions: Vec<Question>) -> Self {
        debug_assert!(!questions.is_empty());
        let answers = vec![None; questions.len()];
        Self {
            questions,
            current: 0,
            answers,
            finalized: false,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn answer_at(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(|a| a.as_deref())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Count of indices whose recorded answer matches the canonical correct
    /// answer text exactly. Case-sensitive, no trimming, no entity decoding.
    pub fn score(&self) -> i32 {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| answer.as_deref() == Some(question.correct_answer.as_str()))
            .count() as i32
    }

    /// Records `answer` for the current question, overwriting any earlier
    /// choice for the same index.
    pub fn submit_answer(&mut self, answer: String) -> Result<SubmitAnswerResponse> {
        if self.finalized {
            return Err(Error::SessionState(
                "This quiz has already been finalized".to_string(),
            ));
        }
        let question = &self.questions[self.current];
        let correct = answer == question.correct_answer;
        let correct_answer = question.correct_answer.clone();
        self.answers[self.current] = Some(answer);

        Ok(SubmitAnswerResponse {
            index: self.current,
            correct,
            correct_answer,
            score: self.score(),
        })
    }

    /// Moves to the next question. Requires the current question to be
    /// answered; a call at the last index is a no-op. Earlier answers are
    /// kept for review.
    pub fn advance(&mut self) -> Result<usize> {
        if self.answers[self.current].is_none() {
            return Err(Error::SessionState(
                "Answer the current question before advancing".to_string(),
            ));
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
        Ok(self.current)
    }

    pub fn is_complete(&self) -> bool {
        self.current == self.questions.len() - 1 && self.answers[self.current].is_some()
    }

    /// Produces the immutable attempt record, at most once per session.
    pub fn finalize(&mut self, user_id: Uuid) -> Result<AttemptRecord> {
        if self.finalized {
            return Err(Error::SessionState(
                "This quiz has already been finalized".to_string(),
            ));
        }
        if !self.is_complete() {
            return Err(Error::SessionState(
                "The quiz is not complete yet".to_string(),
            ));
        }
        self.finalized = true;

        let category = self
            .questions
            .first()
            .map(|q| q.category.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(AttemptRecord {
            user_id,
            score: self.score(),
            total_questions: self.questions.len() as i32,
            category,
            recorded_at: Utc::now(),
        })
    }
}

#[derive(Default)]
struct Slot {
    /// Bumped on every start/reset; a fetch finishing under an older value
    /// is stale and gets dropped instead of clobbering the newer session.
    generation: u64,
    session: Option<QuizSession>,
}

/// Owns one session slot per user. Every in-memory transition happens under
/// the mutex, so a concurrent reader never observes a torn combination of
/// index, answers and score; the lock is never held across an await.
pub struct SessionService {
    source: Arc<dyn QuestionSource>,
    store: Arc<dyn AttemptStore>,
    sessions: Mutex<HashMap<Uuid, Slot>>,
}

impl SessionService {
    pub fn new(source: Arc<dyn QuestionSource>, store: Arc<dyn AttemptStore>) -> Self {
        Self {
            source,
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Slot>>> {
        self.sessions
            .lock()
            .map_err(|_| Error::Internal("Session table lock poisoned".to_string()))
    }

    fn with_session<T>(
        &self,
        user_id: Uuid,
        f: impl FnOnce(&mut QuizSession) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&user_id)
            .and_then(|slot| slot.session.as_mut())
            .ok_or_else(|| Error::SessionState("No active quiz session".to_string()))?;
        f(session)
    }

    /// Fetches a batch for `config` and installs a fresh session. Any
    /// session the user had is discarded up front, so a failed fetch leaves
    /// the user with no active session rather than a half-stale one.
    pub async fn start(&self, user_id: Uuid, config: QuizConfig) -> Result<StartQuizResponse> {
        let generation = {
            let mut sessions = self.lock()?;
            let slot = sessions.entry(user_id).or_default();
            slot.generation = slot.generation.wrapping_add(1);
            slot.session = None;
            slot.generation
        };

        let questions = self.source.fetch(&config).await?;

        let mut sessions = self.lock()?;
        let slot = sessions.entry(user_id).or_default();
        if slot.generation != generation {
            tracing::debug!(user_id = %user_id, "Discarding stale question batch");
            return Err(Error::SessionState(
                "The quiz was restarted while questions were loading".to_string(),
            ));
        }
        if questions.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let total_questions = questions.len();
        tracing::info!(user_id = %user_id, total_questions, "Quiz session started");
        slot.session = Some(QuizSession::new(questions));

        Ok(StartQuizResponse {
            total_questions,
            current_index: 0,
            score: 0,
        })
    }

    /// Discards the user's session, if any. Also invalidates any fetch that
    /// is still in flight for this user.
    pub fn reset(&self, user_id: Uuid) -> Result<()> {
        let mut sessions = self.lock()?;
        let slot = sessions.entry(user_id).or_default();
        slot.generation = slot.generation.wrapping_add(1);
        slot.session = None;
        Ok(())
    }

    /// View of the current question with options shuffled for display.
    /// Shuffling never touches the stored correct answer: scoring always
    /// compares against the canonical text. Once the question has been
    /// answered the correct answer is revealed for feedback.
    pub fn current(&self, user_id: Uuid) -> Result<CurrentQuestionResponse> {
        self.with_session(user_id, |session| {
            let index = session.current_index();
            let question = session.current_question();

            let mut options: Vec<String> = question.incorrect_answers.clone();
            options.push(question.correct_answer.clone());
            options.shuffle(&mut rand::thread_rng());

            let selected = session.answer_at(index).map(str::to_string);
            let correct_answer = selected
                .is_some()
                .then(|| question.correct_answer.clone());

            Ok(CurrentQuestionResponse {
                index,
                total_questions: session.len(),
                question: question.question.clone(),
                category: question.category.clone(),
                difficulty: question.difficulty.clone(),
                question_type: question.question_type.clone(),
                options,
                selected_answer: selected,
                correct_answer,
                is_last: index == session.len() - 1,
            })
        })
    }

    pub fn submit_answer(&self, user_id: Uuid, answer: String) -> Result<SubmitAnswerResponse> {
        self.with_session(user_id, |session| session.submit_answer(answer))
    }

    pub fn advance(&self, user_id: Uuid) -> Result<AdvanceResponse> {
        self.with_session(user_id, |session| {
            let current_index = session.advance()?;
            Ok(AdvanceResponse {
                current_index,
                complete: session.is_complete(),
            })
        })
    }

    pub fn status(&self, user_id: Uuid) -> Result<SessionStatusResponse> {
        let mut sessions = self.lock()?;
        let status = match sessions.get_mut(&user_id).and_then(|s| s.session.as_ref()) {
            Some(session) => SessionStatusResponse {
                active: true,
                current_index: Some(session.current_index()),
                total_questions: session.len(),
                answered: session.answered_count(),
                score: session.score(),
                complete: session.is_complete(),
                finalized: session.is_finalized(),
            },
            None => SessionStatusResponse {
                active: false,
                current_index: None,
                total_questions: 0,
                answered: 0,
                score: 0,
                complete: false,
                finalized: false,
            },
        };
        Ok(status)
    }

    /// Seals the session into an attempt record and hands it to the
    /// persistence gateway. The record is final locally the moment the
    /// session is sealed; a failed write is reported as `persisted: false`
    /// and logged, never rolled back.
    pub async fn finalize(&self, user_id: Uuid) -> Result<FinalizeResponse> {
        let record = self.with_session(user_id, |session| session.finalize(user_id))?;

        let persisted = match self.store.record_attempt(&record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Failed to persist attempt record; the quiz outcome remains final locally"
                );
                false
            }
        };

        Ok(FinalizeResponse {
            score: record.score,
            total_questions: record.total_questions,
            percentage: record.percentage(),
            category: record.category,
            persisted,
        })
    }
}
