use serde::{Deserialize, Serialize};

/// Open Trivia DB category, by API id. `Any` omits the parameter entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizCategory {
    #[default]
    Any,
    GeneralKnowledge,
    Books,
    Film,
    Music,
    MusicalsTheatres,
    Television,
    VideoGames,
    BoardGames,
    ScienceNature,
    Computers,
    Mathematics,
    Mythology,
    Sports,
    Geography,
    History,
    Politics,
    Art,
    Celebrities,
    Animals,
    Vehicles,
    Comics,
    Gadgets,
    AnimeManga,
    CartoonAnimations,
}

impl QuizCategory {
    pub fn api_id(&self) -> Option<u32> {
        match self {
            QuizCategory::Any => None,
            QuizCategory::GeneralKnowledge => Some(9),
            QuizCategory::Books => Some(10),
            QuizCategory::Film => Some(11),
            QuizCategory::Music => Some(12),
            QuizCategory::MusicalsTheatres => Some(13),
            QuizCategory::Television => Some(14),
            QuizCategory::VideoGames => Some(15),
            QuizCategory::BoardGames => Some(16),
            QuizCategory::ScienceNature => Some(17),
            QuizCategory::Computers => Some(18),
            QuizCategory::Mathematics => Some(19),
            QuizCategory::Mythology => Some(20),
            QuizCategory::Sports => Some(21),
            QuizCategory::Geography => Some(22),
            QuizCategory::History => Some(23),
            QuizCategory::Politics => Some(24),
            QuizCategory::Art => Some(25),
            QuizCategory::Celebrities => Some(26),
            QuizCategory::Animals => Some(27),
            QuizCategory::Vehicles => Some(28),
            QuizCategory::Comics => Some(29),
            QuizCategory::Gadgets => Some(30),
            QuizCategory::AnimeManga => Some(31),
            QuizCategory::CartoonAnimations => Some(32),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizDifficulty {
    #[default]
    Any,
    Easy,
    Medium,
    Hard,
}

impl QuizDifficulty {
    /// Value for the `difficulty` query parameter; `Any` omits it.
    pub fn api_value(&self) -> Option<&'static str> {
        match self {
            QuizDifficulty::Any => None,
            QuizDifficulty::Easy => Some("easy"),
            QuizDifficulty::Medium => Some("medium"),
            QuizDifficulty::Hard => Some("hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    #[default]
    Any,
    Multiple,
    Boolean,
}

impl QuizType {
    pub fn api_value(&self) -> Option<&'static str> {
        match self {
            QuizType::Any => None,
            QuizType::Multiple => Some("multiple"),
            QuizType::Boolean => Some("boolean"),
        }
    }
}

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 50;

fn default_amount() -> u32 {
    10
}

/// Requested quiz shape. Immutable once handed to the question source.
///
/// The provider accepts between 1 and 50 questions per request; out-of-range
/// amounts are clamped before the request is built, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default)]
    pub category: QuizCategory,
    #[serde(default)]
    pub difficulty: QuizDifficulty,
    #[serde(rename = "type", default)]
    pub question_type: QuizType,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            category: QuizCategory::Any,
            difficulty: QuizDifficulty::Any,
            question_type: QuizType::Any,
        }
    }
}

impl QuizConfig {
    pub fn clamped_amount(&self) -> u32 {
        self.amount.clamp(MIN_QUESTIONS, MAX_QUESTIONS)
    }
}

/// A single trivia question as returned by the provider.
///
/// Texts are stored verbatim, HTML entities included; decoding is a
/// presentation concern and must be applied identically to the options and
/// the stored correct answer before comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub category: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub question_type: String,
}
