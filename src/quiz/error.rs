use thiserror::Error;

use super::session::Step;

/// The built-in content is broken. There is no degraded mode for this:
/// a quiz with a missing profile or a short question cannot produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no questions")]
    NoQuestions,

    #[error("question {question_id} has {count} answers, expected {expected}")]
    WrongAnswerCount {
        question_id: u32,
        count: usize,
        expected: usize,
    },

    #[error("question id {0} appears more than once")]
    DuplicateQuestion(u32),

    #[error("answer {answer} of question {question_id} scores nothing on either axis")]
    EmptyScores { question_id: u32, answer: usize },

    #[error("personality type '{0}' appears more than once")]
    DuplicatePersonality(String),

    #[error("personality type '{0}' is missing from the catalog")]
    MissingPersonality(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The caller asked for a transition the current step does not allow.
    #[error("cannot {action} while the quiz is at step {step}")]
    InvalidTransition { action: &'static str, step: Step },

    #[error("answer index {index} is out of range, {len} answers are displayed")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
