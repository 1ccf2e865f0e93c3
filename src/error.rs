use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A draw was requested after the pool ran dry. The session checks
    /// `has_next` first, so seeing this means that check was skipped.
    #[error("no questions left in the pool")]
    EmptyPool,
    #[error("session is already complete")]
    SessionComplete,
    #[error("attempts per round must be at least 1")]
    NoAttempts,
    #[error("guess must not be empty")]
    InvalidGuess,
    #[error("question set is empty")]
    NoQuestions,
    #[error("question with hint {hint:?} has an empty word")]
    EmptyWord { hint: String },
    #[error("failed to read questions: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed question data: {0}")]
    Json(#[from] serde_json::Error),
}
