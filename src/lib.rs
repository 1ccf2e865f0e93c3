// Library interface for hangman
// This allows integration tests to access internal modules

pub mod art;
pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod pool;
pub mod questions;
pub mod round;
pub mod tui;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use game_state::{
    Ending, GameInterface, InputSource, Presenter, RoundView, Session, SessionState,
    SessionSummary, Turn, TurnOutcome, game_loop,
};
pub use pool::QuestionPool;
pub use questions::{
    Question, load_questions, load_questions_from_file, load_questions_from_str, normalize,
};
pub use round::{DEFAULT_ATTEMPTS, RoundState};
