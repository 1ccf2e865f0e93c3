//! Guessing progress for a single word.
//!
//! A round starts with every position hidden and a fixed number of attempts.
//! Guesses reveal positions; the caller decides when a guess costs an attempt.

use crate::error::GameError;
use crate::questions::Question;

pub const DEFAULT_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
pub struct RoundState {
    question: Question,
    symbols: Vec<char>,
    revealed: Vec<Option<char>>,
    attempts_left: u32,
}

impl RoundState {
    pub fn new(question: Question, attempts: u32) -> Self {
        let symbols: Vec<char> = question.word.chars().collect();
        let revealed = vec![None; symbols.len()];
        Self {
            question,
            symbols,
            revealed,
            attempts_left: attempts,
        }
    }

    pub fn word(&self) -> &str {
        &self.question.word
    }

    pub fn hint(&self) -> &str {
        &self.question.hint
    }

    /// One slot per symbol of the word; `None` is still hidden.
    pub fn revealed(&self) -> &[Option<char>] {
        &self.revealed
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    /// Reveal every non-overlapping occurrence of `guess`, scanning left to
    /// right. Returns how many occurrences were found; zero leaves the round
    /// untouched.
    pub fn apply_guess(&mut self, guess: &str) -> Result<usize, GameError> {
        if guess.is_empty() {
            return Err(GameError::InvalidGuess);
        }

        let guess_len = guess.chars().count();
        let word = self.question.word.as_str();
        let mut occurrences = 0;
        let mut scanned_bytes = 0;
        let mut char_pos = 0;

        for (byte_idx, _) in word.match_indices(guess) {
            char_pos += word[scanned_bytes..byte_idx].chars().count();
            for slot in char_pos..char_pos + guess_len {
                self.revealed[slot] = Some(self.symbols[slot]);
            }
            char_pos += guess_len;
            scanned_bytes = byte_idx + guess.len();
            occurrences += 1;
        }
        Ok(occurrences)
    }

    #[must_use]
    pub fn is_too_long(&self, guess: &str) -> bool {
        guess.chars().count() > self.symbols.len()
    }

    #[must_use]
    pub fn contains_guess(&self, guess: &str) -> bool {
        self.question.word.contains(guess)
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.revealed.iter().all(Option::is_some)
    }

    pub fn decrement_attempts(&mut self) -> u32 {
        self.attempts_left = self.attempts_left.saturating_sub(1);
        self.attempts_left
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.attempts_left == 0
    }
}
