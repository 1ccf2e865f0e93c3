use crate::debug_log;
use crate::error::GameError;
use crate::questions::Question;
use rand::Rng;

/// Questions not yet played, drawn uniformly at random without replacement.
///
/// The random source is injected so callers can seed it (or mock it) and get
/// a reproducible draw order.
#[derive(Debug)]
pub struct QuestionPool<R> {
    questions: Vec<Question>,
    rng: R,
}

impl<R: Rng> QuestionPool<R> {
    pub fn new(questions: Vec<Question>, rng: R) -> Self {
        Self { questions, rng }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.questions.is_empty()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len()
    }

    pub fn draw_next(&mut self) -> Result<Question, GameError> {
        if !self.has_next() {
            return Err(GameError::EmptyPool);
        }
        let idx = self.rng.gen_range(0..self.questions.len());
        let question = self.questions.remove(idx);
        debug_log!(
            "Drew question {} of {}, {} left",
            idx,
            self.questions.len() + 1,
            self.questions.len()
        );
        Ok(question)
    }
}
