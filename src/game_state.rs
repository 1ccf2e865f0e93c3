//! Session controller: sequences rounds, applies guesses and decides when the
//! session is over. The front ends plug in through [`InputSource`] and
//! [`Presenter`].

use crate::error::GameError;
use crate::pool::QuestionPool;
use crate::round::RoundState;
use crate::{debug_log, info_log};
use rand::Rng;

/// Supplies normalized guesses (whitespace removed, lowercased).
pub trait InputSource {
    /// `Some("")` is a blank guess. `None` means the player quit or input
    /// closed; the session stops between turns.
    fn request_guess(&mut self) -> Option<String>;
}

/// Receives semantic game events. Nothing here feeds back into the session.
pub trait Presenter {
    fn show_round(&mut self, round: &RoundView);
    fn pool_remaining(&mut self, count: usize);
    fn blank_input(&mut self);
    fn miss(&mut self, guess: &str);
    fn hit(&mut self, guess: &str);
    fn solved(&mut self, word: &str);
    fn exhausted(&mut self, word: &str);
    fn session_end(&mut self, summary: &SessionSummary);
}

pub trait GameInterface: InputSource + Presenter {}

impl<T: InputSource + Presenter> GameInterface for T {}

/// Read-only snapshot of the active round for presenters.
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    pub hint: &'a str,
    pub revealed: &'a [Option<char>],
    pub attempts_left: u32,
    pub max_attempts: u32,
    pub round_number: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub rounds_played: usize,
    pub rounds_solved: usize,
    pub questions_left: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Blank,
    Miss(String),
    Hit(String),
    Solved(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ending {
    /// Attempts ran out; carries the word that was not found.
    Exhausted { word: String },
    /// The last question in the pool was solved.
    PoolDrained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingGuess,
    /// The previous word was solved and a fresh round has been drawn.
    NextRound,
    Complete(Ending),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub outcome: TurnOutcome,
    pub state: SessionState,
}

#[derive(Debug)]
pub struct Session<R> {
    pool: QuestionPool<R>,
    round: RoundState,
    max_attempts: u32,
    rounds_played: usize,
    rounds_solved: usize,
    ending: Option<Ending>,
}

impl<R: Rng> Session<R> {
    pub fn new(mut pool: QuestionPool<R>, max_attempts: u32) -> Result<Self, GameError> {
        if max_attempts == 0 {
            return Err(GameError::NoAttempts);
        }
        if !pool.has_next() {
            return Err(GameError::NoQuestions);
        }
        let round = RoundState::new(pool.draw_next()?, max_attempts);
        info_log!(
            "Session started: {} attempts per round, {} questions",
            max_attempts,
            pool.remaining() + 1
        );
        Ok(Self {
            pool,
            round,
            max_attempts,
            rounds_played: 1,
            rounds_solved: 0,
            ending: None,
        })
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn remaining(&self) -> usize {
        self.pool.remaining()
    }

    pub fn is_complete(&self) -> bool {
        self.ending.is_some()
    }

    /// How the session ended, once it has.
    pub fn ending(&self) -> Option<&Ending> {
        self.ending.as_ref()
    }

    pub fn view(&self) -> RoundView<'_> {
        RoundView {
            hint: self.round.hint(),
            revealed: self.round.revealed(),
            attempts_left: self.round.attempts_left(),
            max_attempts: self.max_attempts,
            round_number: self.rounds_played,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            rounds_played: self.rounds_played,
            rounds_solved: self.rounds_solved,
            questions_left: self.pool.remaining(),
        }
    }

    /// Apply one normalized guess to the active round.
    ///
    /// Blank guesses, guesses longer than the word and guesses that are not a
    /// substring of the word cost an attempt. A substring that does not
    /// finish the word is free. A completed session accepts no more turns.
    pub fn take_turn(&mut self, guess: &str) -> Result<Turn, GameError> {
        if self.is_complete() {
            return Err(GameError::SessionComplete);
        }

        if guess.is_empty() {
            debug_log!("take_turn() - blank guess");
            let state = self.register_miss();
            return Ok(Turn {
                outcome: TurnOutcome::Blank,
                state,
            });
        }

        self.round.apply_guess(guess)?;
        debug_log!("take_turn() - applied '{}'", guess);

        if self.round.is_solved() {
            let word = self.round.word().to_string();
            self.rounds_solved += 1;
            let state = self.advance_after_solve()?;
            return Ok(Turn {
                outcome: TurnOutcome::Solved(word),
                state,
            });
        }

        if self.round.is_too_long(guess) || !self.round.contains_guess(guess) {
            let state = self.register_miss();
            return Ok(Turn {
                outcome: TurnOutcome::Miss(guess.to_string()),
                state,
            });
        }

        Ok(Turn {
            outcome: TurnOutcome::Hit(guess.to_string()),
            state: SessionState::AwaitingGuess,
        })
    }

    fn register_miss(&mut self) -> SessionState {
        self.round.decrement_attempts();
        debug_log!("register_miss() - {} attempts left", self.round.attempts_left());
        if self.round.is_exhausted() {
            info_log!("Round exhausted on '{}'", self.round.word());
            let ending = Ending::Exhausted {
                word: self.round.word().to_string(),
            };
            self.ending = Some(ending.clone());
            SessionState::Complete(ending)
        } else {
            SessionState::AwaitingGuess
        }
    }

    fn advance_after_solve(&mut self) -> Result<SessionState, GameError> {
        if !self.pool.has_next() {
            info_log!("Pool drained after {} rounds", self.rounds_played);
            self.ending = Some(Ending::PoolDrained);
            return Ok(SessionState::Complete(Ending::PoolDrained));
        }
        self.round = RoundState::new(self.pool.draw_next()?, self.max_attempts);
        self.rounds_played += 1;
        Ok(SessionState::NextRound)
    }
}

/// Drive a session to completion (or until the player quits) against a
/// front end. Returns the final summary.
pub fn game_loop<R: Rng, U: GameInterface + ?Sized>(
    session: &mut Session<R>,
    ui: &mut U,
) -> Result<SessionSummary, GameError> {
    while !session.is_complete() {
        ui.show_round(&session.view());

        let Some(guess) = ui.request_guess() else {
            info_log!("game_loop() - input closed, ending session");
            break;
        };

        let turn = session.take_turn(&guess)?;
        match &turn.outcome {
            TurnOutcome::Blank => ui.blank_input(),
            TurnOutcome::Miss(guess) => ui.miss(guess),
            TurnOutcome::Hit(guess) => ui.hit(guess),
            TurnOutcome::Solved(word) => ui.solved(word),
        }

        match &turn.state {
            SessionState::AwaitingGuess | SessionState::Complete(Ending::PoolDrained) => {}
            // Count includes the round just drawn.
            SessionState::NextRound => ui.pool_remaining(session.remaining() + 1),
            SessionState::Complete(Ending::Exhausted { word }) => ui.exhausted(word),
        }
    }

    let summary = session.summary();
    ui.session_end(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::Question;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;
    use std::collections::VecDeque;

    fn session(words: &[&str], attempts: u32) -> Session<StepRng> {
        let questions = words.iter().map(|w| Question::new(*w, "hint")).collect();
        Session::new(QuestionPool::new(questions, StepRng::new(0, 0)), attempts).unwrap()
    }

    struct ScriptedUi {
        guesses: VecDeque<&'static str>,
        events: Vec<String>,
    }

    impl ScriptedUi {
        fn new(guesses: &[&'static str]) -> Self {
            Self {
                guesses: guesses.iter().copied().collect(),
                events: Vec::new(),
            }
        }
    }

    impl InputSource for ScriptedUi {
        fn request_guess(&mut self) -> Option<String> {
            self.guesses.pop_front().map(str::to_string)
        }
    }

    impl Presenter for ScriptedUi {
        fn show_round(&mut self, round: &RoundView) {
            let pattern: String = round.revealed.iter().map(|s| s.unwrap_or('_')).collect();
            self.events.push(format!("round {pattern} {}", round.attempts_left));
        }
        fn pool_remaining(&mut self, count: usize) {
            self.events.push(format!("remaining {count}"));
        }
        fn blank_input(&mut self) {
            self.events.push("blank".to_string());
        }
        fn miss(&mut self, guess: &str) {
            self.events.push(format!("miss {guess}"));
        }
        fn hit(&mut self, guess: &str) {
            self.events.push(format!("hit {guess}"));
        }
        fn solved(&mut self, word: &str) {
            self.events.push(format!("solved {word}"));
        }
        fn exhausted(&mut self, word: &str) {
            self.events.push(format!("exhausted {word}"));
        }
        fn session_end(&mut self, summary: &SessionSummary) {
            self.events.push(format!(
                "end {}/{}",
                summary.rounds_solved, summary.rounds_played
            ));
        }
    }

    #[test]
    fn test_new_session_rejects_empty_question_set() {
        let pool = QuestionPool::new(Vec::new(), StepRng::new(0, 0));
        assert!(matches!(Session::new(pool, 5), Err(GameError::NoQuestions)));
    }

    #[test]
    fn test_hit_costs_nothing() {
        let mut s = session(&["cat", "dog"], 5);
        let turn = s.take_turn("a").unwrap();
        assert_eq!(turn.outcome, TurnOutcome::Hit("a".to_string()));
        assert_eq!(turn.state, SessionState::AwaitingGuess);
        assert_eq!(s.round().attempts_left(), 5);
    }

    #[test]
    fn test_miss_costs_one_attempt() {
        let mut s = session(&["dog"], 5);
        let turn = s.take_turn("z").unwrap();
        assert_eq!(turn.outcome, TurnOutcome::Miss("z".to_string()));
        assert_eq!(turn.state, SessionState::AwaitingGuess);
        assert_eq!(s.round().attempts_left(), 4);
        assert!(s.round().revealed().iter().all(Option::is_none));
    }

    #[test]
    fn test_too_long_guess_is_a_miss() {
        let mut s = session(&["cat"], 5);
        let turn = s.take_turn("caterpillar").unwrap();
        assert_eq!(turn.outcome, TurnOutcome::Miss("caterpillar".to_string()));
        assert_eq!(s.round().attempts_left(), 4);
        assert!(s.round().revealed().iter().all(Option::is_none));
    }

    #[test]
    fn test_blank_guess_is_a_miss() {
        let mut s = session(&["cat"], 5);
        let turn = s.take_turn("").unwrap();
        assert_eq!(turn.outcome, TurnOutcome::Blank);
        assert_eq!(s.round().attempts_left(), 4);
        assert!(s.round().revealed().iter().all(Option::is_none));
    }

    #[test]
    fn test_solve_draws_next_round() {
        let mut s = session(&["cat", "dog"], 5);
        s.take_turn("z").unwrap();
        let turn = s.take_turn("cat").unwrap();
        assert_eq!(turn.outcome, TurnOutcome::Solved("cat".to_string()));
        assert_eq!(turn.state, SessionState::NextRound);
        assert_eq!(s.round().word(), "dog");
        assert_eq!(s.round().attempts_left(), 5);
        assert_eq!(s.remaining(), 0);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_exhaustion_ends_session_regardless_of_pool() {
        let mut s = session(&["cat", "dog", "owl"], 1);
        let turn = s.take_turn("q").unwrap();
        assert_eq!(
            turn.state,
            SessionState::Complete(Ending::Exhausted {
                word: "cat".to_string()
            })
        );
        assert!(s.is_complete());
        assert_eq!(s.remaining(), 2);
    }

    #[test]
    fn test_pool_drained_ends_session() {
        let mut s = session(&["cat"], 5);
        let turn = s.take_turn("cat").unwrap();
        assert_eq!(turn.outcome, TurnOutcome::Solved("cat".to_string()));
        assert_eq!(turn.state, SessionState::Complete(Ending::PoolDrained));
        assert!(s.is_complete());
        assert_eq!(s.round().attempts_left(), 5);
    }

    #[test]
    fn test_solving_by_letters_counts_as_solved() {
        let mut s = session(&["dog"], 5);
        s.take_turn("d").unwrap();
        s.take_turn("o").unwrap();
        let turn = s.take_turn("g").unwrap();
        assert_eq!(turn.outcome, TurnOutcome::Solved("dog".to_string()));
        assert_eq!(s.summary().rounds_solved, 1);
    }

    #[test]
    fn test_attempts_never_increase() {
        let mut s = session(&["banana"], 5);
        let mut last = s.round().attempts_left();
        for guess in ["", "x", "an", "bananas", "q", "b", "zz"] {
            s.take_turn(guess).unwrap();
            let now = s.round().attempts_left();
            assert!(now <= last);
            last = now;
            if s.is_complete() {
                break;
            }
        }
    }

    #[test]
    fn test_game_loop_event_sequence() {
        let mut s = session(&["cat", "dog"], 5);
        let mut ui = ScriptedUi::new(&["a", "", "cat", "dog"]);
        let summary = game_loop(&mut s, &mut ui).unwrap();

        assert_eq!(
            ui.events,
            vec![
                "round ___ 5",
                "hit a",
                "round _a_ 5",
                "blank",
                "round _a_ 4",
                "solved cat",
                "remaining 1",
                "round ___ 5",
                "solved dog",
                "end 2/2",
            ]
        );
        assert_eq!(
            summary,
            SessionSummary {
                rounds_played: 2,
                rounds_solved: 2,
                questions_left: 0,
            }
        );
    }

    #[test]
    fn test_game_loop_reports_exhaustion() {
        let mut s = session(&["cat", "dog"], 2);
        let mut ui = ScriptedUi::new(&["x", "y", "never read"]);
        let summary = game_loop(&mut s, &mut ui).unwrap();

        assert_eq!(ui.events[ui.events.len() - 2], "exhausted cat");
        assert_eq!(ui.events.last().unwrap(), "end 0/1");
        assert_eq!(summary.questions_left, 1);
        assert_eq!(ui.guesses.len(), 1);
    }

    #[test]
    fn test_game_loop_stops_when_input_closes() {
        let mut s = session(&["cat"], 5);
        let mut ui = ScriptedUi::new(&["c"]);
        let summary = game_loop(&mut s, &mut ui).unwrap();

        assert!(!s.is_complete());
        assert_eq!(ui.events.last().unwrap(), "end 0/1");
        assert_eq!(summary.rounds_solved, 0);
        assert_eq!(s.round().revealed()[0], Some('c'));
    }

    #[test]
    fn test_seeded_session_plays_every_question_once() {
        let words = ["apple", "rust", "owl", "kiwi"];
        let questions = words.iter().map(|w| Question::new(*w, "")).collect();
        let mut s = Session::new(QuestionPool::new(questions, StdRng::seed_from_u64(5)), 5).unwrap();

        let mut seen = Vec::new();
        loop {
            let word = s.round().word().to_string();
            seen.push(word.clone());
            if let SessionState::Complete(ending) = s.take_turn(&word).unwrap().state {
                assert_eq!(ending, Ending::PoolDrained);
                break;
            }
        }
        seen.sort();
        let mut expected: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_new_session_rejects_zero_attempts() {
        let pool = QuestionPool::new(vec![Question::new("cat", "animal")], StepRng::new(0, 0));
        assert!(matches!(Session::new(pool, 0), Err(GameError::NoAttempts)));
    }

    #[test]
    fn test_session_debug_shows_round() {
        let s = session(&["cat"], 5);
        let text = format!("{s:?}");
        assert!(text.contains("Session"));
        assert!(text.contains("cat"));
    }

    #[test]
    fn test_no_turns_after_pool_drained() {
        let mut s = session(&["cat"], 5);
        s.take_turn("cat").unwrap();
        assert_eq!(s.ending(), Some(&Ending::PoolDrained));

        assert!(matches!(s.take_turn("zzz"), Err(GameError::SessionComplete)));
        assert!(matches!(s.take_turn("cat"), Err(GameError::SessionComplete)));
        assert_eq!(
            s.summary(),
            SessionSummary {
                rounds_played: 1,
                rounds_solved: 1,
                questions_left: 0,
            }
        );
    }

    #[test]
    fn test_no_turns_after_exhaustion() {
        let mut s = session(&["cat", "dog"], 1);
        s.take_turn("z").unwrap();
        assert_eq!(
            s.ending(),
            Some(&Ending::Exhausted {
                word: "cat".to_string()
            })
        );

        assert!(matches!(s.take_turn("cat"), Err(GameError::SessionComplete)));
        assert!(matches!(s.take_turn(""), Err(GameError::SessionComplete)));
        assert_eq!(s.round().attempts_left(), 0);
        assert!(s.round().revealed().iter().all(Option::is_none));
        assert_eq!(s.summary().rounds_solved, 0);
    }
}
