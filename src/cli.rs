use crate::art::{BANNER, gallows, reveal_pattern};
use crate::debug_log;
use crate::game_state::{InputSource, Presenter, RoundView, SessionSummary};
use crate::questions::normalize;
use crate::round::DEFAULT_ATTEMPTS;
use clap::Parser;
use crossterm::style::{Color, Stylize};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Hangman: guess the hidden word one letter (or chunk) at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON question file (list of {word, hint} or a word -> hint map)
    #[arg(short = 'q', long = "questions")]
    pub questions_path: Option<PathBuf>,

    /// Attempts per word
    #[arg(
        short = 'a',
        long = "attempts",
        default_value_t = DEFAULT_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..=26)
    )]
    pub attempts: u32,

    /// Seed for the question order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Commands are matched on the trimmed raw line; the leading colon keeps them
/// apart from any normalized guess.
const EXIT_COMMANDS: [&str; 2] = [":q", ":quit"];

/// Line-oriented interface over any reader/writer pair.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: true,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn display_banner(&mut self) {
        for row in BANNER {
            let painted = self.paint(row, Color::Cyan);
            self.line(painted);
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("CliInterface - write failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> InputSource for CliInterface<R, W> {
    fn request_guess(&mut self) -> Option<String> {
        let prompt = self.paint("Guess a letter or a word (':q' to quit): ", Color::White);
        if let Err(e) = write!(self.writer, "{prompt}").and_then(|()| self.writer.flush()) {
            debug_log!("request_guess() - prompt failed: {}", e);
        }

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => {
                debug_log!("request_guess() - end of input");
                self.line("");
                None
            }
            Ok(_) => {
                let command = input.trim().to_lowercase();
                if EXIT_COMMANDS.contains(&command.as_str()) {
                    None
                } else {
                    Some(normalize(&input))
                }
            }
            Err(e) => {
                debug_log!("request_guess() - read failed: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Presenter for CliInterface<R, W> {
    fn show_round(&mut self, round: &RoundView) {
        self.line("");
        let header = self.paint(&format!("Round {}", round.round_number), Color::Cyan);
        self.line(header);
        for row in gallows(round.attempts_left, round.max_attempts) {
            self.line(row);
        }
        self.line(format!("Hint: {}", round.hint));
        let word = self.paint(&reveal_pattern(round.revealed), Color::Yellow);
        self.line(format!("Word: {word}"));
        self.line(format!(
            "Attempts left: {}/{}",
            round.attempts_left, round.max_attempts
        ));
    }

    fn pool_remaining(&mut self, count: usize) {
        let noun = if count == 1 { "question" } else { "questions" };
        self.line(format!("{count} {noun} left."));
    }

    fn blank_input(&mut self) {
        let text = self.paint("Please enter a letter or a word.", Color::Yellow);
        self.line(text);
    }

    fn miss(&mut self, guess: &str) {
        let text = self.paint(&format!("'{guess}' is not in the word."), Color::Red);
        self.line(text);
    }

    fn hit(&mut self, guess: &str) {
        let text = self.paint(&format!("'{guess}' is in the word! Keep going."), Color::Green);
        self.line(text);
    }

    fn solved(&mut self, word: &str) {
        let text = self.paint(&format!("Correct! The word was '{word}'."), Color::Green);
        self.line(text);
    }

    fn exhausted(&mut self, word: &str) {
        let text = self.paint(&format!("Out of attempts. The word was '{word}'."), Color::Red);
        self.line(text);
    }

    fn session_end(&mut self, summary: &SessionSummary) {
        self.line("");
        self.line(format!(
            "Game over. Solved {} of {} words.",
            summary.rounds_solved, summary.rounds_played
        ));
        if summary.questions_left > 0 {
            let noun = if summary.questions_left == 1 {
                "question was"
            } else {
                "questions were"
            };
            self.line(format!("{} {noun} not played.", summary.questions_left));
        }
    }
}
