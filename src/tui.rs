//! TUI (Terminal User Interface) module for Hangman
//!
//! Full-screen front end built on Ratatui and crossterm.
//!
//! # State Machine
//! - `EnteringGuess`: typing a guess, ENTER submits, ESC quits
//! - `GameOver`: summary shown, any key leaves

use crate::art::{BANNER, gallows, reveal_pattern};
use crate::game_state::{InputSource, Presenter, RoundView, SessionSummary};
use crate::questions::normalize;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_CHARS: usize = 64;
const GALLOWS_WIDTH: u16 = 16;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    GameOver,
}

/// What the info panel shows about the active round.
#[derive(Debug, Default)]
struct RoundDisplay {
    hint: String,
    pattern: String,
    attempts_left: u32,
    max_attempts: u32,
    round_number: usize,
    misses: Vec<String>,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    round: &'a RoundDisplay,
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    message_style: Style,
    status: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round: RoundDisplay,
    current_input: String,
    state: TuiState,
    message: String,
    message_style: Style,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            round: RoundDisplay::default(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            message: String::new(),
            message_style: MESSAGE_STYLE,
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            round: &self.round,
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
            message_style: self.message_style,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn set_message(&mut self, message: String, style: Style) {
        self.message = message;
        self.message_style = style;
        self.draw_or_log();
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BANNER.len() as u16 + 2), // Title
                Constraint::Min(8),                          // Gallows + round info
                Constraint::Length(3),                       // Message
                Constraint::Length(3),                       // Input
                Constraint::Length(3),                       // Status
                Constraint::Length(3),                       // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);
        Self::render_gallows(f, board[0], ctx.round);
        Self::render_round(f, board[1], ctx.round);

        Self::render_message(f, chunks[2], ctx.message, ctx.message_style);
        Self::render_input(f, chunks[3], ctx.current_input, ctx.state);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = BANNER.iter().map(|row| Line::from(*row)).collect();
        let title = Paragraph::new(lines)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, round: &RoundDisplay) {
        let stage = gallows(round.attempts_left, round.max_attempts);
        let lines: Vec<Line> = stage.iter().map(|row| Line::from(*row)).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_round(f: &mut Frame, area: Rect, round: &RoundDisplay) {
        let attempts_style = if round.attempts_left <= 1 {
            ERROR_STYLE
        } else {
            INFO_STYLE
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Hint: ", HEADER_STYLE),
                Span::raw(round.hint.as_str()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Word: ", HEADER_STYLE),
                Span::styled(round.pattern.as_str(), SUCCESS_STYLE),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Attempts left: ", HEADER_STYLE),
                Span::styled(
                    format!("{}/{}", round.attempts_left, round.max_attempts),
                    attempts_style,
                ),
            ]),
        ];

        if !round.misses.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Missed: ", HEADER_STYLE),
                Span::styled(round.misses.join(", "), ERROR_STYLE),
            ]));
        }

        let title = format!("Round {}", round.round_number);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_message(f: &mut Frame, area: Rect, message: &str, style: Style) {
        let paragraph = Paragraph::new(Span::styled(message, style))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, current_input: &str, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => format!("> {current_input}_"),
            TuiState::GameOver => String::new(),
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Your guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Type a letter or a word | ENTER: Submit | BACKSPACE: Delete | ESC: Quit"
            }
            TuiState::GameOver => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Poll for one key press. `Ok(None)` when nothing usable arrived in time.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            // Only Press events; Release and Repeat would double the input
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    /// Outer `None`: keep waiting. `Some(None)`: quit. `Some(Some(guess))`: submit.
    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<Option<String>> {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, quitting");
                Some(None)
            }
            KeyCode::Char('c') if has_ctrl => {
                info_log!("handle_guess_input() - Ctrl+C pressed, quitting");
                Some(None)
            }
            KeyCode::Enter => {
                let guess = normalize(&self.current_input);
                self.current_input.clear();
                info_log!("handle_guess_input() - Submitting '{}'", guess);
                Some(Some(guess))
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Char(c)
                if !has_ctrl
                    && !has_alt
                    && !c.is_control()
                    && c != '\u{FFFD}'
                    && self.current_input.chars().count() < MAX_INPUT_CHARS =>
            {
                self.current_input.push(c);
                None
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn wait_for_any_key() {
        loop {
            match Self::next_key() {
                Ok(Some(_)) => return,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("wait_for_any_key() - Input error: {}", e);
                    return;
                }
            }
        }
    }
}

impl InputSource for TuiInterface {
    fn request_guess(&mut self) -> Option<String> {
        self.state = TuiState::EnteringGuess;
        self.status = "Waiting for guess...".to_string();
        loop {
            if self.draw().is_err() {
                info_log!("request_guess() - Draw failed, quitting");
                return None;
            }

            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_input(key) {
                        return action;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("request_guess() - Input error: {}, quitting", e);
                    return None;
                }
            }
        }
    }
}

impl Presenter for TuiInterface {
    fn show_round(&mut self, round: &RoundView) {
        if round.round_number != self.round.round_number {
            self.round.misses.clear();
        }
        self.round.hint = round.hint.to_string();
        self.round.pattern = reveal_pattern(round.revealed);
        self.round.attempts_left = round.attempts_left;
        self.round.max_attempts = round.max_attempts;
        self.round.round_number = round.round_number;
        self.draw_or_log();
    }

    fn pool_remaining(&mut self, count: usize) {
        self.status = format!("{count} question(s) left");
        self.draw_or_log();
    }

    fn blank_input(&mut self) {
        self.round.misses.push("(blank)".to_string());
        self.set_message("Please enter a letter or a word.".to_string(), INFO_STYLE);
    }

    fn miss(&mut self, guess: &str) {
        self.round.misses.push(guess.to_string());
        self.set_message(format!("'{guess}' is not in the word."), ERROR_STYLE);
    }

    fn hit(&mut self, guess: &str) {
        self.set_message(
            format!("'{guess}' is in the word! Keep going."),
            SUCCESS_STYLE,
        );
    }

    fn solved(&mut self, word: &str) {
        self.set_message(format!("Correct! The word was '{word}'."), SUCCESS_STYLE);
    }

    fn exhausted(&mut self, word: &str) {
        self.round.attempts_left = 0;
        self.round.pattern = word.chars().map(String::from).collect::<Vec<_>>().join(" ");
        self.set_message(format!("Out of attempts. The word was '{word}'."), ERROR_STYLE);
    }

    fn session_end(&mut self, summary: &SessionSummary) {
        self.state = TuiState::GameOver;
        self.status = format!(
            "Game over - solved {} of {} words, {} not played",
            summary.rounds_solved, summary.rounds_played, summary.questions_left
        );
        if self.draw().is_err() {
            debug_log!("session_end() - Draw failed");
            return;
        }
        Self::wait_for_any_key();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn render_to_text(ctx: &RenderContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();
        terminal
            .draw(|f| TuiInterface::render_static(f, ctx))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn sample_round() -> RoundDisplay {
        RoundDisplay {
            hint: "animal".to_string(),
            pattern: "_ a _".to_string(),
            attempts_left: 3,
            max_attempts: 5,
            round_number: 2,
            misses: vec!["z".to_string(), "q".to_string()],
        }
    }

    #[test]
    fn test_render_round_details() {
        let round = sample_round();
        let text = render_to_text(&RenderContext {
            round: &round,
            current_input: "ca",
            state: TuiState::EnteringGuess,
            message: "'a' is in the word! Keep going.",
            message_style: SUCCESS_STYLE,
            status: "Waiting for guess...",
        });

        assert!(text.contains("Round 2"));
        assert!(text.contains("Hint: animal"));
        assert!(text.contains("Word: _ a _"));
        assert!(text.contains("Attempts left: 3/5"));
        assert!(text.contains("Missed: z, q"));
        assert!(text.contains("> ca_"));
        assert!(text.contains("Keep going."));
        assert!(text.contains("ESC: Quit"));
    }

    #[test]
    fn test_render_game_over_hides_input() {
        let round = sample_round();
        let text = render_to_text(&RenderContext {
            round: &round,
            current_input: "leftover",
            state: TuiState::GameOver,
            message: "",
            message_style: MESSAGE_STYLE,
            status: "Game over",
        });

        assert!(!text.contains("> leftover"));
        assert!(text.contains("Press any key to exit"));
    }
}
