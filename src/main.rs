use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::{GameInterface, QuestionPool, Session, game_loop, load_questions};
use log::error;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.tui);

    let questions = match load_questions(cli.questions_path.as_deref()) {
        Ok(questions) => questions,
        Err(e) => {
            eprintln!("Failed to load questions: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = match Session::new(QuestionPool::new(questions, rng), cli.attempts) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Cannot start a game: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ui: Box<dyn GameInterface> = if cli.tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let mut cli_ui =
            CliInterface::new(io::stdin().lock(), io::stdout()).with_color(!cli.no_color);
        cli_ui.display_banner();
        Box::new(cli_ui)
    };

    let result = game_loop(&mut session, ui.as_mut());
    // Restore the terminal before printing anything else
    drop(ui);

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Session aborted: {e}");
            eprintln!("Session aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
