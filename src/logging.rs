// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_NAME: &str = "hangman.log";

/// `<data_local_dir>/hangman/hangman.log`
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("hangman").join(LOG_FILE_NAME))
}

/// Install the global logger. `RUST_LOG` overrides the default `warn` filter.
///
/// With `to_file` set, records go to [`log_file_path`] instead of stderr so a
/// full-screen interface is not drawn over. Falls back to stderr if the file
/// cannot be opened.
pub fn init_logging(to_file: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if to_file && let Some(path) = log_file_path() {
        let opened = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| OpenOptions::new().create(true).append(true).open(&path));
        match opened {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not open log file '{}': {e}", path.display()),
        }
    }

    // A logger may already be installed (tests, embedding); keep it.
    let _ = builder.try_init();
}
