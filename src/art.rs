//! ASCII art and text helpers shared by the CLI and TUI front ends.

pub const PLACEHOLDER: char = '_';

pub const BANNER: [&str; 5] = [
    r" _   _    _    _   _  ____ __  __    _    _   _ ",
    r"| | | |  / \  | \ | |/ ___|  \/  |  / \  | \ | |",
    r"| |_| | / _ \ |  \| | |  _| |\/| | / _ \ |  \| |",
    r"|  _  |/ ___ \| |\  | |_| | |  | |/ ___ \| |\  |",
    r"|_| |_/_/   \_\_| \_|\____|_|  |_/_/   \_\_| \_|",
];

const GALLOWS: [[&str; 6]; 7] = [
    [
        "  +---+", "  |   |", "      |", "      |", "      |", "=======",
    ],
    [
        "  +---+", "  |   |", "  O   |", "      |", "      |", "=======",
    ],
    [
        "  +---+", "  |   |", "  O   |", "  |   |", "      |", "=======",
    ],
    [
        "  +---+", "  |   |", "  O   |", " /|   |", "      |", "=======",
    ],
    [
        "  +---+", "  |   |", "  O   |", " /|\\  |", "      |", "=======",
    ],
    [
        "  +---+", "  |   |", "  O   |", " /|\\  |", " /    |", "=======",
    ],
    [
        "  +---+", "  |   |", "  O   |", " /|\\  |", " / \\  |", "=======",
    ],
];

/// Gallows drawing for the given progress, scaled so the figure completes
/// exactly when the attempts run out.
pub fn gallows(attempts_left: u32, max_attempts: u32) -> &'static [&'static str; 6] {
    let last = GALLOWS.len() - 1;
    if max_attempts == 0 {
        return &GALLOWS[last];
    }
    let used = max_attempts.saturating_sub(attempts_left).min(max_attempts) as usize;
    &GALLOWS[used * last / max_attempts as usize]
}

/// Reveal slots as display text, e.g. `_ a _`.
pub fn reveal_pattern(revealed: &[Option<char>]) -> String {
    revealed
        .iter()
        .map(|slot| slot.unwrap_or(PLACEHOLDER).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
