use crate::error::GameError;
use crate::{debug_log, info_log};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const EMBEDDED_QUESTIONS: &str = include_str!("resources/questions.json");

const QUESTIONS_FILE_NAME: &str = "questions.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub word: String,
    pub hint: String,
}

impl Question {
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            hint: hint.into(),
        }
    }
}

/// Question files come either as a list of `{ "word", "hint" }` objects or as
/// a plain object mapping each word to its hint.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionFile {
    List(Vec<Question>),
    Map(BTreeMap<String, String>),
}

/// Strip every whitespace character and lowercase the rest.
///
/// Guesses and words go through the same normalization so that anything the
/// player can type is comparable with the stored word.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn load_questions_from_str(data: &str) -> Result<Vec<Question>, GameError> {
    let parsed: QuestionFile = serde_json::from_str(data)?;
    let raw = match parsed {
        QuestionFile::List(list) => list,
        QuestionFile::Map(map) => map
            .into_iter()
            .map(|(word, hint)| Question { word, hint })
            .collect(),
    };

    let mut questions = Vec::with_capacity(raw.len());
    for question in raw {
        let word = normalize(&question.word);
        if word.is_empty() {
            return Err(GameError::EmptyWord {
                hint: question.hint,
            });
        }
        questions.push(Question {
            word,
            hint: question.hint.trim().to_string(),
        });
    }
    debug_log!("Parsed {} questions", questions.len());
    Ok(questions)
}

pub fn load_questions_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, GameError> {
    let data = fs::read_to_string(path)?;
    load_questions_from_str(&data)
}

/// `<config_dir>/hangman/questions.json`, if the platform has a config dir.
pub fn default_questions_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hangman").join(QUESTIONS_FILE_NAME))
}

/// Resolve the question set: an explicit path wins, then a user file in the
/// config dir, then the embedded set.
pub fn load_questions(explicit: Option<&Path>) -> Result<Vec<Question>, GameError> {
    if let Some(path) = explicit {
        info_log!("Loading questions from {}", path.display());
        return load_questions_from_file(path);
    }

    if let Some(path) = default_questions_path()
        && path.is_file()
    {
        info_log!("Loading questions from {}", path.display());
        return load_questions_from_file(&path);
    }

    info_log!("Using embedded question set");
    load_questions_from_str(EMBEDDED_QUESTIONS)
}
