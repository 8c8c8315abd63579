//! Secret word source for the game.

use crate::error::{AppError, Result};
use crate::remote::read_json;
use crate::wordle::Word;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_WORD_LIST_URL: &str = "https://darkermango.github.io/5-Letter-words/words.json";

/// Used when the remote list cannot be fetched.
const FALLBACK_WORDS: &[&str] = &[
    "apple", "brave", "crane", "dwell", "eagle", "flame", "grape", "house", "input", "jolly",
    "knife", "lemon", "mango", "noble", "ocean", "pilot", "quiet", "river", "slate", "table",
    "ultra", "vivid", "whale", "xenon", "yeast", "zebra",
];

#[derive(Deserialize)]
struct WordList {
    words: Vec<String>,
}

/// Downloads the word list, skipping entries that are not five letters.
pub fn fetch_words(url: &str, timeout: Duration) -> Result<Vec<Word>> {
    let list: WordList = read_json(ureq::get(url).timeout(timeout).call()?)?;
    let total = list.words.len();
    let words: Vec<Word> = list.words.iter().filter_map(|w| w.parse().ok()).collect();
    tracing::info!(total, usable = words.len(), "fetched word list");
    if words.is_empty() {
        return Err(AppError::EmptyWordList(format!("no usable words at {url}")));
    }
    Ok(words)
}

pub fn fallback_words() -> Vec<Word> {
    FALLBACK_WORDS.iter().filter_map(|w| w.parse().ok()).collect()
}

/// Fetches the list, falling back to the built-in words on any error.
pub fn load_words(url: &str, timeout: Duration) -> Vec<Word> {
    fetch_words(url, timeout).unwrap_or_else(|err| {
        tracing::error!(error = %err, url, "error fetching word list, using built-in words");
        fallback_words()
    })
}

pub fn pick_random(words: &[Word]) -> Result<Word> {
    if words.is_empty() {
        return Err(AppError::EmptyWordList("nothing to pick from".into()));
    }
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf).map_err(|e| AppError::Random(e.to_string()))?;
    let index = (u64::from_le_bytes(buf) % words.len() as u64) as usize;
    Ok(words[index])
}
