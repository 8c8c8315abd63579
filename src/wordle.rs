//! Word game core: word parsing, guess evaluation and game state.

use crate::error::AppError;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

pub const WORD_LENGTH: usize = 5;
pub const MAX_GUESSES: usize = 6;

/// Feedback for one letter of a guess. Ordered weakest to strongest so
/// keyboard hints can keep the best state seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum LetterState {
    #[default]
    None,
    Wrong,
    Misplaced,
    Correct,
}

/// Five upper-case ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    pub fn letters(&self) -> [char; WORD_LENGTH] {
        self.0.map(char::from)
    }
}

impl FromStr for Word {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(AppError::InvalidWord(s.to_string()));
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, b) in letters.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(Word(letters))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.letters() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Scores `guess` against `secret`.
///
/// Exact matches are marked first and removed from the pool of secret
/// letters; the remaining guess letters are then matched left to right
/// against what is left of the pool, so a repeated letter is only marked
/// misplaced as many times as it still occurs in the secret.
pub fn evaluate(secret: &Word, guess: &Word) -> [LetterState; WORD_LENGTH] {
    let mut states = [LetterState::Wrong; WORD_LENGTH];
    let mut remaining = [0u8; 26];

    for i in 0..WORD_LENGTH {
        if guess.0[i] == secret.0[i] {
            states[i] = LetterState::Correct;
        } else {
            remaining[(secret.0[i] - b'A') as usize] += 1;
        }
    }

    for i in 0..WORD_LENGTH {
        if states[i] == LetterState::Correct {
            continue;
        }
        let slot = &mut remaining[(guess.0[i] - b'A') as usize];
        if *slot > 0 {
            *slot -= 1;
            states[i] = LetterState::Misplaced;
        }
    }

    states
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    pub word: Word,
    pub states: [LetterState; WORD_LENGTH],
}

impl Guess {
    pub fn is_solved(&self) -> bool {
        self.states.iter().all(|s| *s == LetterState::Correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Rejected submissions. Shown to the player, not logged as failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    Incomplete,
    NotInWordList(String),
    GameOver,
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessError::Incomplete => write!(f, "Not enough letters"),
            GuessError::NotInWordList(word) => write!(f, "{word} is not in the word list"),
            GuessError::GameOver => write!(f, "The game is over"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    secret: Word,
    dictionary: Option<HashSet<Word>>,
    pub guesses: Vec<Guess>,
    pub input: String,
}

impl Game {
    pub fn new(secret: Word) -> Self {
        Self {
            secret,
            dictionary: None,
            guesses: Vec::with_capacity(MAX_GUESSES),
            input: String::with_capacity(WORD_LENGTH),
        }
    }

    /// Only accept guesses present in `words` (the secret is always accepted).
    pub fn with_dictionary(mut self, words: impl IntoIterator<Item = Word>) -> Self {
        let mut set: HashSet<Word> = words.into_iter().collect();
        set.insert(self.secret);
        self.dictionary = Some(set);
        self
    }

    pub fn status(&self) -> GameStatus {
        if self.guesses.last().is_some_and(Guess::is_solved) {
            GameStatus::Won
        } else if self.guesses.len() >= MAX_GUESSES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Revealed once the game is over.
    pub fn answer(&self) -> Option<Word> {
        (self.status() != GameStatus::InProgress).then_some(self.secret)
    }

    pub fn push_letter(&mut self, c: char) {
        if self.status() != GameStatus::InProgress
            || self.input.len() >= WORD_LENGTH
            || !c.is_ascii_alphabetic()
        {
            return;
        }
        self.input.push(c.to_ascii_uppercase());
    }

    pub fn pop_letter(&mut self) {
        self.input.pop();
    }

    pub fn submit(&mut self) -> Result<&Guess, GuessError> {
        if self.status() != GameStatus::InProgress {
            return Err(GuessError::GameOver);
        }
        if self.input.len() < WORD_LENGTH {
            return Err(GuessError::Incomplete);
        }
        // push_letter only admits ASCII letters, so a full row always parses.
        let word: Word = self.input.parse().map_err(|_| GuessError::Incomplete)?;
        if let Some(dictionary) = &self.dictionary {
            if !dictionary.contains(&word) {
                return Err(GuessError::NotInWordList(word.to_string()));
            }
        }

        let states = evaluate(&self.secret, &word);
        self.input.clear();
        self.guesses.push(Guess { word, states });
        tracing::debug!(guess = %word, attempt = self.guesses.len(), "guess submitted");
        Ok(&self.guesses[self.guesses.len() - 1])
    }

    /// Best state seen so far for every guessed letter.
    pub fn letter_hints(&self) -> BTreeMap<char, LetterState> {
        let mut hints = BTreeMap::new();
        for guess in &self.guesses {
            for (c, state) in guess.word.letters().into_iter().zip(guess.states) {
                let entry = hints.entry(c).or_insert(state);
                if state > *entry {
                    *entry = state;
                }
            }
        }
        hints
    }
}
