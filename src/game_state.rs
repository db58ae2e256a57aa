//! Game state engine.
//!
//! Owns a single [`GameState`]: word selection with partial pre-reveal, guess
//! evaluation, penalty bookkeeping and end-of-game detection. Rendering and
//! input handling live in the front-ends; saving lives in [`crate::persistence`].
//!
//! Attempts and gallows stage are not stored separately. Both are derived from
//! one penalty counter so they can never drift apart:
//! `attempts_left = 10 - penalty` and `gallows_stage = penalty - 1`.

use crate::error::{GameError, GuessError};
use crate::{debug_log, info_log};
use rand::Rng;
use rand::seq::index;
use std::collections::BTreeSet;

/// Glyph shown for a position that has not been revealed yet.
pub const PLACEHOLDER: char = '_';
/// Attempts available at the start of a game.
pub const MAX_ATTEMPTS: u8 = 10;
/// Number of frames in the gallows illustration.
pub const GALLOWS_STAGES: usize = 10;
/// Whole-word guess that saves the session and ends it.
pub const SAVE_TOKEN: &str = "STOP";
/// Whole-word guess that ends the session without saving.
pub const QUIT_TOKEN: &str = "QUIT";

const LETTER_PENALTY: u8 = 1;
const WORD_PENALTY: u8 = 2;

/// Result of an evaluated guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Won,
    Lost,
    SaveAndEnd,
    QuitWithoutSave,
}

/// Where the game stands, independent of the last guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

/// A guess after case folding.
///
/// Letters fold to uppercase and words to lowercase. Both evaluation paths and
/// the repeated-guess check go through [`Guess::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guess {
    Letter(char),
    Word(String),
}

impl Guess {
    pub fn parse(input: &str) -> Result<Self, GuessError> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(GuessError::Empty),
            (Some(letter), None) => Ok(Self::Letter(fold_letter(letter))),
            _ => Ok(Self::Word(fold_word(input))),
        }
    }
}

pub(crate) fn fold_letter(letter: char) -> char {
    letter.to_ascii_uppercase()
}

pub(crate) fn fold_word(word: &str) -> String {
    word.to_ascii_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) target: String,
    pub(crate) revealed: Vec<char>,
    pub(crate) penalty: u8,
    pub(crate) guessed_words: BTreeSet<String>,
    pub(crate) guessed_letters: BTreeSet<char>,
    pub(crate) last_guess_failed: bool,
}

impl GameState {
    /// Start a game with a word drawn from `words`, pre-revealing part of it.
    ///
    /// The draw never picks the last entry of a source with two or more words.
    pub fn new<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordSource);
        }
        let index = select_index(words.len(), rng);
        debug_log!("GameState::new() - selected index {} of {}", index, words.len());
        Ok(Self::with_pre_reveal(&words[index], rng))
    }

    /// Start a game on `target` with the usual pre-reveal.
    pub fn with_pre_reveal<R: Rng + ?Sized>(target: &str, rng: &mut R) -> Self {
        let mut state = Self::from_target(target);
        state.pre_reveal(rng);
        info_log!(
            "New game: {} letters, {} pre-revealed",
            state.revealed.len(),
            state.revealed.iter().filter(|&&c| c != PLACEHOLDER).count()
        );
        state
    }

    /// Start a game on `target` with every position hidden.
    #[must_use]
    pub fn from_target(target: &str) -> Self {
        Self {
            target: target.to_string(),
            revealed: vec![PLACEHOLDER; target.chars().count()],
            penalty: 0,
            guessed_words: BTreeSet::new(),
            guessed_letters: BTreeSet::new(),
            last_guess_failed: false,
        }
    }

    fn pre_reveal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = self.revealed.len();
        let count = (len / 2).saturating_sub(1);
        if count == 0 {
            return;
        }
        let target: Vec<char> = self.target.chars().collect();
        for position in index::sample(rng, len, count) {
            let letter = fold_letter(target[position]);
            // Once the letter is marked as used it can no longer be guessed,
            // so every occurrence has to be shown now.
            self.reveal(letter);
            self.guessed_letters.insert(letter);
        }
    }

    /// Evaluate one guess.
    ///
    /// A single character is a letter guess, anything longer is a word guess.
    /// Rejected guesses leave the state untouched.
    pub fn guess(&mut self, input: &str) -> Result<Outcome, GuessError> {
        if self.status() != Status::InProgress {
            return Err(GuessError::GameOver);
        }
        let guess = Guess::parse(input)?;
        if self.already_guessed(&guess) {
            debug_log!("guess() - '{}' already proposed", input);
            return Err(GuessError::AlreadyGuessed(input.to_string()));
        }

        let outcome = match guess {
            Guess::Letter(letter) => self.guess_letter(letter),
            Guess::Word(word) => self.guess_word(input, word),
        };
        debug_log!(
            "guess() - '{}' -> {:?}, attempts left {}",
            input,
            outcome,
            self.attempts_left()
        );
        Ok(outcome)
    }

    fn guess_letter(&mut self, letter: char) -> Outcome {
        if self.reveal(letter) > 0 {
            self.last_guess_failed = false;
        } else {
            self.last_guess_failed = true;
            self.add_penalty(LETTER_PENALTY);
        }
        self.guessed_letters.insert(letter);
        self.outcome()
    }

    fn guess_word(&mut self, input: &str, word: String) -> Outcome {
        if word == fold_word(&self.target) {
            self.revealed = self.target.chars().collect();
            self.last_guess_failed = false;
            return Outcome::Won;
        }
        match input {
            SAVE_TOKEN => Outcome::SaveAndEnd,
            QUIT_TOKEN => Outcome::QuitWithoutSave,
            _ => {
                self.guessed_words.insert(word);
                self.add_penalty(WORD_PENALTY);
                self.last_guess_failed = true;
                self.outcome()
            }
        }
    }

    /// Reveal every position holding `letter`, returning how many matched.
    fn reveal(&mut self, letter: char) -> usize {
        let mut found = 0;
        for (slot, ch) in self.revealed.iter_mut().zip(self.target.chars()) {
            if fold_letter(ch) == letter {
                *slot = ch;
                found += 1;
            }
        }
        found
    }

    fn add_penalty(&mut self, points: u8) {
        // Clamps at gallows stage 9 / zero attempts.
        self.penalty = self.penalty.saturating_add(points).min(MAX_ATTEMPTS);
    }

    fn already_guessed(&self, guess: &Guess) -> bool {
        match guess {
            Guess::Letter(letter) => self.guessed_letters.contains(letter),
            Guess::Word(word) => self.guessed_words.contains(word),
        }
    }

    fn outcome(&self) -> Outcome {
        match self.status() {
            Status::InProgress => Outcome::Continue,
            Status::Won => Outcome::Won,
            Status::Lost => Outcome::Lost,
        }
    }

    /// End-of-game check. Loss is checked before win.
    #[must_use]
    pub fn status(&self) -> Status {
        if self.attempts_left() == 0 {
            Status::Lost
        } else if !self.revealed.contains(&PLACEHOLDER) {
            Status::Won
        } else {
            Status::InProgress
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status() != Status::InProgress
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn revealed(&self) -> &[char] {
        &self.revealed
    }

    #[must_use]
    pub fn revealed_word(&self) -> String {
        self.revealed.iter().collect()
    }

    #[must_use]
    pub fn attempts_left(&self) -> u8 {
        MAX_ATTEMPTS - self.penalty
    }

    /// Index of the gallows frame to draw, or -1 before the first failure.
    #[must_use]
    pub fn gallows_stage(&self) -> i8 {
        // penalty is at most MAX_ATTEMPTS, so this always fits
        self.penalty as i8 - 1
    }

    #[must_use]
    pub fn guessed_words(&self) -> &BTreeSet<String> {
        &self.guessed_words
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    #[must_use]
    pub fn last_guess_failed(&self) -> bool {
        self.last_guess_failed
    }
}

/// Draw an index into a source of `len` words.
///
/// The upper bound is exclusive of the last entry, so with two or more words
/// the last one is never chosen. A single-word source yields its only word.
pub(crate) fn select_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    if len <= 1 {
        0
    } else {
        rng.gen_range(0..len - 1)
    }
}
