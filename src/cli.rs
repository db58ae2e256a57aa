use crate::art::{AsciiFont, Gallows};
use crate::error::{GuessError, PersistError};
use crate::game_state::GameState;
use crate::session::{GameInterface, UserAction};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Hangman: guess the hidden word one letter (or one word) at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Word list file, or a directory whose files are all word lists
    pub dictionary: Option<PathBuf>,

    /// Resume the game saved in this file
    #[arg(short = 's', long = "start-with")]
    pub start_with: Option<PathBuf>,

    /// Where typing STOP saves the game
    #[arg(long = "save-file")]
    pub save_file: Option<PathBuf>,

    /// Plain line-by-line output
    #[arg(short = 'c', long, conflicts_with_all = ["ascii", "letter_file"])]
    pub classic: bool,

    /// Line output with the word drawn in block letters
    #[arg(short = 'a', long)]
    pub ascii: bool,

    /// Block-letter font file
    #[arg(short = 'l', long = "letter-file")]
    pub letter_file: Option<PathBuf>,

    /// Write logs to this file instead of the default cache location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Seed the word draw for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the rules and exit
    #[arg(short = 'r', long)]
    pub rules: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub const RULES: &str = include_str!("resources/rules.txt");

pub fn display_rules() {
    print!("{RULES}");
}

/// How the line-based front-end draws the word.
#[derive(Debug, Clone)]
pub enum TextStyle {
    /// Letters separated by spaces.
    Classic,
    /// Block letters from a font.
    Ascii(AsciiFont),
}

impl TextStyle {
    fn render_word(&self, word: &[char]) -> Vec<String> {
        match self {
            Self::Classic => vec![spaced(word)],
            Self::Ascii(font) => font.render(word.iter().copied()),
        }
    }
}

fn spaced(word: &[char]) -> String {
    let mut line = String::with_capacity(word.len() * 2);
    for c in word {
        line.push(*c);
        line.push(' ');
    }
    line
}

fn miss_message(attempts_left: u8) -> String {
    format!("Not present in the word, {attempts_left} attempts remaining")
}

fn result_message(state: &GameState) -> String {
    if state.attempts_left() > 0 {
        "Congrats !".to_string()
    } else {
        format!(
            "The word was {}. You'll do better next time!!!",
            state.target()
        )
    }
}

/// Line-printing implementation of the GameInterface trait.
///
/// Wraps a BufRead reader for input and prints to stdout. Used by both the
/// classic and the ASCII-art front-ends.
pub struct CliInterface<R: BufRead> {
    reader: R,
    style: TextStyle,
    gallows: Gallows,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R, style: TextStyle) -> Self {
        Self {
            reader,
            style,
            gallows: Gallows::embedded(),
        }
    }

    fn print_word(&self, state: &GameState) {
        for line in self.style.render_word(state.revealed()) {
            println!("{line}");
        }
    }

    fn print_gallows(&self, state: &GameState) {
        if let Some(frame) = self.gallows.frame(state.gallows_stage()) {
            println!();
            for line in frame {
                println!("{line}");
            }
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_start(&mut self, state: &GameState) {
        println!("Good Luck, you have {} attempts.", state.attempts_left());
        self.print_word(state);
        self.print_gallows(state);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        print!("\nChoose : ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            // End of input behaves like leaving the game.
            Ok(0) | Err(_) => Some(UserAction::Exit),
            Ok(_) => Some(UserAction::Guess(input.trim().to_string())),
        }
    }

    fn display_rejection(&mut self, _error: &GuessError) {
        println!("Empty or already proposed!");
    }

    fn display_guess_result(&mut self, state: &GameState, _guess: &str) {
        if state.last_guess_failed() {
            println!("{}", miss_message(state.attempts_left()));
        }
        self.print_word(state);
        self.print_gallows(state);
    }

    fn display_saved(&mut self, path: &Path) {
        println!("Game saved in {}", path.display());
    }

    fn display_save_failed(&mut self, error: &PersistError) {
        println!("Game save failed : {error}");
    }

    fn display_game_over(&mut self, state: &GameState) {
        println!("{}", result_message(state));
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
