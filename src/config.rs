use crate::cli::Cli;
use std::path::PathBuf;

const APP_DIR: &str = "hangman";
const SAVE_FILE: &str = "save.json";
const LOG_FILE: &str = "hangman.log";

/// Which front-end runs the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Full-screen panels (default).
    Panel,
    /// Line output with the word drawn in block letters.
    Ascii,
    /// Plain line output.
    Classic,
}

/// Command-line options resolved into concrete values.
#[derive(Clone, Debug)]
pub struct Settings {
    pub mode: Mode,
    pub dictionary: Option<PathBuf>,
    pub resume: Option<PathBuf>,
    pub save_path: PathBuf,
    pub letter_file: Option<PathBuf>,
    pub log_path: PathBuf,
    pub seed: Option<u64>,
}

impl Settings {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let mode = if cli.classic {
            Mode::Classic
        } else if cli.ascii {
            Mode::Ascii
        } else {
            Mode::Panel
        };
        Self {
            mode,
            dictionary: cli.dictionary.clone(),
            resume: cli.start_with.clone(),
            save_path: cli.save_file.clone().unwrap_or_else(default_save_path),
            letter_file: cli.letter_file.clone(),
            log_path: cli.log_file.clone().unwrap_or_else(default_log_path),
            seed: cli.seed,
        }
    }
}

/// `hangman/save.json` under the platform data directory, or the working
/// directory when there is none.
#[must_use]
pub fn default_save_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(SAVE_FILE))
        .unwrap_or_else(|| PathBuf::from(SAVE_FILE))
}

#[must_use]
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(APP_DIR).join(LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}
