// Library interface for hangman
// This allows integration tests to access internal modules

pub mod art;
pub mod cli;
pub mod config;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod persistence;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{GameError, GuessError, PersistError};
pub use game_state::{GameState, Outcome, Status};
pub use session::{GameInterface, SessionEnd, UserAction, game_loop};
pub use wordbank::{load_dictionary, load_wordbank_from_file, load_wordbank_from_str};
