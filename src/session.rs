use crate::error::{GuessError, PersistError};
use crate::game_state::{GameState, Outcome, Status};
use crate::persistence;
use crate::{debug_log, info_log};
use std::path::{Path, PathBuf};

/// Input collected by a front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// How a session finished. The binary turns this into an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Won,
    Lost,
    Saved(PathBuf),
    SaveFailed(String),
    Quit,
}

/// Trait for front-ends driving a game session.
///
/// The session loop calls these in order: `display_start` once, then
/// `read_guess` followed by one of the `display_*` reactions, until the game or
/// the session ends.
pub trait GameInterface {
    /// Show the freshly created or resumed game.
    fn display_start(&mut self, state: &GameState);

    /// Read the next action. `None` means nothing usable was entered yet.
    fn read_guess(&mut self) -> Option<UserAction>;

    /// A guess was refused without being evaluated.
    fn display_rejection(&mut self, error: &GuessError);

    /// A guess was evaluated and `state` reflects it.
    fn display_guess_result(&mut self, state: &GameState, guess: &str);

    fn display_saved(&mut self, path: &Path);

    fn display_save_failed(&mut self, error: &PersistError);

    /// The game was won or lost.
    fn display_game_over(&mut self, state: &GameState);

    fn display_exit_message(&mut self);
}

fn finished(state: &GameState) -> Option<SessionEnd> {
    match state.status() {
        Status::InProgress => None,
        Status::Won => Some(SessionEnd::Won),
        Status::Lost => Some(SessionEnd::Lost),
    }
}

/// Run one session until the game ends or the player leaves.
///
/// `save_path` is where a `STOP` guess writes the snapshot.
pub fn game_loop<I: GameInterface + ?Sized>(
    state: &mut GameState,
    interface: &mut I,
    save_path: &Path,
) -> SessionEnd {
    interface.display_start(state);
    if let Some(end) = finished(state) {
        interface.display_game_over(state);
        return end;
    }

    loop {
        let guess = match interface.read_guess() {
            Some(UserAction::Guess(guess)) => guess,
            Some(UserAction::Exit) => {
                info_log!("Player left the session");
                interface.display_exit_message();
                return SessionEnd::Quit;
            }
            None => continue,
        };

        let outcome = match state.guess(&guess) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug_log!("game_loop() - rejected '{}': {}", guess, e);
                interface.display_rejection(&e);
                continue;
            }
        };

        match outcome {
            Outcome::Continue => interface.display_guess_result(state, &guess),
            Outcome::Won | Outcome::Lost => {
                interface.display_guess_result(state, &guess);
                interface.display_game_over(state);
                info_log!("Game over: {:?}", outcome);
                return if outcome == Outcome::Won {
                    SessionEnd::Won
                } else {
                    SessionEnd::Lost
                };
            }
            Outcome::SaveAndEnd => {
                return match persistence::save(state, save_path) {
                    Ok(()) => {
                        interface.display_saved(save_path);
                        SessionEnd::Saved(save_path.to_path_buf())
                    }
                    Err(e) => {
                        log::error!("Save failed: {e}");
                        interface.display_save_failed(&e);
                        SessionEnd::SaveFailed(e.to_string())
                    }
                };
            }
            Outcome::QuitWithoutSave => {
                interface.display_exit_message();
                return SessionEnd::Quit;
            }
        }
    }
}
