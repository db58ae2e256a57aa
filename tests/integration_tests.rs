// Integration tests for the hangman application
// These tests verify that all modules work together correctly

use hangman::cli::{CliInterface, TextStyle};
use hangman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hangman_it_{}_{name}", std::process::id()))
}

/// Every letter of the target not yet revealed, one per line.
fn remaining_letters(state: &GameState) -> String {
    let mut input = String::new();
    for (slot, ch) in state.revealed().iter().zip(state.target().chars()) {
        let letter = ch.to_ascii_uppercase();
        if *slot == '_' && !input.contains(letter) {
            input.push(letter);
            input.push('\n');
        }
    }
    input
}

#[test]
fn test_end_to_end_letter_game_from_file() {
    // Load a word list from disk, start a seeded game and win it letter by letter
    let wordbank_path = temp_path("words.txt");
    fs::write(&wordbank_path, "Lantern\nvolcano\n\nnot a word\n").unwrap();

    let words = load_wordbank_from_file(&wordbank_path).unwrap();
    assert_eq!(words, vec!["Lantern", "volcano"]);

    let mut rng = StdRng::seed_from_u64(5);
    let mut state = GameState::new(&words, &mut rng).unwrap();
    // The last word of the list is never drawn
    assert_eq!(state.target(), "Lantern");
    assert_eq!(state.attempts_left(), 10);
    assert_eq!(state.gallows_stage(), -1);

    let input = remaining_letters(&state);
    let mut interface = CliInterface::new(Cursor::new(input), TextStyle::Classic);
    let end = game_loop(&mut state, &mut interface, &temp_path("unused.json"));

    assert_eq!(end, SessionEnd::Won);
    assert_eq!(state.revealed_word(), "Lantern");
    assert_eq!(state.attempts_left(), 10);

    fs::remove_file(&wordbank_path).unwrap();
}

#[test]
fn test_whole_word_win_through_ascii_interface() {
    let mut state = GameState::from_target("cat");
    let input = "z\ndog\nCAT\n";
    let mut interface = CliInterface::new(
        Cursor::new(input),
        TextStyle::Ascii(hangman::art::AsciiFont::embedded()),
    );
    let end = game_loop(&mut state, &mut interface, &temp_path("unused.json"));

    assert_eq!(end, SessionEnd::Won);
    assert_eq!(state.revealed_word(), "cat");
    assert_eq!(state.attempts_left(), 7);
    assert_eq!(state.gallows_stage(), 2);
    assert_eq!(state.guessed_words().len(), 1);
    assert!(state.guessed_words().contains("dog"));
}

#[test]
fn test_repeated_guesses_cost_nothing() {
    let mut state = GameState::from_target("cat");
    let input = "z\nZ\nz\ndog\nDOG\n\nexit-by-eof-follows\n";
    let mut interface = CliInterface::new(Cursor::new(input), TextStyle::Classic);
    let end = game_loop(&mut state, &mut interface, &temp_path("unused.json"));

    assert_eq!(end, SessionEnd::Quit);
    // z once (1) + dog once (2) + the final wrong word (2)
    assert_eq!(state.attempts_left(), 5);
    assert_eq!(state.guessed_letters().len(), 1);
    assert_eq!(state.guessed_words().len(), 2);
}

#[test]
fn test_loss_then_word_revealed_in_state() {
    let mut state = GameState::from_target("umbrella");
    let input = "q\nx\nz\nj\nk\nw\ny\nv\np\nh\n";
    let mut interface = CliInterface::new(Cursor::new(input), TextStyle::Classic);
    let end = game_loop(&mut state, &mut interface, &temp_path("unused.json"));

    assert_eq!(end, SessionEnd::Lost);
    assert_eq!(state.status(), Status::Lost);
    assert_eq!(state.attempts_left(), 0);
    assert_eq!(state.gallows_stage(), 9);
}

#[test]
fn test_save_and_resume_session() {
    let save_path = temp_path("resume.json");
    let _ = fs::remove_file(&save_path);

    // First session: a hit, a miss, then STOP
    let mut state = GameState::from_target("walrus");
    let mut interface = CliInterface::new(Cursor::new("w\nq\nSTOP\n"), TextStyle::Classic);
    let end = game_loop(&mut state, &mut interface, &save_path);
    assert_eq!(end, SessionEnd::Saved(save_path.clone()));

    // Second session picks up exactly where the first left off
    let mut resumed = persistence::load(&save_path).unwrap();
    assert_eq!(resumed, state);
    assert_eq!(resumed.revealed_word(), "w_____");
    assert_eq!(resumed.attempts_left(), 9);
    assert!(resumed.last_guess_failed());

    let mut interface = CliInterface::new(Cursor::new("q\nwalrus\n"), TextStyle::Classic);
    let end = game_loop(&mut resumed, &mut interface, &save_path);
    assert_eq!(end, SessionEnd::Won);
    // "q" was already used before the save, so it cost nothing the second time
    assert_eq!(resumed.attempts_left(), 9);

    fs::remove_file(&save_path).unwrap();
}

#[test]
fn test_save_overwrites_previous_snapshot() {
    let save_path = temp_path("overwrite.json");

    let mut first = GameState::from_target("walrus");
    first.guess("a").unwrap();
    persistence::save(&first, &save_path).unwrap();

    let mut second = GameState::from_target("tunnel");
    second.guess("n").unwrap();
    second.guess("x").unwrap();
    persistence::save(&second, &save_path).unwrap();

    assert_eq!(persistence::load(&save_path).unwrap(), second);
    fs::remove_file(&save_path).unwrap();
}

#[test]
fn test_corrupt_and_missing_saves_are_distinguished() {
    let missing = temp_path("missing.json");
    let err = persistence::load(&missing).unwrap_err();
    assert!(err.is_io());

    let corrupt = temp_path("corrupt.json");
    fs::write(&corrupt, "{\"target\": 42}").unwrap();
    let err = persistence::load(&corrupt).unwrap_err();
    assert!(matches!(err, PersistError::Format { .. }));
    assert!(!err.is_io());

    let tampered = temp_path("tampered.json");
    let mut state = GameState::from_target("cat");
    state.guess("z").unwrap();
    persistence::save(&state, &tampered).unwrap();
    let json = fs::read_to_string(&tampered)
        .unwrap()
        .replace("\"attempts_left\": 9", "\"attempts_left\": 10");
    fs::write(&tampered, json).unwrap();
    let err = persistence::load(&tampered).unwrap_err();
    assert!(matches!(err, PersistError::Malformed { .. }), "{err:?}");

    fs::remove_file(&corrupt).unwrap();
    fs::remove_file(&tampered).unwrap();
}

#[test]
fn test_empty_word_source_fails_before_game() {
    let words = load_wordbank_from_str("\n   \n123\n");
    assert!(words.is_empty());
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        GameState::new(&words, &mut rng),
        Err(GameError::EmptyWordSource)
    ));
}

#[test]
fn test_embedded_dictionary_game_invariants() {
    let words = load_dictionary(None).unwrap();
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::new(&words, &mut rng).unwrap();
        let len = state.target().chars().count();
        assert_eq!(state.revealed().len(), len);
        assert_ne!(state.target(), words.last().unwrap().as_str());

        let shown = state.revealed().iter().filter(|&&c| c != '_').count();
        assert!(shown >= (len / 2).saturating_sub(1));
        assert_eq!(state.attempts_left(), 10);
        assert_eq!(state.gallows_stage(), -1);
    }
}

#[test]
fn test_quit_token_does_not_save() {
    let save_path = temp_path("quit.json");
    let _ = fs::remove_file(&save_path);

    let mut state = GameState::from_target("walrus");
    let mut interface = CliInterface::new(Cursor::new("a\nQUIT\n"), TextStyle::Classic);
    let end = game_loop(&mut state, &mut interface, &save_path);

    assert_eq!(end, SessionEnd::Quit);
    assert!(!save_path.exists());
}
