//! Save and restore a [`GameState`] as a JSON snapshot.
//!
//! Saving writes a sibling `.tmp` file and renames it over the target, so a
//! failed save leaves any previous snapshot intact.

use crate::error::PersistError;
use crate::game_state::{GameState, MAX_ATTEMPTS, PLACEHOLDER, fold_letter, fold_word};
use crate::{debug_log, info_log};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk form of a game: the seven observable fields, nothing else.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Snapshot {
    target: String,
    revealed: String,
    attempts_left: i32,
    gallows_stage: i32,
    guessed_words: BTreeSet<String>,
    guessed_letters: BTreeSet<char>,
    last_guess_failed: bool,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            target: state.target().to_string(),
            revealed: state.revealed_word(),
            attempts_left: i32::from(state.attempts_left()),
            gallows_stage: i32::from(state.gallows_stage()),
            guessed_words: state.guessed_words().clone(),
            guessed_letters: state.guessed_letters().clone(),
            last_guess_failed: state.last_guess_failed(),
        }
    }
}

impl TryFrom<Snapshot> for GameState {
    type Error = String;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let target: Vec<char> = snapshot.target.chars().collect();
        let revealed: Vec<char> = snapshot.revealed.chars().collect();

        if target.is_empty() {
            return Err("target is empty".to_string());
        }
        if revealed.len() != target.len() {
            return Err(format!(
                "revealed has {} characters, target has {}",
                revealed.len(),
                target.len()
            ));
        }
        if let Some((shown, expected)) = revealed
            .iter()
            .zip(&target)
            .find(|&(&shown, &expected)| shown != PLACEHOLDER && !shown.eq_ignore_ascii_case(&expected))
        {
            return Err(format!("revealed '{shown}' where the target has '{expected}'"));
        }

        let max = i32::from(MAX_ATTEMPTS);
        if !(0..=max).contains(&snapshot.attempts_left) {
            return Err(format!("attempts_left {} out of range", snapshot.attempts_left));
        }
        if !(-1..max).contains(&snapshot.gallows_stage) {
            return Err(format!("gallows_stage {} out of range", snapshot.gallows_stage));
        }
        if snapshot.attempts_left + snapshot.gallows_stage != max - 1 {
            return Err(format!(
                "attempts_left {} and gallows_stage {} disagree",
                snapshot.attempts_left, snapshot.gallows_stage
            ));
        }

        if let Some(letter) = snapshot
            .guessed_letters
            .iter()
            .find(|&&letter| fold_letter(letter) != letter)
        {
            return Err(format!("guessed letter '{letter}' is not uppercase"));
        }
        if let Some(word) = snapshot
            .guessed_words
            .iter()
            .find(|word| word.chars().count() < 2 || fold_word(word) != **word)
        {
            return Err(format!("guessed word '{word}' is not a lowercase word"));
        }

        Ok(Self {
            target: snapshot.target,
            revealed,
            penalty: MAX_ATTEMPTS - snapshot.attempts_left as u8,
            guessed_words: snapshot.guessed_words,
            guessed_letters: snapshot.guessed_letters,
            last_guess_failed: snapshot.last_guess_failed,
        })
    }
}

/// Write `state` to `path`, creating parent directories as needed.
pub fn save(state: &GameState, path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(&Snapshot::from(state)).map_err(PersistError::Encode)?;
    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = tmp_path(path);
    debug_log!("save() - writing {}", tmp.display());
    fs::write(&tmp, json).map_err(write_err)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }
    info_log!("Game saved to {}", path.display());
    Ok(())
}

/// Read a snapshot back from `path`.
///
/// Missing or unreadable files give [`PersistError::Read`], content that does
/// not decode gives [`PersistError::Format`], and decoded content that breaks
/// the game invariants gives [`PersistError::Malformed`].
pub fn load(path: &Path) -> Result<GameState, PersistError> {
    let json = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: Snapshot = serde_json::from_str(&json).map_err(|source| PersistError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    let state = GameState::try_from(snapshot).map_err(|reason| PersistError::Malformed {
        path: path.to_path_buf(),
        reason,
    })?;
    info_log!("Game loaded from {}", path.display());
    Ok(state)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("save"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Outcome;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hangman_persist_{}_{name}", std::process::id()))
    }

    fn write_raw(name: &str, contents: &str) -> PathBuf {
        let path = temp_file(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const VALID: &str = r#"{
        "target": "cat",
        "revealed": "c__",
        "attempts_left": 8,
        "gallows_stage": 1,
        "guessed_words": ["dog"],
        "guessed_letters": ["C"],
        "last_guess_failed": true
    }"#;

    #[test]
    fn test_round_trip_fresh_game() {
        let mut rng = StdRng::seed_from_u64(11);
        let state = GameState::with_pre_reveal("skeleton", &mut rng);
        let path = temp_file("fresh.json");

        save(&state, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, state);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_round_trip_mid_game() {
        let mut state = GameState::from_target("Velvet");
        state.guess("v").unwrap();
        state.guess("x").unwrap();
        state.guess("vulture").unwrap();
        let path = temp_file("mid.json");

        save(&state, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.revealed_word(), "V__v__");
        assert_eq!(loaded.attempts_left(), 7);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_does_not_touch_state() {
        let mut state = GameState::from_target("cat");
        state.guess("a").unwrap();
        let before = state.clone();
        let path = temp_file("untouched.json");
        save(&state, &path).unwrap();
        assert_eq!(state, before);
        assert_eq!(state.guess("t"), Ok(Outcome::Continue));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = temp_file("nested_dir");
        let path = dir.join("deeper").join("save.json");
        save(&GameState::from_target("cat"), &path).unwrap();
        assert!(path.exists());
        assert!(!tmp_path(&path).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_save_keeps_previous_snapshot() {
        // A directory sitting at the target path makes the final rename fail.
        let dir = temp_file("blocked");
        fs::create_dir_all(&dir).unwrap();
        let err = save(&GameState::from_target("cat"), &dir).unwrap_err();
        assert!(err.is_io());
        assert!(dir.is_dir());
        assert!(!tmp_path(&dir).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(&temp_file("does_not_exist.json")).unwrap_err();
        assert!(matches!(err, PersistError::Read { .. }));
    }

    #[test]
    fn test_load_valid_handwritten_snapshot() {
        let path = write_raw("valid.json", VALID);
        let state = load(&path).unwrap();
        assert_eq!(state.revealed_word(), "c__");
        assert_eq!(state.gallows_stage(), 1);
        assert!(state.guessed_words().contains("dog"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_garbage_is_format_error() {
        let path = write_raw("garbage.json", "not json at all");
        assert!(matches!(load(&path), Err(PersistError::Format { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_field_is_format_error() {
        let path = write_raw("missing_field.json", r#"{"target": "cat", "revealed": "___"}"#);
        assert!(matches!(load(&path), Err(PersistError::Format { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_unknown_field_is_format_error() {
        let json = VALID.replacen('{', r#"{ "difficulty": 3,"#, 1);
        let path = write_raw("unknown_field.json", &json);
        assert!(matches!(load(&path), Err(PersistError::Format { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invariant_violations_are_malformed() {
        let cases = [
            ("length", VALID.replace(r#""revealed": "c__""#, r#""revealed": "c_""#)),
            ("sum", VALID.replace(r#""attempts_left": 8"#, r#""attempts_left": 9"#)),
            (
                "range",
                VALID
                    .replace(r#""attempts_left": 8"#, r#""attempts_left": -1"#)
                    .replace(r#""gallows_stage": 1"#, r#""gallows_stage": 10"#),
            ),
            ("letter case", VALID.replace(r#"["C"]"#, r#"["c"]"#)),
            ("word case", VALID.replace(r#"["dog"]"#, r#"["DOG"]"#)),
            ("reveal mismatch", VALID.replace(r#""revealed": "c__""#, r#""revealed": "x__""#)),
            ("empty target", VALID.replace(r#""target": "cat""#, r#""target": """#)),
        ];
        for (name, json) in cases {
            let path = write_raw(&format!("malformed_{}.json", name.replace(' ', "_")), &json);
            let result = load(&path);
            assert!(
                matches!(result, Err(PersistError::Malformed { .. })),
                "{name}: {result:?}"
            );
            let _ = fs::remove_file(&path);
        }
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(
            tmp_path(Path::new("dir/save.json")),
            PathBuf::from("dir/save.json.tmp")
        );
    }
}
