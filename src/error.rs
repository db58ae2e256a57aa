use std::path::PathBuf;

/// Errors that prevent a game from starting.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("word source is empty")]
    EmptyWordSource,
}

/// Reasons a guess is refused without being evaluated.
///
/// None of these change the game state or consume an attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("empty guess")]
    Empty,

    #[error("'{0}' was already proposed")]
    AlreadyGuessed(String),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised while saving or restoring a session snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read save file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write save file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse save file {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("corrupt save file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to encode game state: {0}")]
    Encode(#[source] serde_json::Error),
}

impl PersistError {
    /// True for failures of the underlying file system rather than of the content.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}
