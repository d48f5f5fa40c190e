//! Startup errors. Keystrokes never produce errors; the validator handles them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A vocabulary must contain at least one word
    #[error("vocabulary '{0}' has no words")]
    EmptyVocabulary(String),

    /// Blank words could be completed without typing anything
    #[error("vocabulary '{name}' has a blank word at position {index}")]
    BlankWord { name: String, index: usize },

    #[error("unknown built-in vocabulary: {0}")]
    UnknownVocabulary(String),

    #[error("invalid vocabulary file: {0}")]
    VocabularyFormat(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("round length must be at least one second")]
    InvalidRoundLength,
}
