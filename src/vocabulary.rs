use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::GameError;

static VOCAB_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/vocab");

/// Word lists compiled into the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltinVocabulary {
    #[default]
    Python,
    PythonKeywords,
    Rust,
}

#[derive(Deserialize)]
struct VocabularyFile {
    name: String,
    words: Vec<String>,
}

/// Fixed, ordered and non-empty list of words to practise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    words: Vec<String>,
}

impl Vocabulary {
    /// Fails fast on an empty list or a blank word.
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Result<Self, GameError> {
        let name = name.into();
        if words.is_empty() {
            return Err(GameError::EmptyVocabulary(name));
        }
        if let Some(index) = words.iter().position(|w| w.trim().is_empty()) {
            return Err(GameError::BlankWord { name, index });
        }

        Ok(Self { name, words })
    }

    pub fn builtin(which: BuiltinVocabulary) -> Result<Self, GameError> {
        let file_name = format!("{which}.json");
        let file = VOCAB_DIR
            .get_file(&file_name)
            .ok_or_else(|| GameError::UnknownVocabulary(which.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| GameError::UnknownVocabulary(which.to_string()))?;

        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let file: VocabularyFile = serde_json::from_str(json)?;
        Self::new(file.name, file.words)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`, wrapping around the list.
    pub fn word(&self, index: usize) -> &str {
        &self.words[index % self.words.len()]
    }
}
