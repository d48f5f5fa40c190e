use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::error::GameError;
use crate::picker::Selection;
use crate::policy::Policy;
use crate::session::{SessionConfig, DEFAULT_ADVANCE_DELAY_MS, DEFAULT_ROUND_SECS};
use crate::vocabulary::{BuiltinVocabulary, Vocabulary};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub vocabulary: BuiltinVocabulary,
    /// Takes precedence over `vocabulary` when set
    pub words_file: Option<PathBuf>,
    pub policy: Policy,
    pub selection: Selection,
    pub round_secs: u32,
    pub advance_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: BuiltinVocabulary::default(),
            words_file: None,
            policy: Policy::default(),
            selection: Selection::default(),
            round_secs: DEFAULT_ROUND_SECS,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> Result<SessionConfig, GameError> {
        if self.round_secs == 0 {
            return Err(GameError::InvalidRoundLength);
        }

        Ok(SessionConfig {
            round_secs: self.round_secs,
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            policy: self.policy,
            selection: self.selection,
        })
    }

    pub fn load_vocabulary(&self) -> Result<Vocabulary, GameError> {
        match self.words_file {
            Some(ref path) => Vocabulary::from_path(path),
            None => Vocabulary::builtin(self.vocabulary),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring unreadable config {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            vocabulary: BuiltinVocabulary::Rust,
            words_file: Some(PathBuf::from("/tmp/words.json")),
            policy: Policy::Strict,
            selection: Selection::Sequential,
            round_secs: 60,
            advance_delay_ms: 0,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "policy": "lenient", "round_secs": 45 }"#).unwrap();

        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.policy, Policy::Lenient);
        assert_eq!(loaded.round_secs, 45);
        assert_eq!(loaded.selection, Selection::Random);
        assert_eq!(loaded.vocabulary, BuiltinVocabulary::Python);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn zero_round_length_rejected() {
        let cfg = Config {
            round_secs: 0,
            ..Config::default()
        };
        assert_matches!(cfg.session_config(), Err(GameError::InvalidRoundLength));
    }

    #[test]
    fn session_config_carries_settings() {
        let cfg = Config {
            policy: Policy::Strict,
            advance_delay_ms: 150,
            ..Config::default()
        };
        let sc = cfg.session_config().unwrap();
        assert_eq!(sc.policy, Policy::Strict);
        assert_eq!(sc.advance_delay, Duration::from_millis(150));
        assert_eq!(sc.round_secs, 30);
    }

    #[test]
    fn default_vocabulary_is_builtin_python() {
        let vocab = Config::default().load_vocabulary().unwrap();
        assert_eq!(vocab.name(), "python");
    }
}
