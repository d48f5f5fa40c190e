use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "pykeys";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("pykeys_config.json"))
    }

    /// The terminal owns stdout, so logs go to a file under the state dir
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("pykeys.log")
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|pd| pd.data_local_dir().join("pykeys.log"))
                .unwrap_or_else(|| PathBuf::from("pykeys.log"))
        }
    }
}
