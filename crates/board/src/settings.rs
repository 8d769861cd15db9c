// ABOUTME: User preferences stored as TOML: appearance, board list and network options.
// ABOUTME: Missing files and missing keys fall back to defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boards::BoardList;
use crate::error::BoardError;
use crate::options::{ClientBuilder, DEFAULT_USER_AGENT};
use crate::url_utils::{DEFAULT_BASE_URL, DEFAULT_POST_URL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub font: String,
    pub boards: BoardList,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub base_url: String,
    pub post_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            font: "roboto".to_string(),
            boards: BoardList::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            base_url: DEFAULT_BASE_URL.to_string(),
            post_url: DEFAULT_POST_URL.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(BoardError::storage)?;
        toml::from_str(&raw).map_err(BoardError::storage)
    }

    pub fn save(&self, path: &Path) -> Result<(), BoardError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(BoardError::storage)?;
            }
        }
        let raw = toml::to_string_pretty(self).map_err(BoardError::storage)?;
        fs::write(path, raw).map_err(BoardError::storage)
    }

    /// A client builder configured from the network fields.
    pub fn client_builder(&self) -> ClientBuilder {
        ClientBuilder::new()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent)
            .base_url(&self.base_url)
            .post_url(&self.post_url)
    }

    pub fn board_list(&self) -> &BoardList {
        &self.boards
    }

    pub fn board_list_mut(&mut self) -> &mut BoardList {
        &mut self.boards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.font, "roboto");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "theme = \"dark\"\nboards = [\"g\", \"tv\"]\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.font, "roboto");
        assert_eq!(settings.boards.iter().collect::<Vec<_>>(), vec!["g", "tv"]);
        assert_eq!(settings.timeout_secs, 10);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let mut settings = Settings::default();
        settings.font = "mono".to_string();
        settings.board_list_mut().add("tv");
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_client_builder_uses_network_fields() {
        let settings = Settings {
            timeout_secs: 3,
            base_url: "http://localhost:8080".to_string(),
            ..Settings::default()
        };
        let client = settings.client_builder().build();
        assert_eq!(client.options().timeout, Duration::from_secs(3));
        assert_eq!(client.options().base_url, "http://localhost:8080");
    }
}
