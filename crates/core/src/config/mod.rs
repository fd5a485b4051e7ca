use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{library::EMOJI_CATALOG, MoodboardError, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub history: HistoryConfig,
    pub theme: Theme,
}

impl AppConfig {
    /// Reads a JSON configuration file. A missing file yields the defaults,
    /// omitted sections fall back to their own defaults. Values the
    /// generator cannot honour are rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;
        self.history.validate()
    }
}

/// Shape of a generated board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub color_count: usize,
    pub emoji_count: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            color_count: 5,
            emoji_count: 6,
        }
    }
}

impl BoardConfig {
    /// Emojis within a mood are distinct, so the catalog size bounds the row.
    pub fn validate(&self) -> Result<()> {
        if self.emoji_count > EMOJI_CATALOG.len() {
            return Err(MoodboardError::InvalidConfig(format!(
                "board.emoji_count is {} but the catalog only has {} emojis",
                self.emoji_count,
                EMOJI_CATALOG.len()
            )));
        }
        Ok(())
    }
}

/// Settings for the saved-mood history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            path: PathBuf::from("mood_history.json"),
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(MoodboardError::InvalidConfig(
                "history.capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Background fill used behind the board when it is exported.
    pub fn background(self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#0f172a",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.board.color_count, 5);
        assert_eq!(config.board.emoji_count, 6);
        assert_eq!(config.history.capacity, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "theme": "dark", "board": { "emoji_count": 4 } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.board.emoji_count, 4);
        assert_eq!(config.board.color_count, 5);
        assert_eq!(config.history, HistoryConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn rejects_values_the_generator_cannot_honour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        for raw in [
            r#"{ "board": { "emoji_count": 60 } }"#,
            r#"{ "history": { "capacity": 0 } }"#,
        ] {
            std::fs::write(&path, raw).unwrap();
            let err = AppConfig::load(&path).unwrap_err();
            assert!(
                matches!(err, MoodboardError::InvalidConfig(_)),
                "`{raw}` gave {err:?}"
            );
        }

        let full_row = format!(r#"{{ "board": {{ "emoji_count": {} }} }}"#, EMOJI_CATALOG.len());
        std::fs::write(&path, full_row).unwrap();
        assert_eq!(
            AppConfig::load(&path).unwrap().board.emoji_count,
            EMOJI_CATALOG.len()
        );
    }

    #[test]
    fn theme_backgrounds() {
        assert_eq!(Theme::Light.background(), "#ffffff");
        assert_eq!(Theme::Dark.background(), "#0f172a");
    }
}
