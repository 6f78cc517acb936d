//! User settings, stored as `settings.json` in the app data folder.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::paths;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `ffprobe` executable; a bare name is looked up on `PATH`.
    pub ffprobe_path: PathBuf,
    pub ffmpeg_path: PathBuf,
    /// Videos shorter than this are not probed for chapters.
    pub min_chapter_probe_seconds: f64,
    pub history_limit: usize,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub generate_thumbnails: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            min_chapter_probe_seconds: 10.0,
            history_limit: 50,
            log_filter: "practice_looper=info,warn".to_string(),
            generate_thumbnails: true,
        }
    }
}

impl Settings {
    /// Load from the default location. Never fails: problems are logged and
    /// defaults used instead.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&paths::settings_path())
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let settings = Self::default();
                if let Err(err) = settings.save_to(path) {
                    tracing::warn!(path = %path.display(), error = %err, "Could not write default settings");
                }
                settings
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable settings");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> AppResult<Option<Self>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(Some(settings))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        if !self.min_chapter_probe_seconds.is_finite() || self.min_chapter_probe_seconds < 0.0 {
            return Err(AppError::Config(format!(
                "min_chapter_probe_seconds must be a non-negative number, got {}",
                self.min_chapter_probe_seconds
            )));
        }
        if self.history_limit == 0 {
            return Err(AppError::Config("history_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}
