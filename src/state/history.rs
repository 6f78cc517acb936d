use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One recently opened video, as shown on the history tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub display_name: String,
    /// Resolved file reference; doubles as the video key.
    pub file_ref: String,
    /// Playable handle for this session only.
    #[serde(skip)]
    pub media_url: Option<String>,
    pub last_opened: DateTime<Utc>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub loop_count: Option<usize>,
    #[serde(default)]
    pub chapter_count: Option<usize>,
    #[serde(default)]
    pub thumbnail: Option<PathBuf>,
}

impl HistoryEntry {
    pub fn new(file_ref: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            file_ref: file_ref.into(),
            media_url: None,
            last_opened: Utc::now(),
            duration: None,
            loop_count: None,
            chapter_count: None,
            thumbnail: None,
        }
    }
}

/// Cached figures pushed to the history list after a video changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryUpdate {
    pub file_ref: String,
    pub display_name: String,
    pub duration: Option<f64>,
    pub loop_count: Option<usize>,
    pub chapter_count: Option<usize>,
    /// Set when the video was just opened, so `last_opened` gets bumped.
    pub opened: bool,
}
