//! Identity of the video currently loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Persistence key for everything stored per video.
///
/// This is the resolved file reference, not a content hash: two files that
/// resolve to the same path are the same video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoKey(String);

impl VideoKey {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Resolve a path to its canonical form, falling back to the path as given.
    pub fn from_path(path: &Path) -> Self {
        let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Self(resolved.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which this video's loop collection is stored.
    pub fn loops_storage_key(&self) -> String {
        format!("loops:{}", self.0)
    }
}

impl fmt::Display for VideoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The "current video" pair handed over by file selection: something the
/// media element can play plus, when available, a path tools can open.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSource {
    pub key: VideoKey,
    /// Resolvable file on disk. `None` for in-memory handles.
    pub file_path: Option<PathBuf>,
    /// Playable handle for the media element.
    pub media_url: String,
    pub display_name: String,
}

impl VideoSource {
    pub fn from_file(path: &Path, media_url: impl Into<String>) -> Self {
        let key = VideoKey::from_path(path);
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| key.as_str().to_string());
        Self {
            file_path: Some(PathBuf::from(key.as_str())),
            key,
            media_url: media_url.into(),
            display_name,
        }
    }

    /// A playable handle with no file behind it (e.g. a blob URL).
    pub fn from_handle(media_url: impl Into<String>, display_name: impl Into<String>) -> Self {
        let media_url = media_url.into();
        Self {
            key: VideoKey::new(media_url.clone()),
            file_path: None,
            media_url,
            display_name: display_name.into(),
        }
    }
}
