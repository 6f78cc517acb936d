use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::state::VideoKey;

const THUMBNAIL_HEIGHT: u32 = 120;
/// Grab the frame this far into the video, capped at `THUMBNAIL_MAX_OFFSET_SECONDS`.
const THUMBNAIL_OFFSET_FRACTION: f64 = 0.1;
const THUMBNAIL_MAX_OFFSET_SECONDS: f64 = 10.0;

/// Produces one still per video for the history tab.
#[derive(Debug, Clone)]
pub struct Thumbnailer {
    // Limit concurrent ffmpeg processes
    semaphore: Arc<Semaphore>,
    ffmpeg: PathBuf,
    cache_root: PathBuf,
}

impl Thumbnailer {
    pub fn new(ffmpeg: PathBuf, cache_root: PathBuf) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            ffmpeg,
            cache_root: cache_root.join("thumbnails"),
        }
    }

    /// Where the thumbnail for `key` lives (whether or not it exists yet).
    pub fn thumbnail_path(&self, key: &VideoKey) -> PathBuf {
        let name = Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_str().as_bytes());
        self.cache_root.join(format!("{name}.jpg"))
    }

    /// Generate (or reuse) the thumbnail for `source`. Returns `None` on failure.
    pub async fn generate(&self, key: &VideoKey, source: &Path, duration: Option<f64>) -> Option<PathBuf> {
        let output = self.thumbnail_path(key);
        if output.exists() {
            return Some(output);
        }

        let Ok(_permit) = self.semaphore.acquire().await else {
            return None;
        };

        if let Err(err) = std::fs::create_dir_all(&self.cache_root) {
            tracing::warn!(error = %err, "Cannot create thumbnail cache");
            return None;
        }

        let offset = duration
            .map(|d| (d * THUMBNAIL_OFFSET_FRACTION).min(THUMBNAIL_MAX_OFFSET_SECONDS))
            .unwrap_or(0.0);
        let ffmpeg = self.ffmpeg.clone();
        let source = source.to_path_buf();
        let out = output.clone();
        let generated = tokio::task::spawn_blocking(move || {
            if !source.exists() {
                tracing::warn!(source = %source.display(), "Thumbnail source not found");
                return false;
            }

            let status = Command::new(&ffmpeg)
                .arg("-y")
                .arg("-v")
                .arg("error")
                .arg("-ss")
                .arg(format!("{offset:.3}"))
                .arg("-i")
                .arg(&source)
                .arg("-frames:v")
                .arg("1")
                .arg("-vf")
                .arg(format!("scale=-2:{}", THUMBNAIL_HEIGHT))
                .arg("-q:v")
                .arg("5")
                .arg(&out)
                .status();

            match status {
                Ok(s) if s.success() => true,
                _ => {
                    tracing::warn!(source = %source.display(), ?status, "Thumbnail generation failed");
                    false
                }
            }
        })
        .await
        .unwrap_or(false);

        generated.then_some(output)
    }
}
