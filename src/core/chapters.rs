//! Chapter detection through `ffprobe`, and the bridge that feeds the results
//! into the UI.
//!
//! Detection is asynchronous and may be re-run at any time. There is no way to
//! cancel a running probe, so every request carries a sequence tag and only a
//! completion carrying the latest tag is applied. Anything older is dropped.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

use crate::constants::DEFAULT_CHAPTER_LOOP_SPAN_SECONDS;
use crate::state::{Chapter, Loop, VideoSource};

#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("{0} was not found. Make sure FFmpeg is installed and on your PATH.")]
    ToolMissing(String),

    #[error("failed to launch ffprobe: {0}")]
    Launch(io::Error),

    #[error("ffprobe failed with {status}: {stderr}")]
    ProbeFailed { status: String, stderr: String },

    #[error("ffprobe produced output that is not valid UTF-8")]
    InvalidOutput,

    #[error("could not parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("chapter probe task failed: {0}")]
    Join(String),
}

/// Why a detection request never reached `ffprobe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DurationUnknown,
    TooShort,
    NoFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::DurationUnknown => "Video length not known yet",
            SkipReason::TooShort => "Video too short for chapters",
            SkipReason::NoFile => "No file on disk to scan",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChapterStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
    Skipped(SkipReason),
}

/// A probe the shell should run, tagged so its result can be matched later.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterRequest {
    pub tag: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ChapterBridge {
    chapters: Vec<Chapter>,
    status: ChapterStatus,
    latest_tag: u64,
    min_duration: f64,
}

impl ChapterBridge {
    /// `min_duration`: clips shorter than this (seconds) are never probed.
    pub fn new(min_duration: f64) -> Self {
        Self {
            chapters: Vec::new(),
            status: ChapterStatus::Idle,
            latest_tag: 0,
            min_duration,
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn status(&self) -> &ChapterStatus {
        &self.status
    }

    pub fn get(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    /// Start a fresh detection cycle for `source`. Any request still in flight
    /// is superseded, even when this one short-circuits.
    pub fn begin(&mut self, source: &VideoSource, duration: Option<f64>) -> Option<ChapterRequest> {
        self.latest_tag += 1;
        self.chapters.clear();

        let skip = match (duration, &source.file_path) {
            (None, _) => Some(SkipReason::DurationUnknown),
            (Some(d), _) if d < self.min_duration => Some(SkipReason::TooShort),
            (_, None) => Some(SkipReason::NoFile),
            _ => None,
        };
        if let Some(reason) = skip {
            tracing::debug!(video = %source.key, %reason, "Chapter scan skipped");
            self.status = ChapterStatus::Skipped(reason);
            return None;
        }

        let path = source.file_path.clone()?;
        self.status = ChapterStatus::Loading;
        tracing::info!(video = %source.key, tag = self.latest_tag, "Scanning for chapters");
        Some(ChapterRequest {
            tag: self.latest_tag,
            path,
        })
    }

    /// Apply a finished probe. Returns `false` when the result was stale.
    pub fn complete(&mut self, tag: u64, result: Result<Vec<Chapter>, ChapterError>) -> bool {
        if tag != self.latest_tag || self.status != ChapterStatus::Loading {
            tracing::debug!(tag, latest = self.latest_tag, "Dropping stale chapter result");
            return false;
        }
        match result {
            Ok(chapters) => {
                tracing::info!(count = chapters.len(), "Chapters detected");
                self.chapters = chapters;
                self.status = ChapterStatus::Success;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Chapter detection failed");
                self.chapters.clear();
                self.status = ChapterStatus::Error(err.to_string());
            }
        }
        true
    }

    /// Back to idle for a new video. In-flight results become stale.
    pub fn reset(&mut self) {
        self.latest_tag += 1;
        self.chapters.clear();
        self.status = ChapterStatus::Idle;
    }
}

/// Build a loop covering `chapter`. A missing or non-positive end becomes
/// `start + DEFAULT_CHAPTER_LOOP_SPAN_SECONDS`, kept inside the video when its
/// duration is known. A chapter starting at or past the end of the video
/// becomes the last span of the video instead.
pub fn promote_chapter_to_loop(chapter: &Chapter, duration: Option<f64>, color: &str) -> Loop {
    let mut start = chapter.start.max(0.0);
    let mut end = chapter
        .end
        .filter(|end| *end > start)
        .unwrap_or(start + DEFAULT_CHAPTER_LOOP_SPAN_SECONDS);
    if let Some(duration) = duration.filter(|d| d.is_finite() && *d > 0.0) {
        if start >= duration {
            start = (duration - DEFAULT_CHAPTER_LOOP_SPAN_SECONDS).max(0.0);
        }
        end = end.min(duration);
    }
    let name = match chapter.title.trim() {
        "" => chapter.id.as_str(),
        title => title,
    };
    Loop::new(name, start, end, color)
}

// ---------------------------------------------------------------------------
// ffprobe
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    chapters: Vec<ProbeChapter>,
}

#[derive(Debug, Deserialize)]
struct ProbeChapter {
    #[serde(default)]
    start_time: Option<serde_json::Value>,
    #[serde(default)]
    end_time: Option<serde_json::Value>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

fn seconds(value: Option<&serde_json::Value>) -> Option<f64> {
    let secs = match value? {
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        serde_json::Value::Number(number) => number.as_f64(),
        _ => None,
    };
    secs.filter(|secs| secs.is_finite())
}

/// Parse `ffprobe -print_format json -show_chapters` output.
pub fn parse_ffprobe_chapters(json: &str) -> Result<Vec<Chapter>, ChapterError> {
    let output: ProbeOutput = serde_json::from_str(json)?;
    let chapters = output
        .chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| {
            let title = chapter
                .tags
                .iter()
                .find(|(key, value)| key.eq_ignore_ascii_case("title") && !value.trim().is_empty())
                .map(|(_, value)| value.trim().to_string())
                .unwrap_or_else(|| format!("Chapter {}", index + 1));
            Chapter {
                id: format!("chapter-{index}"),
                title,
                start: seconds(chapter.start_time.as_ref()).unwrap_or(0.0),
                end: seconds(chapter.end_time.as_ref()),
            }
        })
        .collect();
    Ok(chapters)
}

fn launch_error(ffprobe: &Path, err: io::Error) -> ChapterError {
    if err.kind() == io::ErrorKind::NotFound {
        ChapterError::ToolMissing(ffprobe.display().to_string())
    } else {
        ChapterError::Launch(err)
    }
}

fn extract_chapters_blocking(ffprobe: &Path, file: &Path) -> Result<Vec<Chapter>, ChapterError> {
    tracing::debug!(file = %file.display(), "Running ffprobe");
    let output = Command::new(ffprobe)
        .args(["-v", "quiet", "-print_format", "json", "-show_chapters"])
        .arg(file)
        .output()
        .map_err(|err| launch_error(ffprobe, err))?;

    if !output.status.success() {
        return Err(ChapterError::ProbeFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| ChapterError::InvalidOutput)?;
    parse_ffprobe_chapters(&stdout)
}

/// Read the chapter table of `file` with the `ffprobe` binary at `ffprobe`.
pub async fn extract_chapters(ffprobe: PathBuf, file: PathBuf) -> Result<Vec<Chapter>, ChapterError> {
    tokio::task::spawn_blocking(move || extract_chapters_blocking(&ffprobe, &file))
        .await
        .map_err(|err| ChapterError::Join(err.to_string()))?
}

/// Check that `ffprobe` runs at all; returns its version line.
pub async fn check_ffprobe(ffprobe: PathBuf) -> Result<String, ChapterError> {
    tokio::task::spawn_blocking(move || {
        let output = Command::new(&ffprobe)
            .arg("-version")
            .output()
            .map_err(|err| launch_error(&ffprobe, err))?;
        if !output.status.success() {
            return Err(ChapterError::ProbeFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or("Unknown version").to_string())
    })
    .await
    .map_err(|err| ChapterError::Join(err.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_source() -> VideoSource {
        VideoSource::from_file(Path::new("/videos/set.mkv"), "/media/set")
    }

    fn intro() -> Chapter {
        Chapter {
            id: "c1".into(),
            title: "Intro".into(),
            start: 0.0,
            end: Some(30.0),
        }
    }

    #[test]
    fn parses_ffprobe_json() {
        let json = r#"{
            "chapters": [
                {"id": 0, "start_time": "0.000000", "end_time": "31.500000", "tags": {"title": "Intro"}},
                {"id": 1, "start_time": "31.500000", "end_time": "90.000000", "tags": {}},
                {"id": 2, "start_time": 90.0, "tags": {"TITLE": " Outro "}}
            ]
        }"#;
        let chapters = parse_ffprobe_chapters(json).unwrap();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].id, "chapter-0");
        assert_eq!(chapters[0].title, "Intro");
        assert_eq!(chapters[0].end, Some(31.5));
        assert_eq!(chapters[1].title, "Chapter 2");
        assert_eq!(chapters[2].title, "Outro");
        assert_eq!(chapters[2].start, 90.0);
        assert_eq!(chapters[2].end, None);
    }

    #[test]
    fn missing_chapters_key_is_empty() {
        assert!(parse_ffprobe_chapters("{}").unwrap().is_empty());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(parse_ffprobe_chapters("nope"), Err(ChapterError::Parse(_))));
    }

    #[test]
    fn promote_uses_chapter_bounds() {
        let lp = promote_chapter_to_loop(&intro(), Some(600.0), "#fff");
        assert_eq!(lp.name, "Intro");
        assert_eq!(lp.start, 0.0);
        assert_eq!(lp.end, 30.0);
    }

    #[test]
    fn promote_without_end_uses_default_span() {
        let chapter = Chapter {
            end: None,
            start: 100.0,
            ..intro()
        };
        let lp = promote_chapter_to_loop(&chapter, None, "#fff");
        assert_eq!(lp.end, 100.0 + DEFAULT_CHAPTER_LOOP_SPAN_SECONDS);

        let clipped = promote_chapter_to_loop(&chapter, Some(110.0), "#fff");
        assert_eq!(clipped.end, 110.0);
    }

    #[test]
    fn promote_past_video_end_stays_inside() {
        let chapter = Chapter {
            start: 130.0,
            end: Some(200.0),
            ..intro()
        };
        let lp = promote_chapter_to_loop(&chapter, Some(120.0), "#fff");
        assert_eq!((lp.start, lp.end), (120.0 - DEFAULT_CHAPTER_LOOP_SPAN_SECONDS, 120.0));

        let short = promote_chapter_to_loop(&chapter, Some(12.0), "#fff");
        assert_eq!((short.start, short.end), (0.0, 12.0));
    }

    #[test]
    fn short_or_fileless_videos_skip_probe() {
        let mut bridge = ChapterBridge::new(10.0);
        assert_eq!(bridge.begin(&file_source(), Some(4.0)), None);
        assert_eq!(bridge.status(), &ChapterStatus::Skipped(SkipReason::TooShort));

        let blob = VideoSource::from_handle("blob:xyz", "clip");
        assert_eq!(bridge.begin(&blob, Some(120.0)), None);
        assert_eq!(bridge.status(), &ChapterStatus::Skipped(SkipReason::NoFile));
        assert!(bridge.chapters().is_empty());

        assert_eq!(bridge.begin(&file_source(), None), None);
        assert_eq!(bridge.status(), &ChapterStatus::Skipped(SkipReason::DurationUnknown));
    }

    #[test]
    fn failure_then_rescan_success() {
        let mut bridge = ChapterBridge::new(10.0);
        let first = bridge.begin(&file_source(), Some(300.0)).unwrap();
        assert_eq!(bridge.status(), &ChapterStatus::Loading);
        assert!(bridge.complete(first.tag, Err(ChapterError::ToolMissing("ffprobe".into()))));
        assert!(bridge.chapters().is_empty());
        assert!(matches!(bridge.status(), ChapterStatus::Error(_)));

        let second = bridge.begin(&file_source(), Some(300.0)).unwrap();
        assert!(second.tag > first.tag);
        assert!(bridge.complete(second.tag, Ok(vec![intro()])));
        assert_eq!(bridge.status(), &ChapterStatus::Success);
        assert_eq!(bridge.chapters(), &[intro()]);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut bridge = ChapterBridge::new(10.0);
        let slow = bridge.begin(&file_source(), Some(300.0)).unwrap();
        let fast = bridge.begin(&file_source(), Some(300.0)).unwrap();

        assert!(bridge.complete(fast.tag, Ok(vec![intro()])));
        assert!(!bridge.complete(slow.tag, Ok(Vec::new())));
        assert_eq!(bridge.chapters().len(), 1);
    }

    #[test]
    fn reset_drops_in_flight_results() {
        let mut bridge = ChapterBridge::new(10.0);
        let request = bridge.begin(&file_source(), Some(300.0)).unwrap();
        bridge.reset();
        assert!(!bridge.complete(request.tag, Ok(vec![intro()])));
        assert_eq!(bridge.status(), &ChapterStatus::Idle);
        assert!(bridge.chapters().is_empty());
    }

    #[tokio::test]
    async fn missing_binary_reports_tool_missing() {
        let result = extract_chapters(
            PathBuf::from("ffprobe-that-does-not-exist"),
            PathBuf::from("/videos/set.mkv"),
        )
        .await;
        assert!(matches!(result, Err(ChapterError::ToolMissing(_))));

        let version = check_ffprobe(PathBuf::from("ffprobe-that-does-not-exist")).await;
        assert!(matches!(version, Err(ChapterError::ToolMissing(_))));
    }
}
