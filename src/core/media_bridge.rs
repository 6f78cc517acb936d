//! Message types exchanged with the `<video>` element's bridge script.
//!
//! The script reports element events as [`MediaEvent`]s; the controller's
//! media effects go back as [`MediaCommand`]s. Both sides are plain JSON.

use serde::{Deserialize, Serialize};

use crate::core::controller::{Command, Effect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaEventKind {
    Duration,
    Time,
    State,
    /// The element dropped its source.
    Emptied,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaEvent {
    pub kind: MediaEventKind,
    #[serde(default)]
    pub position: f64,
    /// `null` while the element has no finite duration.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub playing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaCommand {
    Seek { position: f64 },
    Play,
    Pause,
    /// Re-run the element's load cycle for an unchanged source.
    Reload,
}

impl MediaEvent {
    /// Controller commands carried by this notification.
    pub fn into_commands(self) -> Vec<Command> {
        match self.kind {
            MediaEventKind::Duration => vec![
                Command::DurationChanged(self.duration),
                Command::PositionChanged(self.position),
            ],
            MediaEventKind::Time => vec![Command::PositionChanged(self.position)],
            MediaEventKind::State => vec![
                Command::PlayStateChanged(self.playing),
                Command::PositionChanged(self.position),
            ],
            MediaEventKind::Emptied => vec![Command::PlayStateChanged(false)],
        }
    }
}

impl MediaCommand {
    /// The element-facing part of a controller effect, if any.
    pub fn from_effect(effect: &Effect) -> Option<Self> {
        match effect {
            Effect::Seek(position) => Some(Self::Seek {
                position: *position,
            }),
            Effect::SetPlaying(true) => Some(Self::Play),
            Effect::SetPlaying(false) => Some(Self::Pause),
            _ => None,
        }
    }
}
