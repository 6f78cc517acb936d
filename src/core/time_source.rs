//! Mirror of the media element's clock.
//!
//! The element itself lives in the webview; this keeps the last position,
//! duration and play state it reported, and decides where a seek should land
//! before the command is sent back to it.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSource {
    position: f64,
    duration: Option<f64>,
    playing: bool,
}

impl TimeSource {
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Total length once metadata has loaded.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn on_position(&mut self, position: f64) {
        self.position = self.clamp(position);
    }

    pub fn on_duration(&mut self, duration: Option<f64>) {
        self.duration = duration.filter(|d| d.is_finite() && *d > 0.0);
        self.position = self.clamp(self.position);
    }

    pub fn on_play_state(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Clamp into `[0, duration]`. Only the lower bound applies while the
    /// duration is unknown.
    pub fn clamp(&self, time: f64) -> f64 {
        if !time.is_finite() {
            return if time == f64::INFINITY {
                self.duration.unwrap_or(0.0)
            } else {
                0.0
            };
        }
        let lower = time.max(0.0);
        match self.duration {
            Some(duration) => lower.min(duration),
            None => lower,
        }
    }

    /// Move to `time` and return where the element should actually seek.
    pub fn seek(&mut self, time: f64) -> f64 {
        self.position = self.clamp(time);
        tracing::debug!(position = self.position, "Seek");
        self.position
    }

    /// Flip play/pause and return the requested state.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// New source: back to zero, duration unknown, paused.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
