//! Bounded repeat playback.
//!
//! On every position update, once the playhead reaches the active loop's end
//! it is sent back to the loop's start. Position updates arrive at the media
//! element's reporting cadence (the bridge script polls every 50 ms while
//! playing), so playback may overshoot the end by up to one update. That
//! overshoot is accepted as is.

use uuid::Uuid;

use crate::state::Loop;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopPlayback {
    active: Option<Uuid>,
    looping: bool,
}

impl LoopPlayback {
    pub fn active_loop(&self) -> Option<Uuid> {
        self.active
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Seek target for this position, if the active loop has run past its end.
    pub fn on_position(&self, position: f64, loops: &[Loop]) -> Option<f64> {
        if !self.looping {
            return None;
        }
        let active = self.active?;
        let lp = loops.iter().find(|lp| lp.id == active)?;
        (position >= lp.end).then_some(lp.start)
    }

    /// Select `id`, engage looping and return the loop start to seek to.
    /// Unknown ids change nothing.
    pub fn activate(&mut self, id: Uuid, loops: &[Loop]) -> Option<f64> {
        let lp = loops.iter().find(|lp| lp.id == id)?;
        self.active = Some(id);
        self.looping = true;
        tracing::debug!(id = %id, start = lp.start, end = lp.end, "Loop activated");
        Some(lp.start)
    }

    /// Disengage looping. The playhead stays where it is.
    pub fn stop(&mut self) {
        if self.active.is_some() || self.looping {
            tracing::debug!("Loop stopped");
        }
        self.active = None;
        self.looping = false;
    }

    /// Called when a loop goes away; stops if it was the active one.
    pub fn forget(&mut self, id: Uuid) {
        if self.active == Some(id) {
            self.stop();
        }
    }
}
