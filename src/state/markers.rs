//! Staging area for a loop that has been marked but not yet saved.
//!
//! A and B are independent: either can be set first, and either can be
//! overwritten at any time. They are only put in order when the loop is
//! committed, so marking B before A never forces a re-mark.

use crate::error::ValidationError;

/// Where the A/B workflow currently stands. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPhase {
    Empty,
    HasStart,
    HasEnd,
    ReadyToCommit,
    Naming,
}

/// A validated commit, ready to become a [`crate::state::Loop`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLoop {
    pub name: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TempMarkers {
    pub pending_start: Option<f64>,
    pub pending_end: Option<f64>,
    naming: bool,
    message: Option<String>,
}

impl TempMarkers {
    pub fn phase(&self) -> MarkerPhase {
        match (self.pending_start, self.pending_end, self.naming) {
            (Some(_), Some(_), true) => MarkerPhase::Naming,
            (Some(_), Some(_), false) => MarkerPhase::ReadyToCommit,
            (Some(_), None, _) => MarkerPhase::HasStart,
            (None, Some(_), _) => MarkerPhase::HasEnd,
            (None, None, _) => MarkerPhase::Empty,
        }
    }

    pub fn mark_start(&mut self, time: f64) {
        self.pending_start = Some(time);
        self.message = None;
        tracing::debug!(time, "Marked loop start");
    }

    pub fn mark_end(&mut self, time: f64) {
        self.pending_end = Some(time);
        self.message = None;
        tracing::debug!(time, "Marked loop end");
    }

    pub fn is_ready(&self) -> bool {
        self.pending_start.is_some() && self.pending_end.is_some()
    }

    pub fn is_naming(&self) -> bool {
        self.phase() == MarkerPhase::Naming
    }

    /// Open the naming step. Returns `false` (and changes nothing) unless both
    /// points are set.
    pub fn request_commit(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.naming = true;
        self.message = None;
        true
    }

    /// Last validation failure, for display in the naming dialog.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Validate `name` against the pending pair. On success the markers reset
    /// to empty; on failure the naming step stays open with a message.
    pub fn confirm_name(&mut self, name: &str) -> Result<PendingLoop, ValidationError> {
        let (Some(a), Some(b)) = (self.pending_start, self.pending_end) else {
            return Err(ValidationError::NotNaming);
        };
        if !self.naming {
            return Err(ValidationError::NotNaming);
        }

        let trimmed = name.trim();
        let result = if trimmed.is_empty() {
            Err(ValidationError::EmptyName)
        } else if (a - b).abs() <= f64::EPSILON {
            Err(ValidationError::ZeroLength)
        } else {
            Ok(PendingLoop {
                name: trimmed.to_string(),
                start: a.min(b),
                end: a.max(b),
            })
        };

        match result {
            Ok(pending) => {
                self.cancel();
                Ok(pending)
            }
            Err(err) => {
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
