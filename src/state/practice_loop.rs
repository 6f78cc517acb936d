use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::LOOP_PALETTE;

/// A named, repeatable playback interval within one video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Loop {
    /// Unique identifier
    pub id: Uuid,
    /// User-facing label
    pub name: String,
    /// Start position in seconds
    pub start: f64,
    /// End position in seconds, always greater than `start` for committed loops
    pub end: f64,
    /// Hex color from [`LOOP_PALETTE`]
    pub color: String,
}

impl Loop {
    /// Create a loop from two points in any order.
    pub fn new(name: impl Into<String>, a: f64, b: f64, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start: a.min(b).max(0.0),
            end: a.max(b).max(0.0),
            color: color.into(),
        }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Copy of this loop under a new name. Id, bounds and color carry over.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Palette color for the loop created at position `index`.
pub fn palette_color(index: usize) -> &'static str {
    LOOP_PALETTE[index % LOOP_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_bounds() {
        let lp = Loop::new("Riff", 40.0, 10.0, "#fff");
        assert_eq!(lp.start, 10.0);
        assert_eq!(lp.end, 40.0);
        assert_eq!(lp.length(), 30.0);
    }

    #[test]
    fn renamed_keeps_identity() {
        let lp = Loop::new("Riff", 1.0, 2.0, "#fff");
        let renamed = lp.renamed("Bridge");
        assert_eq!(renamed.id, lp.id);
        assert_eq!(renamed.start, lp.start);
        assert_eq!(renamed.color, lp.color);
        assert_eq!(renamed.name, "Bridge");
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(palette_color(0), LOOP_PALETTE[0]);
        assert_eq!(palette_color(LOOP_PALETTE.len()), LOOP_PALETTE[0]);
        assert_eq!(palette_color(LOOP_PALETTE.len() + 2), LOOP_PALETTE[2]);
    }
}
