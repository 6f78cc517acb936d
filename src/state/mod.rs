//! State management module
//!
//! Plain data for the practice controller:
//! - Loop: a named, repeatable interval
//! - Chapter: an externally detected marker
//! - TempMarkers: A/B points staged for the next loop
//! - HistoryEntry: a recently opened video
//! - VideoKey / VideoSource: identity of the current video

mod chapter;
mod history;
mod markers;
mod practice_loop;
mod video;
mod view;

pub use chapter::Chapter;
pub use history::{HistoryEntry, HistoryUpdate};
pub use markers::{MarkerPhase, PendingLoop, TempMarkers};
pub use practice_loop::{palette_color, Loop};
pub use video::{VideoKey, VideoSource};
pub use view::ViewTab;
