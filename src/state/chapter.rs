use serde::{Deserialize, Serialize};

/// A chapter marker reported by the extraction tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    /// Start position in seconds
    pub start: f64,
    /// End position in seconds, when the container records one
    pub end: Option<f64>,
}
