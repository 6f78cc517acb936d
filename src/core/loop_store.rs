//! Per-video loop collections.
//!
//! The collection for the current video lives in memory and is written back in
//! full on every mutation. Storage trouble never reaches the caller: reads
//! degrade to an empty collection and failed writes are logged while the
//! in-memory copy stays authoritative.

use uuid::Uuid;

use crate::core::store::SharedStore;
use crate::error::AppError;
use crate::state::{palette_color, Loop, VideoKey};

pub struct LoopStore {
    store: SharedStore,
    video: Option<VideoKey>,
    loops: Vec<Loop>,
}

impl LoopStore {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            video: None,
            loops: Vec::new(),
        }
    }

    /// Switch to `key` and load whatever was persisted for it.
    pub fn load_loops(&mut self, key: &VideoKey) -> &[Loop] {
        self.loops = self.read(key);
        self.video = Some(key.clone());
        tracing::debug!(video = %key, count = self.loops.len(), "Loops loaded");
        &self.loops
    }

    /// Forget the current video without touching storage.
    pub fn unload(&mut self) {
        self.video = None;
        self.loops.clear();
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn get(&self, id: Uuid) -> Option<&Loop> {
        self.loops.iter().find(|lp| lp.id == id)
    }

    /// Color for the next loop created in this collection.
    pub fn next_color(&self) -> &'static str {
        palette_color(self.loops.len())
    }

    pub fn add_loop(&mut self, lp: Loop) {
        tracing::debug!(id = %lp.id, name = %lp.name, start = lp.start, end = lp.end, "Loop added");
        self.loops.push(lp);
        self.persist();
    }

    /// Remove by id. Unknown ids are a no-op.
    pub fn delete_loop(&mut self, id: Uuid) -> Option<Loop> {
        let index = self.loops.iter().position(|lp| lp.id == id)?;
        let removed = self.loops.remove(index);
        tracing::debug!(id = %id, "Loop deleted");
        self.persist();
        Some(removed)
    }

    /// Replace the loop with `id` by a renamed copy. Returns `false` for unknown
    /// ids or blank names.
    pub fn rename_loop(&mut self, id: Uuid, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(slot) = self.loops.iter_mut().find(|lp| lp.id == id) else {
            return false;
        };
        *slot = slot.renamed(trimmed);
        self.persist();
        true
    }

    fn read(&self, key: &VideoKey) -> Vec<Loop> {
        let payload = match self.store.borrow().get(&key.loops_storage_key()) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(video = %key, error = %err, "Failed to read loops");
                return Vec::new();
            }
        };

        let loops: Vec<Loop> = match serde_json::from_str(&payload) {
            Ok(loops) => loops,
            Err(err) => {
                tracing::warn!(video = %key, error = %err, "Discarding unreadable loop data");
                return Vec::new();
            }
        };

        let total = loops.len();
        let valid: Vec<Loop> = loops
            .into_iter()
            .filter(|lp| lp.start >= 0.0 && lp.end > lp.start && !lp.name.trim().is_empty())
            .collect();
        if valid.len() != total {
            tracing::warn!(video = %key, dropped = total - valid.len(), "Dropped invalid loops");
        }
        valid
    }

    fn persist(&self) {
        let Some(video) = &self.video else {
            tracing::warn!("No video loaded; loops kept in memory only");
            return;
        };
        let key = video.loops_storage_key();
        let result = if self.loops.is_empty() {
            self.store.borrow_mut().remove(&key)
        } else {
            serde_json::to_string(&self.loops)
                .map_err(AppError::from)
                .and_then(|json| self.store.borrow_mut().set(&key, &json))
        };
        if let Err(err) = result {
            tracing::error!(video = %video, error = %err, "Failed to save loops");
        }
    }
}
