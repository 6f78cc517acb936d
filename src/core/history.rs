//! Recently opened videos, shown on the history tab.
//!
//! Stored as one JSON list under [`HISTORY_KEY`], most recent first, capped
//! at the configured limit. Like the loop store, unreadable data degrades to
//! an empty list and failed writes are only logged.

use chrono::Utc;
use std::path::PathBuf;

use crate::core::store::SharedStore;
use crate::error::AppError;
use crate::state::{HistoryEntry, HistoryUpdate};

pub const HISTORY_KEY: &str = "history";

pub struct HistoryStore {
    store: SharedStore,
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl HistoryStore {
    pub fn load(store: SharedStore, limit: usize) -> Self {
        let entries = read_entries(&store);
        let mut history = Self {
            store,
            entries,
            limit: limit.max(1),
        };
        history.entries.sort_by(|a, b| b.last_opened.cmp(&a.last_opened));
        history.entries.truncate(history.limit);
        history
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn get(&self, file_ref: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.file_ref == file_ref)
    }

    /// Move `file_ref` to the front with a fresh timestamp, creating it if new.
    pub fn record_open(&mut self, file_ref: &str, display_name: &str) {
        let mut entry = match self.entries.iter().position(|entry| entry.file_ref == file_ref) {
            Some(index) => self.entries.remove(index),
            None => HistoryEntry::new(file_ref, display_name),
        };
        entry.display_name = display_name.to_string();
        entry.last_opened = Utc::now();
        self.entries.insert(0, entry);
        if self.entries.len() > self.limit {
            self.entries.truncate(self.limit);
        }
        self.persist();
    }

    /// Merge cached figures for a video. Unknown files are ignored unless the
    /// update marks a fresh open.
    pub fn apply(&mut self, update: &HistoryUpdate) {
        if update.opened {
            self.record_open(&update.file_ref, &update.display_name);
        }
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.file_ref == update.file_ref) else {
            return;
        };
        let mut changed = false;
        if update.duration.is_some() && entry.duration != update.duration {
            entry.duration = update.duration;
            changed = true;
        }
        if update.loop_count.is_some() && entry.loop_count != update.loop_count {
            entry.loop_count = update.loop_count;
            changed = true;
        }
        if update.chapter_count.is_some() && entry.chapter_count != update.chapter_count {
            entry.chapter_count = update.chapter_count;
            changed = true;
        }
        if changed {
            self.persist();
        }
    }

    pub fn set_thumbnail(&mut self, file_ref: &str, thumbnail: PathBuf) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.file_ref == file_ref) {
            entry.thumbnail = Some(thumbnail);
            self.persist();
        }
    }

    /// Remember the playable handle for this session (never persisted).
    pub fn set_media_url(&mut self, file_ref: &str, url: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.file_ref == file_ref) {
            entry.media_url = Some(url.to_string());
        }
    }

    pub fn remove(&mut self, file_ref: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.file_ref != file_ref);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(AppError::from)
            .and_then(|json| self.store.borrow_mut().set(HISTORY_KEY, &json));
        if let Err(err) = result {
            tracing::error!(error = %err, "Failed to save history");
        }
    }
}

fn read_entries(store: &SharedStore) -> Vec<HistoryEntry> {
    let payload = match store.borrow().get(HISTORY_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to read history");
            return Vec::new();
        }
    };
    serde_json::from_str(&payload).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Discarding unreadable history");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{shared, KeyValueStore, MemoryStore};

    #[test]
    fn record_open_moves_to_front() {
        let store = shared(MemoryStore::default());
        let mut history = HistoryStore::load(store, 10);
        history.record_open("/a.mp4", "a.mp4");
        history.record_open("/b.mp4", "b.mp4");
        history.record_open("/a.mp4", "a.mp4");

        let refs: Vec<&str> = history.entries().iter().map(|e| e.file_ref.as_str()).collect();
        assert_eq!(refs, vec!["/a.mp4", "/b.mp4"]);
    }

    #[test]
    fn limit_is_enforced() {
        let mut history = HistoryStore::load(shared(MemoryStore::default()), 2);
        history.record_open("/a.mp4", "a");
        history.record_open("/b.mp4", "b");
        history.record_open("/c.mp4", "c");
        assert_eq!(history.entries().len(), 2);
        assert!(history.get("/a.mp4").is_none());
    }

    #[test]
    fn stats_persist_but_handles_do_not() {
        let store = shared(MemoryStore::default());
        let mut history = HistoryStore::load(store.clone(), 10);
        history.apply(&HistoryUpdate {
            file_ref: "/a.mp4".into(),
            display_name: "a.mp4".into(),
            opened: true,
            ..Default::default()
        });
        history.set_media_url("/a.mp4", "/media/a");
        history.apply(&HistoryUpdate {
            file_ref: "/a.mp4".into(),
            duration: Some(125.0),
            loop_count: Some(3),
            chapter_count: Some(7),
            ..Default::default()
        });

        let reloaded = HistoryStore::load(store, 10);
        let entry = reloaded.get("/a.mp4").unwrap();
        assert_eq!(entry.duration, Some(125.0));
        assert_eq!(entry.loop_count, Some(3));
        assert_eq!(entry.chapter_count, Some(7));
        assert_eq!(entry.media_url, None);
    }

    #[test]
    fn updates_for_unknown_files_are_ignored() {
        let mut history = HistoryStore::load(shared(MemoryStore::default()), 10);
        history.apply(&HistoryUpdate {
            file_ref: "/ghost.mp4".into(),
            loop_count: Some(1),
            ..Default::default()
        });
        assert!(history.entries().is_empty());
    }

    #[test]
    fn corrupt_history_is_empty() {
        let store = shared(MemoryStore::default());
        store.borrow_mut().set(HISTORY_KEY, "[{]").unwrap();
        assert!(HistoryStore::load(store, 10).entries().is_empty());
    }

    #[test]
    fn remove_entry() {
        let mut history = HistoryStore::load(shared(MemoryStore::default()), 10);
        history.record_open("/a.mp4", "a");
        assert!(history.remove("/a.mp4"));
        assert!(!history.remove("/a.mp4"));
    }
}
