//! Generic key/value persistence.
//!
//! The controller only ever needs `get`/`set`/`remove` on string payloads, so
//! the storage engine stays behind this trait. [`JsonFileStore`] keeps one
//! file per key on disk; [`MemoryStore`] backs tests.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use uuid::Uuid;

use crate::error::AppResult;

/// Longest encoded key kept as a readable file name. Anything longer is
/// hashed so the name plus the `.json.tmp` suffix stays under 255 bytes.
const MAX_READABLE_NAME_BYTES: usize = 150;

/// Handle shared by every component that persists through the same store.
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

pub fn shared<S: KeyValueStore + 'static>(store: S) -> SharedStore {
    Rc::new(RefCell::new(store))
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&mut self, key: &str) -> AppResult<()>;
}

/// One `<percent-encoded key>.json` file per key under `root`. Long keys are
/// stored as `<uuid v5 of key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let encoded = utf8_percent_encode(key, NON_ALPHANUMERIC).to_string();
        let stem = if encoded.len() > MAX_READABLE_NAME_BYTES {
            Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes()).to_string()
        } else {
            encoded
        };
        self.root.join(format!("{stem}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.root)?;
        // Full replace through a temp file; readers never see a partial payload.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store. Also used when the data folder cannot be created.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        assert_eq!(store.get("loops:/a/b.mp4").unwrap(), None);
        store.set("loops:/a/b.mp4", "[1,2]").unwrap();
        assert_eq!(store.get("loops:/a/b.mp4").unwrap().as_deref(), Some("[1,2]"));

        store.set("loops:/a/b.mp4", "[3]").unwrap();
        assert_eq!(store.get("loops:/a/b.mp4").unwrap().as_deref(), Some("[3]"));

        store.remove("loops:/a/b.mp4").unwrap();
        assert_eq!(store.get("loops:/a/b.mp4").unwrap(), None);
    }

    #[test]
    fn long_keys_fit_in_a_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        let key = format!(
            "loops:/home/alice/Music/Guitar Lessons/{}/Lesson 3 - Comping (full).mp4",
            "Week 12 - Rhythm Changes and Altered Dominants ".repeat(4)
        );
        assert!(key.len() > 200);

        store.set(&key, "[1]").unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("[1]"));

        let other = format!("{key}.bak");
        assert_eq!(store.get(&other).unwrap(), None);

        for entry in fs::read_dir(dir.path()).unwrap() {
            assert!(entry.unwrap().file_name().len() < 100);
        }

        store.remove(&key).unwrap();
        assert_eq!(store.get(&key).unwrap(), None);
    }

    #[test]
    fn removing_missing_key_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn memory_store_basics() {
        let mut store = MemoryStore::default();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
