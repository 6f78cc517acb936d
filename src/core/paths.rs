use directories::ProjectDirs;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "PracticeLooper";
const DATA_DIR_ENV: &str = "PRACTICE_LOOPER_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
struct AppDirs {
    data: PathBuf,
    cache: PathBuf,
}

impl AppDirs {
    /// Everything under one folder, cache included.
    fn under(root: PathBuf) -> Self {
        Self {
            cache: root.join("cache"),
            data: root,
        }
    }
}

fn resolve_dirs(override_dir: Option<String>) -> AppDirs {
    if let Some(dir) = override_dir.filter(|dir| !dir.trim().is_empty()) {
        return AppDirs::under(PathBuf::from(dir));
    }
    match ProjectDirs::from("", "", APP_DIR_NAME) {
        Some(dirs) => AppDirs {
            data: dirs.data_dir().to_path_buf(),
            cache: dirs.cache_dir().to_path_buf(),
        },
        None => {
            tracing::warn!("No home directory; keeping data in the temp folder");
            AppDirs::under(std::env::temp_dir().join(APP_DIR_NAME))
        }
    }
}

fn app_dirs() -> AppDirs {
    resolve_dirs(std::env::var(DATA_DIR_ENV).ok())
}

/// Root folder for settings, persisted loops and history.
pub fn app_data_root() -> PathBuf {
    app_dirs().data
}

/// Folder backing the key/value store.
pub fn store_root() -> PathBuf {
    app_data_root().join("store")
}

pub fn app_cache_root() -> PathBuf {
    app_dirs().cache
}

pub fn settings_path() -> PathBuf {
    app_data_root().join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_keeps_everything_in_one_folder() {
        let dirs = resolve_dirs(Some("/srv/looper".into()));
        assert_eq!(dirs.data, PathBuf::from("/srv/looper"));
        assert_eq!(dirs.cache, PathBuf::from("/srv/looper/cache"));
    }

    #[test]
    fn blank_override_uses_platform_folders() {
        let dirs = resolve_dirs(Some("  ".into()));
        assert_eq!(dirs, resolve_dirs(None));
        assert_ne!(dirs.data, PathBuf::from("  "));
        assert!(dirs.data.is_absolute());
    }
}
