//! Saved planning defaults.
//!
//! Everything lives in one directory, `~/.crestplan/` unless a store is opened
//! elsewhere. A missing file means "no saved defaults"; an unreadable one is
//! logged and ignored so a bad edit never blocks planning.

use crate::constants::{CONFIG_DIR_NAME, OPTIONS_FILE};
use crate::planner::PlanOptions;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Store under the user's home directory.
    pub fn home() -> io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Ok(Self::at(home.join(CONFIG_DIR_NAME)))
    }

    /// Store rooted at `root`. Nothing is created until the first save.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Reads `filename`, or `None` when it does not exist or cannot be decoded.
    pub fn read<T: DeserializeOwned>(&self, filename: &str) -> Option<T> {
        let path = self.path(filename);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring unreadable {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Writes pretty JSON through a sibling temp file so a crash mid-write
    /// leaves the previous file intact.
    pub fn write<T: Serialize>(&self, filename: &str, value: &T) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let path = self.path(filename);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;
        log::debug!("saved {}", path.display());
        Ok(path)
    }

    /// Defaults saved by `--save-defaults`, or `PlanOptions::default()`.
    pub fn load_options(&self) -> PlanOptions {
        self.read(OPTIONS_FILE).unwrap_or_default()
    }

    pub fn save_options(&self, options: &PlanOptions) -> io::Result<PathBuf> {
        self.write(OPTIONS_FILE, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> ConfigStore {
        let root = std::env::temp_dir().join(format!("crestplan-{}-{}", name, std::process::id()));
        fs::remove_dir_all(&root).ok();
        ConfigStore::at(root)
    }

    #[test]
    fn test_home_store_uses_config_dir_name() {
        if let Ok(store) = ConfigStore::home() {
            assert!(store.root().ends_with(CONFIG_DIR_NAME));
            assert!(store.path(OPTIONS_FILE).ends_with(".crestplan/options.json"));
        }
    }

    #[test]
    fn test_missing_store_yields_defaults() {
        let store = scratch("missing");
        assert!(!store.root().exists());
        assert_eq!(store.load_options(), PlanOptions::default());
        assert!(!store.root().exists());
    }

    #[test]
    fn test_options_survive_save_and_load() {
        let store = scratch("options");
        let options = PlanOptions {
            drop_ceiling: Some(701),
            maximal: true,
        };
        let path = store.save_options(&options).expect("save should succeed");
        assert_eq!(path, store.path(OPTIONS_FILE));
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load_options(), options);
        fs::remove_dir_all(store.root()).ok();
    }

    #[test]
    fn test_partial_options_fill_in_defaults() {
        let store = scratch("partial");
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.path(OPTIONS_FILE), r#"{"maximal": true}"#).unwrap();
        let options = store.load_options();
        assert!(options.maximal);
        assert_eq!(options.drop_ceiling, None);
        fs::remove_dir_all(store.root()).ok();
    }

    #[test]
    fn test_corrupt_options_fall_back_to_defaults() {
        let store = scratch("corrupt");
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.path(OPTIONS_FILE), "{not json").unwrap();
        assert_eq!(store.load_options(), PlanOptions::default());
        fs::remove_dir_all(store.root()).ok();
    }
}
