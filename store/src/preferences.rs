//! Key/value preference storage used for the active theme selection.
//!
//! The theme applier only needs single-key reads and batched writes, so the
//! [`PreferenceStore`] trait keeps to that. Two implementations ship with the
//! crate: [`MemoryPreferenceStore`] for embedding and tests, and
//! [`JsonPreferenceStore`] which keeps one JSON object on disk.

use crate::error::{ThemeError, ThemeResult};
use crate::persist::write_atomic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Stable preference keys
pub mod keys {
    pub const PRIMARY: &str = "cPrimary";
    pub const ACCENT: &str = "cAccent";
    pub const BACKGROUND: &str = "cBackground";
    pub const BOTTOM_BACKGROUND: &str = "cBottomBackground";
    pub const BG_IMAGE: &str = "bgImage";
    pub const BG_IMAGE_BLURRING: &str = "bgImageBlurring";
    pub const NIGHT_MODE: &str = "nightMode";
}

/// A single stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl PrefValue {
    fn kind(&self) -> &'static str {
        match self {
            PrefValue::Bool(_) => "bool",
            PrefValue::Int(_) => "int",
            PrefValue::Str(_) => "string",
        }
    }
}

fn type_mismatch(key: &str, expected: &str, found: &PrefValue) -> ThemeError {
    ThemeError::Preference {
        key: key.to_string(),
        reason: format!("expected {expected}, found {}", found.kind()),
    }
}

/// Storage for scalar preferences.
///
/// Each individual call is atomic. `put_all` applies every entry in one
/// write so multi-field updates cannot be observed half done.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<PrefValue>;

    fn put_all(&mut self, entries: Vec<(String, PrefValue)>) -> ThemeResult<()>;

    fn remove(&mut self, key: &str) -> ThemeResult<()>;

    fn put(&mut self, key: &str, value: PrefValue) -> ThemeResult<()> {
        self.put_all(vec![(key.to_string(), value)])
    }

    fn get_int(&self, key: &str) -> ThemeResult<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(PrefValue::Int(v)) => Ok(Some(v)),
            Some(other) => Err(type_mismatch(key, "int", &other)),
        }
    }

    fn get_string(&self, key: &str) -> ThemeResult<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(PrefValue::Str(v)) => Ok(Some(v)),
            Some(other) => Err(type_mismatch(key, "string", &other)),
        }
    }

    fn get_bool(&self, key: &str) -> ThemeResult<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(PrefValue::Bool(v)) => Ok(Some(v)),
            Some(other) => Err(type_mismatch(key, "bool", &other)),
        }
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<BTreeMap<String, PrefValue>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, BTreeMap<String, PrefValue>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> BTreeMap<String, PrefValue> {
        self.values().clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values().get(key).cloned()
    }

    fn put_all(&mut self, entries: Vec<(String, PrefValue)>) -> ThemeResult<()> {
        let mut values = self.values();
        for (key, value) in entries {
            values.insert(key, value);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ThemeResult<()> {
        self.values().remove(key);
        Ok(())
    }
}

/// Preferences kept as one JSON object in a file.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
}

impl JsonPreferenceStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable one
    /// is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read_values(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable preferences: {e}");
            BTreeMap::new()
        });
        Self { path, values }
    }

    fn read_values(path: &Path) -> ThemeResult<BTreeMap<String, PrefValue>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).map_err(|e| ThemeError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ThemeError::Preference {
            key: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `values` and adopt them only once they are on disk.
    fn commit(&mut self, values: BTreeMap<String, PrefValue>) -> ThemeResult<()> {
        let json = serde_json::to_vec_pretty(&values).map_err(|e| ThemeError::Serialize {
            what: "preferences",
            source: e,
        })?;
        write_atomic(&self.path, &json)?;
        self.values = values;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn put_all(&mut self, entries: Vec<(String, PrefValue)>) -> ThemeResult<()> {
        let mut values = self.values.clone();
        values.extend(entries);
        self.commit(values)
    }

    fn remove(&mut self, key: &str) -> ThemeResult<()> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut values = self.values.clone();
        values.remove(key);
        self.commit(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters_reject_mismatched_values() {
        let mut store = MemoryPreferenceStore::new();
        store.put(keys::BG_IMAGE, PrefValue::Int(3)).unwrap();

        assert!(store.get_string(keys::BG_IMAGE).is_err());
        assert_eq!(store.get_int(keys::BG_IMAGE).unwrap(), Some(3));
        assert_eq!(store.get_bool(keys::NIGHT_MODE).unwrap(), None);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let mut store = MemoryPreferenceStore::new();
        let observer = store.clone();

        store
            .put(keys::NIGHT_MODE, PrefValue::Bool(false))
            .unwrap();

        assert_eq!(observer.get(keys::NIGHT_MODE), Some(PrefValue::Bool(false)));
    }

    #[test]
    fn test_json_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut store = JsonPreferenceStore::open(&path);
        store
            .put_all(vec![
                (keys::PRIMARY.to_string(), PrefValue::Int(0xFF11_2233)),
                (keys::BG_IMAGE.to_string(), PrefValue::Str("/tmp/bg.png".into())),
                (keys::NIGHT_MODE.to_string(), PrefValue::Bool(false)),
            ])
            .unwrap();
        store.remove(keys::BG_IMAGE).unwrap();

        let reopened = JsonPreferenceStore::open(&path);
        assert_eq!(reopened.get_int(keys::PRIMARY).unwrap(), Some(0xFF11_2233));
        assert_eq!(reopened.get_string(keys::BG_IMAGE).unwrap(), None);
        assert_eq!(reopened.get_bool(keys::NIGHT_MODE).unwrap(), Some(false));
    }

    #[test]
    fn test_json_store_starts_empty_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonPreferenceStore::open(&path);
        assert_eq!(store.get(keys::PRIMARY), None);
    }

    #[test]
    fn test_json_store_keeps_values_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = JsonPreferenceStore::open(blocker.join("preferences.json"));

        assert!(store.put(keys::NIGHT_MODE, PrefValue::Bool(true)).is_err());
        assert_eq!(store.get(keys::NIGHT_MODE), None);
    }
}
