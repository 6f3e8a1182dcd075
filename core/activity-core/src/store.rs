//! Namespaced key-value fallback store.
//!
//! The companion app writes last-known-good values for every tracked print
//! into one shared store; this module only reads. Keys are always scoped with
//! the activity instance id (`{instance}_{key}`) so concurrent activities
//! never see each other's values.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "values": {
//!     "abc-123_state": "printing",
//!     "abc-123_progress": 0.42
//!   }
//! }
//! ```
//!
//! # Defensive Loading
//!
//! The writer runs in another process, so we handle:
//! - Missing or empty files (empty store)
//! - Corrupt JSON (empty store, log warning)
//! - Unsupported versions (empty store, log warning)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fs_err as fs;
use print_activity_protocol::scoped_key;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ActivityError, Result};

const STORE_VERSION: u32 = 1;

/// One stored value. Untagged so the file stays plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl StoreValue {
    /// Reads the value as a string. Numbers and booleans are formatted.
    pub fn as_string(&self) -> Option<String> {
        match self {
            StoreValue::Text(s) => Some(s.clone()),
            StoreValue::Int(i) => Some(i.to_string()),
            StoreValue::Float(f) => Some(f.to_string()),
            StoreValue::Bool(b) => Some(b.to_string()),
        }
    }

    /// Reads the value as an integer. Floats truncate; numeric text parses.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StoreValue::Int(i) => Some(*i),
            StoreValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            StoreValue::Float(_) => None,
            StoreValue::Bool(b) => Some(i64::from(*b)),
            StoreValue::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
            }
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            StoreValue::Float(f) => Some(*f),
            StoreValue::Int(i) => Some(*i as f64),
            StoreValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            StoreValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoreValue::Bool(b) => Some(*b),
            StoreValue::Int(i) => Some(*i != 0),
            StoreValue::Float(f) => Some(*f != 0.0),
            StoreValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

/// Read access to the shared store by raw (already scoped) key.
///
/// Implementations must be safe to read from concurrent render passes.
pub trait KeyedStore: Send + Sync {
    fn value(&self, key: &str) -> Option<StoreValue>;

    /// Scoped view for one activity instance.
    fn instance<'a>(&'a self, instance_id: &'a str) -> InstanceStore<'a>
    where
        Self: Sized,
    {
        InstanceStore::new(self, instance_id)
    }
}

/// Typed, instance-scoped reads over a [`KeyedStore`].
#[derive(Clone, Copy)]
pub struct InstanceStore<'a> {
    store: &'a dyn KeyedStore,
    instance_id: &'a str,
}

impl<'a> InstanceStore<'a> {
    pub fn new(store: &'a dyn KeyedStore, instance_id: &'a str) -> Self {
        Self { store, instance_id }
    }

    pub fn instance_id(&self) -> &'a str {
        self.instance_id
    }

    pub fn get(&self, key: &str) -> Option<StoreValue> {
        self.store.value(&scoped_key(self.instance_id, key))
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_string())
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    pub fn get_double(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_double())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Reads a field documented as always present. Absent or blank is an error.
    pub fn require_string(&self, key: &str) -> Result<String> {
        match self.get_string(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ActivityError::missing(self.instance_id, key)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// In-memory store
// ═══════════════════════════════════════════════════════════════════════════════

/// Store backed by a plain map. Used for fixtures and FFI callers that hand
/// over the host's values directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, StoreValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: HashMap<String, StoreValue>) -> Self {
        Self { values }
    }

    /// Writes a raw key. Real writers live outside this crate.
    pub fn insert(&mut self, key: impl Into<String>, value: StoreValue) {
        self.values.insert(key.into(), value);
    }

    /// Writes `key` scoped to `instance_id`.
    pub fn insert_scoped(&mut self, instance_id: &str, key: &str, value: StoreValue) {
        self.values.insert(scoped_key(instance_id, key), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys stored for one instance, with the prefix stripped.
    pub fn keys_for(&self, instance_id: &str) -> Vec<String> {
        let prefix = scoped_key(instance_id, "");
        let mut keys: Vec<String> = self
            .values
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect();
        keys.sort();
        keys
    }
}

impl KeyedStore for MemoryStore {
    fn value(&self, key: &str) -> Option<StoreValue> {
        self.values.get(key).cloned()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// File-backed store
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    values: HashMap<String, StoreValue>,
}

/// Read-only snapshot of the on-disk store.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: MemoryStore,
    file_path: PathBuf,
}

impl FileStore {
    /// A store with no values, still remembering where it would live.
    pub fn empty(file_path: &Path) -> Self {
        FileStore {
            inner: MemoryStore::new(),
            file_path: file_path.to_path_buf(),
        }
    }

    pub fn load(file_path: &Path) -> Result<Self> {
        let empty = || FileStore::empty(file_path);

        if !file_path.exists() {
            debug!(path = %file_path.display(), "Store file not found, using empty store");
            return Ok(empty());
        }

        let content = fs::read_to_string(file_path).map_err(|source| ActivityError::Io {
            context: format!("reading store file {}", file_path.display()),
            source,
        })?;

        if content.trim().is_empty() {
            warn!(path = %file_path.display(), "Empty store file, returning empty store");
            return Ok(empty());
        }

        match serde_json::from_str::<StoreFile>(&content) {
            Ok(file) if file.version == STORE_VERSION => Ok(FileStore {
                inner: MemoryStore::from_values(file.values),
                file_path: file_path.to_path_buf(),
            }),
            Ok(file) => {
                warn!(
                    version = file.version,
                    expected = STORE_VERSION,
                    "Unsupported store file version, returning empty store"
                );
                Ok(empty())
            }
            Err(err) => {
                warn!(error = %err, path = %file_path.display(), "Failed to parse store file, returning empty store");
                Ok(empty())
            }
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn as_memory(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyedStore for FileStore {
    fn value(&self, key: &str) -> Option<StoreValue> {
        self.inner.value(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_scoped("a", "state", StoreValue::Text("printing".into()));
        store.insert_scoped("a", "progress", StoreValue::Float(0.4));
        store.insert_scoped("b", "state", StoreValue::Text("paused".into()));
        store.insert_scoped("b", "eta", StoreValue::Int(1_700_000_000));
        store
    }

    #[test]
    fn instances_do_not_collide() {
        let store = fixture();
        assert_eq!(
            store.instance("a").get_string("state").as_deref(),
            Some("printing")
        );
        assert_eq!(
            store.instance("b").get_string("state").as_deref(),
            Some("paused")
        );
        assert!(store.instance("a").get_int("eta").is_none());
        assert!(store.instance("c").get("state").is_none());
    }

    #[test]
    fn prefix_is_not_a_substring_match() {
        let mut store = MemoryStore::new();
        store.insert("ab_state", StoreValue::Text("error".into()));
        assert!(store.instance("a").get("state").is_none());
        assert!(store.instance("a").get("b_state").is_some());
        assert_eq!(store.keys_for("ab"), vec!["state".to_string()]);
    }

    #[test]
    fn numeric_reads_coerce() {
        let mut store = MemoryStore::new();
        store.insert_scoped("x", "progress", StoreValue::Int(1));
        store.insert_scoped("x", "eta", StoreValue::Float(1_700_000_000.9));
        store.insert_scoped("x", "text_num", StoreValue::Text(" 0.5 ".into()));
        store.insert_scoped("x", "flag", StoreValue::Int(0));
        let view = store.instance("x");
        assert_eq!(view.get_double("progress"), Some(1.0));
        assert_eq!(view.get_int("eta"), Some(1_700_000_000));
        assert_eq!(view.get_double("text_num"), Some(0.5));
        assert_eq!(view.get_bool("flag"), Some(false));
    }

    #[test]
    fn require_string_rejects_blank() {
        let mut store = MemoryStore::new();
        store.insert_scoped("x", "machine_name", StoreValue::Text("  ".into()));
        let err = store.instance("x").require_string("machine_name").unwrap_err();
        assert!(matches!(err, ActivityError::MissingRequiredField { ref field, .. } if field == "machine_name"));
    }

    #[test]
    fn load_round_trips_values() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("store.json");
        std::fs::write(
            &file,
            r#"{"version":1,"values":{"i_state":"complete","i_progress":0.2,"i_eta":0,"i_live":true}}"#,
        )
        .unwrap();

        let store = FileStore::load(&file).unwrap();
        let view = store.instance("i");
        assert_eq!(view.get_string("state").as_deref(), Some("complete"));
        assert_eq!(view.get_double("progress"), Some(0.2));
        assert_eq!(view.get_int("eta"), Some(0));
        assert_eq!(view.get_bool("live"), Some(true));
    }

    #[test]
    fn load_missing_file_returns_empty_store() {
        let temp = tempdir().unwrap();
        let store = FileStore::load(&temp.path().join("missing.json")).unwrap();
        assert!(store.as_memory().is_empty());
    }

    #[test]
    fn load_empty_file_returns_empty_store() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("empty.json");
        std::fs::write(&file, "").unwrap();
        assert!(FileStore::load(&file).unwrap().as_memory().is_empty());
    }

    #[test]
    fn load_corrupt_json_returns_empty_store() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("corrupt.json");
        std::fs::write(&file, "{invalid json}").unwrap();
        assert!(FileStore::load(&file).unwrap().as_memory().is_empty());
    }

    #[test]
    fn load_unsupported_version_returns_empty_store() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("v9.json");
        std::fs::write(&file, r#"{"version":9,"values":{"i_state":"printing"}}"#).unwrap();
        assert!(FileStore::load(&file).unwrap().as_memory().is_empty());
    }
}
