//! Label lookup. Localization itself happens on the host; the core only asks
//! for a string by `(instance_id, key)`.

use std::collections::HashMap;

use crate::store::{InstanceStore, KeyedStore};

pub trait LabelResolver: Send + Sync {
    /// Returns the localized label, or `None` if the host has none for `key`.
    fn resolve(&self, instance_id: &str, key: &str) -> Option<String>;
}

/// Labels the companion app persisted next to the instance's other values.
pub struct StoreLabels<'a> {
    store: &'a dyn KeyedStore,
}

impl<'a> StoreLabels<'a> {
    pub fn new(store: &'a dyn KeyedStore) -> Self {
        Self { store }
    }
}

impl LabelResolver for StoreLabels<'_> {
    fn resolve(&self, instance_id: &str, key: &str) -> Option<String> {
        InstanceStore::new(self.store, instance_id)
            .get_string(key)
            .filter(|label| !label.trim().is_empty())
    }
}

/// Fixed label table shared by every instance.
#[derive(Debug, Clone, Default)]
pub struct MapLabels {
    labels: HashMap<String, String>,
}

impl MapLabels {
    pub fn new(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }

    /// English labels for every state and field key.
    pub fn english() -> Self {
        let labels = [
            ("printing_label", "Printing"),
            ("paused_label", "Paused"),
            ("error_label", "Error"),
            ("complete_label", "Print done"),
            ("eta_label", "ETA"),
            ("remaining_label", "Remaining"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { labels }
    }
}

impl LabelResolver for MapLabels {
    fn resolve(&self, _instance_id: &str, key: &str) -> Option<String> {
        self.labels.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreValue};

    #[test]
    fn store_labels_are_scoped_per_instance() {
        let mut store = MemoryStore::new();
        store.insert_scoped("a", "paused_label", StoreValue::Text("Pausiert".into()));
        store.insert_scoped("b", "paused_label", StoreValue::Text("En pause".into()));

        let labels = StoreLabels::new(&store);
        assert_eq!(labels.resolve("a", "paused_label").as_deref(), Some("Pausiert"));
        assert_eq!(labels.resolve("b", "paused_label").as_deref(), Some("En pause"));
        assert!(labels.resolve("c", "paused_label").is_none());
    }

    #[test]
    fn blank_store_label_counts_as_missing() {
        let mut store = MemoryStore::new();
        store.insert_scoped("a", "eta_label", StoreValue::Text(String::new()));
        assert!(StoreLabels::new(&store).resolve("a", "eta_label").is_none());
    }

    #[test]
    fn english_table_covers_states() {
        let labels = MapLabels::english();
        for key in ["printing_label", "paused_label", "error_label", "complete_label"] {
            assert!(labels.resolve("any", key).is_some(), "missing {}", key);
        }
    }
}
