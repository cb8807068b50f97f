//! Persisted map view state (center and zoom)
//!
//! The view lives under a single storage key as JSON. It is restored once
//! at plugin construction and overwritten on every view-change event;
//! malformed stored state is silently replaced by the defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Storage key the serialized view state lives under.
pub const VIEW_STATE_KEY: &str = "tabmap.map_view";

/// Map center and zoom, as persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewState {
    /// View center in map coordinates, `[x, y]`.
    pub center: [f64; 2],
    /// Zoom level; 2 shows a quarter of the world across.
    pub zoom: f64,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: 2.0,
        }
    }
}

/// Key-value storage seam for view-state persistence.
///
/// The application backs this with eframe's storage; tests and headless
/// hosts use [`MemoryStore`].
pub trait ViewStateStore {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
}

impl MapViewState {
    /// Restore from `store`, falling back to the defaults when the key is
    /// missing or holds malformed JSON.
    pub fn restore(store: &dyn ViewStateStore) -> Self {
        store
            .get(VIEW_STATE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Persist into `store`, overwriting whatever was there.
    pub fn persist(&self, store: &mut dyn ViewStateStore) {
        match serde_json::to_string(self) {
            Ok(raw) => store.set(VIEW_STATE_KEY, raw),
            Err(e) => tracing::warn!("failed to serialize view state: {}", e),
        }
    }
}

/// In-memory store for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewStateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}
