//! In-process session store.

use std::collections::HashMap;

use crate::session::{SessionKey, SessionSnapshot, SessionStore};

/// Session store backed by a map. Lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: HashMap<SessionKey, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a snapshot.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let mut store = Self::new();
        for key in SessionKey::ALL {
            if let Some(value) = snapshot.get(key) {
                store.set(key, value.to_string());
            }
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.inner.get(&key).cloned()
    }

    fn set(&mut self, key: SessionKey, value: String) {
        self.inner.insert(key, value);
    }

    fn remove(&mut self, key: SessionKey) {
        self.inner.remove(&key);
    }
}
