//! Session state subsystem.
//!
//! # Data Flow
//! ```text
//! Authentication flows (outside this crate)
//!     → SessionStore::set(token / userId / patientId)
//!
//! Navigation guard
//!     → SessionStore::is_authenticated (reads `token`)
//!     → SessionStore::clear (public-route cleanup)
//! ```
//!
//! # Design Decisions
//! - The store is an injected capability, never ambient global state
//! - Only the three known keys exist; no structural relationship between them is enforced
//! - Store access is infallible from the caller's point of view

pub mod file;
pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Keys of the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKey {
    Token,
    UserId,
    PatientId,
}

impl SessionKey {
    pub const ALL: [SessionKey; 3] = [SessionKey::Token, SessionKey::UserId, SessionKey::PatientId];

    /// Storage key as written by the application.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::UserId => "userId",
            SessionKey::PatientId => "patientId",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of the session, also the on-disk layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
}

impl SessionSnapshot {
    pub fn get(&self, key: SessionKey) -> Option<&str> {
        match key {
            SessionKey::Token => self.token.as_deref(),
            SessionKey::UserId => self.user_id.as_deref(),
            SessionKey::PatientId => self.patient_id.as_deref(),
        }
    }

    pub fn slot_mut(&mut self, key: SessionKey) -> &mut Option<String> {
        match key {
            SessionKey::Token => &mut self.token,
            SessionKey::UserId => &mut self.user_id,
            SessionKey::PatientId => &mut self.patient_id,
        }
    }

    /// True when all three fields are absent.
    pub fn is_empty(&self) -> bool {
        SessionKey::ALL.iter().all(|k| self.get(*k).is_none())
    }
}

/// Key-value session storage (`get`, `set`, `remove`).
pub trait SessionStore {
    fn get(&self, key: SessionKey) -> Option<String>;

    fn set(&mut self, key: SessionKey, value: String);

    fn remove(&mut self, key: SessionKey);

    /// A session exists when `token` is present and non-empty.
    ///
    /// An empty string counts as absent, like a falsy browser storage value.
    fn is_authenticated(&self) -> bool {
        self.get(SessionKey::Token).is_some_and(|t| !t.is_empty())
    }

    /// Remove all three keys.
    fn clear(&mut self) {
        for key in SessionKey::ALL {
            self.remove(key);
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.get(SessionKey::Token),
            user_id: self.get(SessionKey::UserId),
            patient_id: self.get(SessionKey::PatientId),
        }
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self, key: SessionKey) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: SessionKey, value: String) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: SessionKey) {
        (**self).remove(key)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn snapshot(&self) -> SessionSnapshot {
        (**self).snapshot()
    }
}
