//! Session persistence to a JSON file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::session::{SessionKey, SessionSnapshot, SessionStore};

/// A session store that survives restarts, like browser session storage
/// survives page reloads. Every mutation is written through to disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    snapshot: SessionSnapshot,
}

impl FileSessionStore {
    /// Open the store, loading the file if it exists.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let snapshot: SessionSnapshot = serde_json::from_reader(reader)?;
            tracing::debug!(path = %path.display(), "Loaded session from file");
            snapshot
        } else {
            SessionSnapshot::default()
        };
        Ok(Self { path, snapshot })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current session to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &self.snapshot)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to persist session");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.snapshot.get(key).map(str::to_string)
    }

    fn set(&mut self, key: SessionKey, value: String) {
        *self.snapshot.slot_mut(key) = Some(value);
        self.persist();
    }

    fn remove(&mut self, key: SessionKey) {
        if self.snapshot.slot_mut(key).take().is_some() {
            self.persist();
        }
    }

    fn clear(&mut self) {
        if !self.snapshot.is_empty() {
            self.snapshot = SessionSnapshot::default();
            self.persist();
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.clone()
    }
}
