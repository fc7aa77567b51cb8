//! Session Store: key/value persistence for the token and display name.
//!
//! Written only by login and logout, read by every page when it is created.
//! [`MemoryStorage`] lives as long as the process; [`FileStorage`] keeps the
//! keys in the app's section of a JSON file until logout removes them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jobreview_core::{AppKind, Session};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value storage in the manner of browser session storage.
pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One object per app, keyed by app name, so both apps can share a file.
type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// Storage backed by one app's section of a JSON file on disk.
///
/// The section is rewritten on every change. Other sections are re-read
/// before each write and kept as found.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    app: AppKind,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open `app`'s section of the file at `path`. A missing file is an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>, app: AppKind) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = read_sections(&path)?
            .remove(&app.to_string())
            .unwrap_or_default();
        debug!(path = %path.display(), %app, keys = entries.len(), "opened session file");
        Ok(Self { path, app, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SessionError> {
        let mut sections = read_sections(&self.path)?;
        if self.entries.is_empty() {
            sections.remove(&self.app.to_string());
        } else {
            sections.insert(self.app.to_string(), self.entries.clone());
        }
        let text = serde_json::to_string_pretty(&sections)?;
        std::fs::write(&self.path, text).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn read_sections(path: &Path) -> Result<Sections, SessionError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Sections::new()),
        Err(source) => Err(SessionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// An app's view of its two storage keys.
pub struct SessionStore {
    app: AppKind,
    storage: Box<dyn Storage>,
}

impl SessionStore {
    pub fn new(app: AppKind, storage: Box<dyn Storage>) -> Self {
        Self { app, storage }
    }

    pub fn in_memory(app: AppKind) -> Self {
        Self::new(app, Box::new(MemoryStorage::new()))
    }

    pub fn app(&self) -> AppKind {
        self.app
    }

    /// The stored session, if a token is present. The display name defaults
    /// to empty.
    pub fn load(&self) -> Option<Session> {
        let token = self.storage.get(self.app.token_key())?;
        let name = self
            .storage
            .get(self.app.username_key())
            .unwrap_or_default();
        Some(Session { token, name })
    }

    pub fn save(&mut self, session: &Session) -> Result<(), SessionError> {
        self.storage.set(self.app.token_key(), &session.token)?;
        self.storage.set(self.app.username_key(), &session.name)?;
        info!(app = %self.app, user = %session.name, "session stored");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.storage.remove(self.app.token_key())?;
        self.storage.remove(self.app.username_key())?;
        info!(app = %self.app, "session cleared");
        Ok(())
    }
}
