//! Read access to the session established by the preceding login step.
//!
//! The OTP step never writes the session; it only reads the token once per
//! submission and passes it through to the verification endpoint.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::warn;

/// Key under which the login step stores the session token.
pub const SESSION_TOKEN_KEY: &str = "sessionToken";

/// Key-value session storage.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Convenience accessor for [`SESSION_TOKEN_KEY`].
    fn session_token(&self) -> Option<String> {
        self.get(SESSION_TOKEN_KEY)
    }
}

/// In-process session storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding just a session token (absent when `token` is `None`).
    pub fn with_token(token: Option<String>) -> Self {
        let store = Self::new();
        if let Some(token) = token {
            store.set(SESSION_TOKEN_KEY, token);
        }
        store
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), value.into());
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

/// Session storage backed by a JSON object on disk.
///
/// The file is re-read on every lookup so a token written after start-up is
/// picked up by the next submission. A missing or malformed file reads as an
/// empty session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<HashMap<String, serde_json::Value>> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed session file");
                None
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read()?.remove(key)? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_token() {
        let store = MemorySessionStore::with_token(Some("tok-1".to_string()));
        assert_eq!(store.session_token().as_deref(), Some("tok-1"));
        store.remove(SESSION_TOKEN_KEY);
        assert_eq!(store.session_token(), None);
        assert_eq!(MemorySessionStore::with_token(None).session_token(), None);
    }

    #[test]
    fn file_store_reads_fresh_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        assert_eq!(store.session_token(), None);

        std::fs::write(&path, r#"{"sessionToken": "abc", "user": "x"}"#).unwrap();
        assert_eq!(store.session_token().as_deref(), Some("abc"));

        std::fs::write(&path, r#"{"sessionToken": "def"}"#).unwrap();
        assert_eq!(store.session_token().as_deref(), Some("def"));
    }

    #[test]
    fn file_store_treats_garbage_and_null_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(store.session_token(), None);

        std::fs::write(&path, r#"{"sessionToken": null}"#).unwrap();
        assert_eq!(store.session_token(), None);
    }
}
