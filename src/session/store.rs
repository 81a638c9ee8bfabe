//! Session store implementations
//!
//! - [`MemorySessionStore`]: process-local, used by tests and ephemeral runs
//! - [`FileSessionStore`]: TOML file under the local data directory

use super::error::{SessionError, SessionResult};
use super::types::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Narrow read/write/clear interface over the persisted session
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when signed out
    fn get(&self) -> SessionResult<Option<Session>>;

    /// Replace the stored session
    fn set(&self, session: &Session) -> SessionResult<()>;

    /// Remove both token and display name
    fn clear(&self) -> SessionResult<()>;

    /// Current bearer token, if any
    fn token(&self) -> SessionResult<Option<String>> {
        Ok(self.get()?.map(|s| s.token))
    }

    /// Change the display name of an existing session
    ///
    /// Does nothing when signed out. Returns whether a session was updated.
    fn set_display_name(&self, name: &str) -> SessionResult<bool> {
        match self.get()? {
            Some(session) => {
                self.set(&Session::new(session.token, name))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================
// In-memory store
// ============================================

/// Session kept in process memory only
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> SessionResult<Option<Session>> {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .map_err(|e| SessionError::Lock(e.to_string()))
    }

    fn set(&self, session: &Session) -> SessionResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

// ============================================
// File-backed store
// ============================================

/// On-disk layout; key names are fixed
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    #[serde(rename = "userName", default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

/// Session persisted as a small TOML file
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

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.toml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> SessionResult<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let persisted: PersistedSession =
            toml::from_str(&content).map_err(|e| SessionError::Corrupt {
                path: self.path.clone(),
                error: e.to_string(),
            })?;

        if persisted.token.is_empty() {
            return Ok(None);
        }

        Ok(Some(Session {
            token: persisted.token,
            display_name: persisted.user_name.filter(|n| !n.is_empty()),
        }))
    }

    fn set(&self, session: &Session) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let persisted = PersistedSession {
            token: session.token.clone(),
            user_name: session.display_name.clone(),
            saved_at: Some(Utc::now()),
        };
        let content = toml::to_string(&persisted)?;

        // Write then rename so a crash never leaves a half-written token
        let tmp = self.temp_path();
        std::fs::write(&tmp, content).map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }

        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, "Session persisted");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get().unwrap(), None);

        store.set(&Session::new("abc", "Jane")).unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(store.token().unwrap(), None);
    }

    #[test]
    fn test_set_display_name_requires_session() {
        let store = MemorySessionStore::new();
        assert!(!store.set_display_name("Jane").unwrap());
        assert_eq!(store.get().unwrap(), None);

        store.set(&Session::token_only("abc")).unwrap();
        assert!(store.set_display_name("Jane Doe").unwrap());
        let session = store.get().unwrap().unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.display_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_file_store_missing_file_is_signed_out() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.toml"));
        assert_eq!(store.get().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");
        let store = FileSessionStore::new(&path);

        store.set(&Session::new("tok-1", "Jane")).unwrap();
        assert!(path.exists());
        assert!(!store.temp_path().exists());

        // A second handle on the same file sees the same session
        let other = FileSessionStore::new(&path);
        let session = other.get().unwrap().unwrap();
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.display_name.as_deref(), Some("Jane"));

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(other.get().unwrap(), None);
    }

    #[test]
    fn test_file_store_uses_fixed_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        let store = FileSessionStore::new(&path);
        store.set(&Session::new("tok-1", "Jane")).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("token = \"tok-1\""));
        assert!(raw.contains("userName = \"Jane\""));
        assert!(raw.contains("saved_at"));
    }

    #[test]
    fn test_file_store_reads_without_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "token = \"abc\"\n").unwrap();

        let session = FileSessionStore::new(&path).get().unwrap().unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.display_name, None);
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "not toml at all [").unwrap();

        let err = FileSessionStore::new(&path).get().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }
}
