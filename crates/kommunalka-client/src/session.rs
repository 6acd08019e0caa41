use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use kommunalka_types::{UserId, UserStatus};

use crate::error::{ClientError, Result};

/// Identity the client holds between screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub phone: String,
    pub status: UserStatus,
}

/// Client-held identity storage injected into every screen.
///
/// Presence of a session is the only authorization signal the screens use.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<Session>>;

    fn set(&self, session: &Session) -> Result<()>;

    /// Forget every stored identity field.
    fn clear(&self) -> Result<()>;

    /// Update the stored status. A no-op when nobody is logged in.
    fn set_status(&self, status: UserStatus) -> Result<()> {
        match self.get()? {
            Some(mut session) => {
                session.status = status;
                self.set(&session)
            }
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.inner
            .lock()
            .map_err(|e| ClientError::Session(format!("session lock poisoned: {e}")))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    fn set(&self, session: &Session) -> Result<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Session persisted as a small JSON document holding `user_id`, `phone`
/// and `status`.
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
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ClientError::Session(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            ClientError::Session(format!("corrupt session file {}: {e}", self.path.display()))
        })
    }

    fn set(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Session(format!("cannot encode session: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| {
            ClientError::Session(format!("cannot write {}: {e}", self.path.display()))
        })?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(format!(
                "cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        Session {
            user_id: UserId::new("17"),
            phone: "+79991234567".into(),
            status: UserStatus::NewUser,
        }
    }

    #[test]
    fn memory_store_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get().unwrap(), None);

        store.set(&sample()).unwrap();
        store.set_status(UserStatus::OnboardingComplete).unwrap();
        let got = store.get().unwrap().unwrap();
        assert_eq!(got.status, UserStatus::OnboardingComplete);
        assert_eq!(got.user_id, UserId::new("17"));

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_status_without_session_does_nothing() {
        let store = MemorySessionStore::new();
        store.set_status(UserStatus::TrialActive).unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn file_store_persists_three_fields() {
        let dir = std::env::temp_dir().join(format!("kommunalka_session_test_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("session.json");
        let _ = std::fs::remove_file(&path);

        let store = FileSessionStore::new(&path);
        assert_eq!(store.get().unwrap(), None);

        store.set(&sample()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["user_id"], "17");
        assert_eq!(raw["phone"], "+79991234567");
        assert_eq!(raw["status"], "NEW_USER");

        // A fresh handle sees the same data.
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get().unwrap(), Some(sample()));

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(reopened.get().unwrap(), None);
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_a_session_error() {
        let dir = std::env::temp_dir().join(format!("kommunalka_corrupt_test_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileSessionStore::new(&path).get().unwrap_err();
        assert!(matches!(err, ClientError::Session(_)));
    }
}
