use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

const CONFIG_FILE_NAME: &str = ".code-push.config";
const CONFIG_PATH_ENV: &str = "CODE_PUSH_CONFIG";

/// The persisted record of a validated login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_key_name: String,
    pub provider_name: String,
    pub provider_unique_id: String,
    pub server_url: String,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the per-user session path. `CODE_PUSH_CONFIG` wins, then
    /// `%LOCALAPPDATA%`, then the home directory.
    pub fn at_default_location() -> Option<Self> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Some(Self::new(path));
        }

        let dir = env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)?;

        Some(Self::new(dir.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the session. Missing or unreadable files count as logged out.
    pub fn load(&self) -> Option<Session> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no session file");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring malformed session file"
                );
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), CommandError> {
        let json = serde_json::to_string(session)?;

        fs::write(&self.path, json).map_err(|source| CommandError::SessionWrite {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(
            path = %self.path.display(),
            "login token persisted; run `code-push logout` to remove it"
        );
        Ok(())
    }

    /// Deletes the session file. Deleting an absent file succeeds.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "deleted session file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            access_key_name: "8".into(),
            provider_name: "github".into(),
            provider_unique_id: "42".into(),
            server_url: "https://example.test".into(),
        }
    }

    #[test]
    fn saved_session_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store.save(&session()).unwrap();

        assert_eq!(store.load(), Some(session()));
    }

    #[test]
    fn persisted_file_uses_camel_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"accessKeyName\":\"8\""));
        assert!(raw.contains("\"serverUrl\":\"https://example.test\""));
    }

    #[test]
    fn missing_or_malformed_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load(), None);

        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("missing").join("session.json"));

        let err = store.save(&session()).unwrap_err();
        assert!(matches!(err, CommandError::SessionWrite { .. }));
    }
}
