//! SessionStore - 当前会话持久化
//!
//! Exactly one active session per terminal, persisted as a JSON record so
//! the operator stays logged in across restarts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Active operator session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    /// Raw role string from the auth record; validated by the navigation
    /// layer before any branch on it
    pub role: String,
    pub logged_in_at: i64,
}

impl Session {
    /// Build a session from the login response payload
    pub fn from_user(user: &shared::client::UserInfo) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            logged_in_at: shared::util::now_millis(),
        }
    }
}

/// 会话存储 - 文件位置: {work_dir}/auth/current_session.json
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            file_path: work_dir.join("auth/current_session.json"),
        }
    }

    /// Restore the persisted session, if any
    ///
    /// Fails soft: a missing, unreadable or malformed record is treated as
    /// "no session" and the broken file is cleared. Never raises.
    pub fn restore(&self) -> Option<Session> {
        if !self.file_path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&self.file_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session record, treating as logged out");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&content) {
            Ok(session) => {
                tracing::info!(username = %session.username, "Restored cached session");
                Some(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed session record, clearing");
                let _ = std::fs::remove_file(&self.file_path);
                None
            }
        }
    }

    /// Persist the session (called after a successful login)
    pub fn persist(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(username = %session.username, "Session saved");
        Ok(())
    }

    /// Clear the persisted session unconditionally; idempotent
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            tracing::debug!("Session cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session {
            user_id: 7,
            username: "asha".to_string(),
            role: "STAFF".to_string(),
            logged_in_at: 1754600000000,
        }
    }

    #[test]
    fn test_restore_without_record_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.restore().is_none());
    }

    #[test]
    fn test_persist_then_restore_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store.persist(&test_session()).unwrap();
        let restored = store.restore().expect("session should restore");
        assert_eq!(restored.user_id, 7);
        assert_eq!(restored.username, "asha");
        assert_eq!(restored.role, "STAFF");
    }

    #[test]
    fn test_restore_corrupted_record_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let auth_dir = dir.path().join("auth");
        std::fs::create_dir_all(&auth_dir).unwrap();
        std::fs::write(auth_dir.join("current_session.json"), "{not json").unwrap();

        let store = SessionStore::new(dir.path());
        assert!(store.restore().is_none());
        // broken record is cleared so the next restore is clean
        assert!(!auth_dir.join("current_session.json").exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store.clear().unwrap();
        store.persist(&test_session()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.restore().is_none());
    }
}
