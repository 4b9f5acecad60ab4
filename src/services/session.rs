use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::user::Session;
use crate::utils::token;

/// Persisted-session seam, backed by a small JSON file on disk.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<Session>;
    fn put(&self, session: &Session) -> Result<()>;
    fn clear(&self);
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::get_config().session_file.clone())
    }
}

impl SessionStore for FileSessionStore {
    /// A missing, malformed or expired session reads as no session at all;
    /// stale files are removed on the way out.
    fn get(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(_) => {
                self.clear();
                return None;
            }
        };
        if session.access_token.is_empty() || token::is_token_expired(&session.access_token) {
            tracing::info!("Stored session is expired, clearing");
            self.clear();
            return None;
        }
        Some(session)
    }

    fn put(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}
