//! Durable session persistence
//!
//! The session record survives process restarts as a single JSON file.
//! Storage is best-effort: the client must keep working when the file
//! cannot be written (read-only home, sandboxed runs), so failures are
//! logged and swallowed.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use super::session::AuthSession;

/// File-backed store for the persisted session record
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the persisted session.
    ///
    /// Returns the default (logged-out) session when the file is absent,
    /// unreadable, not valid JSON, or missing a required field. Never fails.
    pub fn load(&self) -> AuthSession {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return AuthSession::default(),
        };

        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("discarding unparseable session record: {}", e);
                self.clear();
                return AuthSession::default();
            }
        };

        if !is_valid_record(&value) {
            log::warn!("discarding session record with missing fields");
            self.clear();
            return AuthSession::default();
        }

        match serde_json::from_value(value) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("discarding malformed session record: {}", e);
                self.clear();
                AuthSession::default()
            }
        }
    }

    /// Overwrite the persisted session. Best-effort.
    pub fn save(&self, record: &AuthSession) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("cannot create session directory {:?}: {}", parent, e);
                return;
            }
        }

        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("cannot serialize session record: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, json) {
            log::warn!("cannot persist session record to {:?}: {}", self.path, e);
        }
    }

    /// Remove the persisted record entirely.
    ///
    /// Used on logout: an absent record and a defaulted record are distinct
    /// for the validity check in `load`.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("cannot remove session record {:?}: {}", self.path, e);
            }
        }
    }

    /// Bearer token of the persisted user, if any
    pub fn token(&self) -> Option<String> {
        self.load().user.map(|user| user.token)
    }
}

/// A stored record must carry all four session fields
fn is_valid_record(value: &Value) -> bool {
    match value.as_object() {
        Some(map) => {
            map.contains_key("user")
                && map.contains_key("isAuthenticated")
                && map.contains_key("isFetching")
                && map.contains_key("error")
        }
        None => false,
    }
}
