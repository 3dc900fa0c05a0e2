//! Client configuration

use std::path::PathBuf;

/// Connection and storage settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend
    pub api_url: String,
    /// Location of the persisted session record
    pub session_file: PathBuf,
}

impl ClientConfig {
    pub fn new(api_url: String, session_file: PathBuf) -> Self {
        Self {
            api_url,
            session_file,
        }
    }

    pub fn from_env() -> Self {
        let api_url = std::env::var("SYLLABUS_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        let session_file = std::env::var("SYLLABUS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());
        Self::new(api_url, session_file)
    }
}

/// Default: `<platform data dir>/syllabus-client/session.json`
fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("syllabus-client")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_file_location() {
        let path = default_session_file();
        assert!(path.ends_with("syllabus-client/session.json"));
    }
}
