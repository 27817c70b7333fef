use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk shape of the stored session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSession {
    token: Option<String>,
}

/// Persistent holder for the bearer token issued at login. The token is
/// only used as a gate for the protected pages; it is attached to analysis
/// requests only when `Endpoints::attach_token` is enabled.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at ~/.local/share/emotion-studio/
    pub fn open_default() -> Self {
        let mut p = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("emotion-studio");
        Self::open(p)
    }

    /// Store rooted at an explicit directory. Tests point this at a temp dir.
    pub fn open(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("session.json")
    }

    /// Returns the stored token, or `None` when logged out or the file is
    /// missing/corrupt.
    pub fn get(&self) -> Option<String> {
        let data = fs::read_to_string(self.path()).ok()?;
        let session: StoredSession = serde_json::from_str(&data).ok()?;
        session.token
    }

    /// Persist a freshly issued token.
    pub fn set(&self, token: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.dir)?;
        let data = serde_json::to_string_pretty(&StoredSession {
            token: Some(token.to_string()),
        })?;
        fs::write(self.path(), data)?;
        Ok(())
    }

    /// Drop the token. A missing file already means logged out, so removal
    /// errors other than NotFound are surfaced.
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().to_path_buf());
        assert_eq!(store.get(), None);

        store.set("abc123").unwrap();
        assert_eq!(store.get(), Some("abc123".to_string()));
    }

    #[test]
    fn set_overwrites_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().to_path_buf());
        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get(), Some("second".to_string()));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().to_path_buf());
        store.clear().unwrap();

        store.set("tok").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().to_path_buf());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join("session.json"), "not json").unwrap();
        assert_eq!(store.get(), None);
    }
}
