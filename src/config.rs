use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Where each remote call goes. The original deployment spreads its
/// endpoints over two hosts and two path prefixes, so routing is kept
/// entirely in configuration instead of at the call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    /// Primary service base, e.g. "http://127.0.0.1:8000"
    pub api_base: String,
    /// Alternate base used by the analyze page, e.g. "http://localhost:8010"
    pub analyze_base: String,
    pub login_path: String,
    pub register_path: String,
    pub text_path: String,
    /// Text analysis path on the alternate base.
    pub raw_text_path: String,
    /// Note the divergent "/api" (not "/api/v1") prefix.
    pub file_path: String,
    pub speech_path: String,
    pub health_path: String,
    /// Attach "Authorization: Bearer <token>" to analysis calls. The
    /// service currently treats them as public, so this defaults to off.
    pub attach_token: bool,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".into(),
            analyze_base: "http://localhost:8010".into(),
            login_path: "/api/v1/auth/login".into(),
            register_path: "/api/v1/auth/register".into(),
            text_path: "/api/v1/analyze".into(),
            raw_text_path: "/analyze".into(),
            file_path: "/api/analyze/upload".into(),
            speech_path: "/api/v1/analyze/speech".into(),
            health_path: "/api/v1/health".into(),
            attach_token: false,
        }
    }
}

impl Endpoints {
    pub fn login_url(&self) -> String {
        join(&self.api_base, &self.login_path)
    }

    pub fn register_url(&self) -> String {
        join(&self.api_base, &self.register_path)
    }

    pub fn text_url(&self) -> String {
        join(&self.api_base, &self.text_path)
    }

    pub fn raw_text_url(&self) -> String {
        join(&self.analyze_base, &self.raw_text_path)
    }

    pub fn file_url(&self) -> String {
        join(&self.api_base, &self.file_path)
    }

    pub fn speech_url(&self) -> String {
        join(&self.api_base, &self.speech_path)
    }

    pub fn health_url(&self) -> String {
        join(&self.api_base, &self.health_path)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Directory: ~/.config/emotion-studio/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("emotion-studio");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from disk, returning defaults if file doesn't exist or is invalid.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = Self::dir();
        fs::create_dir_all(&dir)?;
        let data = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(), data)?;
        Ok(())
    }

    /// Write the config on first run so the endpoint routing is easy to
    /// find and edit.
    pub fn ensure_saved(&self) -> Result<(), Box<dyn std::error::Error>> {
        if Self::path().exists() {
            return Ok(());
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routing_matches_deployment() {
        let ep = Endpoints::default();
        assert_eq!(ep.login_url(), "http://127.0.0.1:8000/api/v1/auth/login");
        assert_eq!(ep.text_url(), "http://127.0.0.1:8000/api/v1/analyze");
        assert_eq!(ep.raw_text_url(), "http://localhost:8010/analyze");
        assert_eq!(ep.file_url(), "http://127.0.0.1:8000/api/analyze/upload");
        assert_eq!(
            ep.speech_url(),
            "http://127.0.0.1:8000/api/v1/analyze/speech"
        );
        assert!(!ep.attach_token);
    }

    #[test]
    fn join_tolerates_slashes() {
        assert_eq!(join("http://x/", "/a"), "http://x/a");
        assert_eq!(join("http://x", "a"), "http://x/a");
    }

    #[test]
    fn config_roundtrips_through_json() {
        let mut cfg = Config::default();
        cfg.endpoints.api_base = "https://emotions.example".into();
        cfg.endpoints.attach_token = true;
        let data = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&data).unwrap();
        assert_eq!(back.endpoints.api_base, "https://emotions.example");
        assert!(back.endpoints.attach_token);
    }
}
