//! Configuration file management for the Workflowy client.
//!
//! Supports reading settings from `~/.config/workflowy/config.toml` and
//! credentials from `~/.config/workflowy/secret.json`. Environment variables
//! fill in whatever the files leave out.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use workflowy_core::{Result, WorkflowyError};

pub const DEFAULT_BASE_URL: &str = "https://workflowy.com";
pub const DEFAULT_CLIENT_VERSION: &str = "18";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "WORKFLOWY_BASE_URL";
pub const ENV_SESSION: &str = "WORKFLOWY_SESSION";
pub const ENV_USERNAME: &str = "WORKFLOWY_USERNAME";
pub const ENV_PASSWORD: &str = "WORKFLOWY_PASSWORD";

/// Returns the configuration directory: ~/.config/workflowy
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WorkflowyError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("workflowy"))
}

/// Connection settings from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WorkflowyConfig {
    /// Service root, without trailing slash.
    pub base_url: String,
    /// Protocol version sent on fetch and push-and-poll.
    pub client_version: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for WorkflowyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_version: DEFAULT_CLIENT_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl WorkflowyConfig {
    /// Loads ~/.config/workflowy/config.toml, falling back to defaults when
    /// the file does not exist. `WORKFLOWY_BASE_URL` overrides the base URL.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_dir()?.join("config.toml"))?;
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        Ok(config.normalized())
    }

    /// Loads a specific file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self
    }
}

/// Credentials from secret.json.
///
/// Never log the contents of this struct.
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(value: &Option<String>) -> &'static str {
            if value.is_some() { "<set>" } else { "<unset>" }
        }
        f.debug_struct("SecretConfig")
            .field("session", &mask(&self.session))
            .field("username", &self.username)
            .field("password", &mask(&self.password))
            .finish()
    }
}

impl SecretConfig {
    /// Path of the secret file: ~/.config/workflowy/secret.json
    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("secret.json"))
    }

    /// Loads secret.json, then fills missing values from the environment.
    ///
    /// Priority: secret.json > environment variables
    /// (`WORKFLOWY_SESSION`, `WORKFLOWY_USERNAME`, `WORKFLOWY_PASSWORD`).
    pub fn load() -> Result<Self> {
        let mut secrets = Self::load_from(&Self::default_path()?)?;
        secrets.fill_missing(|key| std::env::var(key).ok());
        Ok(secrets)
    }

    /// Loads a specific file; a missing file yields empty credentials.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            WorkflowyError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Fills unset fields using `lookup` (environment variable name -> value).
    pub fn fill_missing<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.session.is_none() {
            self.session = lookup(ENV_SESSION);
        }
        if self.username.is_none() {
            self.username = lookup(ENV_USERNAME);
        }
        if self.password.is_none() {
            self.password = lookup(ENV_PASSWORD);
        }
    }

    /// Writes the secrets to `path`, creating parent directories.
    ///
    /// On Unix the file is restricted to the owner (0600).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = WorkflowyConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, WorkflowyConfig::default());
        assert_eq!(config.base_url, "https://workflowy.com");
        assert_eq!(config.client_version, "18");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://localhost:8080/\"\ntimeout_secs = 5\n").unwrap();

        let config = WorkflowyConfig::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.client_version, DEFAULT_CLIENT_VERSION);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = WorkflowyConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, WorkflowyError::Serialization { ref format, .. } if format == "TOML"));
    }

    #[test]
    fn test_secret_file_takes_priority_over_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{ "session": "from-file" }"#).unwrap();

        let mut secrets = SecretConfig::load_from(&path).unwrap();
        secrets.fill_missing(|key| match key {
            ENV_SESSION => Some("from-env".to_string()),
            ENV_USERNAME => Some("user@example.com".to_string()),
            _ => None,
        });

        assert_eq!(secrets.session.as_deref(), Some("from-file"));
        assert_eq!(secrets.username.as_deref(), Some("user@example.com"));
        assert!(secrets.password.is_none());
    }

    #[test]
    fn test_save_and_reload_secrets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("secret.json");

        let secrets = SecretConfig {
            session: Some("token".to_string()),
            ..Default::default()
        };
        secrets.save_to(&path).unwrap();

        assert_eq!(SecretConfig::load_from(&path).unwrap(), secrets);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_debug_masks_secrets() {
        let secrets = SecretConfig {
            session: Some("token".to_string()),
            username: Some("me".to_string()),
            password: Some("hunter2".to_string()),
        };
        let rendered = format!("{secrets:?}");
        assert!(!rendered.contains("token"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("me"));
    }
}
