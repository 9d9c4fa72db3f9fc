//! Configuration handling for the intake app

use crate::state::{AttachmentLimits, Session, User};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides the stub backend delay, in milliseconds
pub const SUBMIT_DELAY_ENV: &str = "ALLBYTE_SUBMIT_DELAY_MS";

/// User configuration. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Maximum staged attachments per intake
    pub max_files: Option<usize>,
    /// Maximum size per attachment in MB
    pub max_file_size_mb: Option<u64>,
    /// Simulated submission round-trip
    pub submit_delay_ms: Option<u64>,
    /// Signed-in user's email
    pub user_email: Option<String>,
    /// Signed-in user's display name
    pub user_name: Option<String>,
    /// Price id of the active plan
    pub plan_price_id: Option<String>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "allbyte", "allbyte-intake")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config dir, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::var(SUBMIT_DELAY_ENV).ok().as_deref());
        Ok(config)
    }

    /// Load from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to file
    #[cfg(test)]
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn apply_env(&mut self, submit_delay: Option<&str>) {
        if let Some(raw) = submit_delay {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.submit_delay_ms = Some(ms),
                Err(_) => tracing::warn!("Ignoring invalid {SUBMIT_DELAY_ENV}={raw:?}"),
            }
        }
    }

    pub fn attachment_limits(&self) -> AttachmentLimits {
        let defaults = AttachmentLimits::default();
        AttachmentLimits {
            max_files: self.max_files.unwrap_or(defaults.max_files),
            max_size_mb: self.max_file_size_mb.unwrap_or(defaults.max_size_mb),
        }
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::submission::DEFAULT_SUBMIT_DELAY)
    }

    /// Initial session. Signed in when an email is configured.
    pub fn session(&self) -> Session {
        let user = self.user_email.as_ref().map(|email| User {
            id: email.to_lowercase(),
            email: email.clone(),
            full_name: self.user_name.clone(),
        });
        Session {
            user,
            plan_price_id: self.plan_price_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert!(config.max_files.is_none());
        assert!(config.max_file_size_mb.is_none());
        assert!(config.submit_delay_ms.is_none());
        assert!(config.user_email.is_none());
        assert_eq!(config.attachment_limits(), AttachmentLimits::default());
        assert_eq!(config.submit_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_serialization() {
        let config = IntakeConfig {
            max_files: Some(3),
            max_file_size_mb: Some(5),
            submit_delay_ms: Some(10),
            user_email: Some("dana@acme.example".to_string()),
            user_name: Some("Dana Reyes".to_string()),
            plan_price_id: Some("price_1Rf6WQE2JA8BHiDgyXJmDFyh".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: IntakeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"max_files": 4, "unknown_field": "value"}"#;
        let parsed: IntakeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.max_files, Some(4));
    }

    #[test]
    fn test_limits_from_config() {
        let config = IntakeConfig {
            max_files: Some(2),
            ..Default::default()
        };
        let limits = config.attachment_limits();
        assert_eq!(limits.max_files, 2);
        assert_eq!(limits.max_size_mb, AttachmentLimits::default().max_size_mb);
    }

    mod files {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_missing_file_is_default() {
            let dir = tempfile::tempdir().unwrap();
            let config = IntakeConfig::load_from(&dir.path().join("config.json")).unwrap();
            assert_eq!(config, IntakeConfig::default());
        }

        #[test]
        fn test_save_then_load() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("config.json");
            let config = IntakeConfig {
                submit_delay_ms: Some(50),
                ..Default::default()
            };
            config.save_to(&path).unwrap();
            assert_eq!(IntakeConfig::load_from(&path).unwrap(), config);
        }

        #[test]
        fn test_load_invalid_json_errors() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            std::fs::write(&path, "{ not json").unwrap();
            let err = IntakeConfig::load_from(&path).unwrap_err();
            assert!(err.to_string().contains("Invalid config"));
        }
    }

    mod env {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_env_override_delay() {
            let mut config = IntakeConfig {
                submit_delay_ms: Some(2000),
                ..Default::default()
            };
            config.apply_env(Some("15"));
            assert_eq!(config.submit_delay(), Duration::from_millis(15));
        }

        #[test]
        fn test_invalid_env_is_ignored() {
            let mut config = IntakeConfig::default();
            config.apply_env(Some("soon"));
            assert!(config.submit_delay_ms.is_none());
        }
    }

    mod session {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_signed_out_without_email() {
            let session = IntakeConfig::default().session();
            assert!(session.user.is_none());
        }

        #[test]
        fn test_signed_in_with_email() {
            let config = IntakeConfig {
                user_email: Some("Dana@Acme.example".to_string()),
                user_name: Some("Dana Reyes".to_string()),
                plan_price_id: Some("price_1ReqAIE2JA8BHiDgfDTR30aR".to_string()),
                ..Default::default()
            };
            let session = config.session();
            let user = session.user.as_ref().unwrap();
            assert_eq!(user.email, "Dana@Acme.example");
            assert_eq!(user.full_name.as_deref(), Some("Dana Reyes"));
            assert_eq!(session.plan().map(|p| p.name), Some("Professional"));
        }
    }
}
