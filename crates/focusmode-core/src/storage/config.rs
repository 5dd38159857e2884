//! TOML-based application configuration.
//!
//! Stores the backend connection, guard tuning, and the check-in target
//! hint shown alongside the form. Configuration lives at
//! `~/.config/focusmode/config.toml`; the backend values can be
//! overridden per-process with `FOCUSMODE_HTTP_URL`, `FOCUSMODE_WS_URL`,
//! and `FOCUSMODE_STUDENT_ID`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::data_dir;
use crate::error::ConfigError;
use crate::guard::GuardLimits;

/// Backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_http_url")]
    pub http_url: String,
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Student identity for this client instance.
    #[serde(default = "default_student_id")]
    pub student_id: String,
}

/// Visibility guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default = "default_violation_threshold")]
    pub violation_threshold: u32,
    #[serde(default = "default_grace_secs")]
    pub grace_secs: u64,
}

/// Check-in target hint. Display only: the backend owns the pass rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinConfig {
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    #[serde(default = "default_target_minutes")]
    pub target_minutes: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusmode/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub checkin: CheckinConfig,
}

// Default functions
fn default_http_url() -> String {
    "https://intervention-engine.onrender.com".into()
}
fn default_ws_url() -> String {
    "wss://intervention-engine.onrender.com".into()
}
fn default_student_id() -> String {
    "11111111-1111-1111-1111-111111111111".into()
}
fn default_violation_threshold() -> u32 {
    3
}
fn default_grace_secs() -> u64 {
    10
}
fn default_target_score() -> u32 {
    7
}
fn default_target_minutes() -> u32 {
    60
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            http_url: default_http_url(),
            ws_url: default_ws_url(),
            student_id: default_student_id(),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            violation_threshold: default_violation_threshold(),
            grace_secs: default_grace_secs(),
        }
    }
}

impl Default for CheckinConfig {
    fn default() -> Self {
        Self {
            target_score: default_target_score(),
            target_minutes: default_target_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            guard: GuardConfig::default(),
            checkin: CheckinConfig::default(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    // ── Resolved values ──────────────────────────────────────────────

    /// Backend HTTP URL, with the env override applied.
    pub fn http_url(&self) -> String {
        std::env::var("FOCUSMODE_HTTP_URL").unwrap_or_else(|_| self.backend.http_url.clone())
    }

    /// Backend WebSocket URL, with the env override applied.
    pub fn ws_url(&self) -> String {
        std::env::var("FOCUSMODE_WS_URL").unwrap_or_else(|_| self.backend.ws_url.clone())
    }

    /// Student id, with the env override applied.
    ///
    /// # Errors
    /// Returns an error when the configured value is not a UUID.
    pub fn student_id(&self) -> Result<Uuid, ConfigError> {
        let raw = std::env::var("FOCUSMODE_STUDENT_ID")
            .unwrap_or_else(|_| self.backend.student_id.clone());
        Uuid::parse_str(&raw).map_err(|e| ConfigError::InvalidValue {
            key: "backend.student_id".into(),
            message: e.to_string(),
        })
    }

    pub fn guard_limits(&self) -> GuardLimits {
        GuardLimits {
            violation_threshold: self.guard.violation_threshold,
            grace_secs: self.guard.grace_secs,
        }
    }

    // ── Dot-path access ──────────────────────────────────────────────

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error if the
    /// key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(Box::new(ConfigError::UnknownKey(key.to_string())));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| {
                            ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            }
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(Box::new(ConfigError::UnknownKey(key.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let config = Config::default();
        assert_eq!(
            config.backend.http_url,
            "https://intervention-engine.onrender.com"
        );
        assert_eq!(config.guard.violation_threshold, 3);
        assert_eq!(config.checkin.target_score, 7);
        assert_eq!(config.checkin.target_minutes, 60);
        assert!(config.student_id().is_ok());
    }

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.guard.grace_secs, 10);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.guard.violation_threshold = 5;
        config.backend.ws_url = "ws://localhost:8000".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.guard.violation_threshold, 5);
        assert_eq!(loaded.backend.ws_url, "ws://localhost:8000");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str("[guard]\nviolation_threshold = 1\n").unwrap();
        assert_eq!(config.guard.violation_threshold, 1);
        assert_eq!(config.guard.grace_secs, 10);
        assert_eq!(config.checkin.target_minutes, 60);
    }

    #[test]
    fn dot_path_get() {
        let config = Config::default();
        assert_eq!(
            config.get("guard.violation_threshold").as_deref(),
            Some("3")
        );
        assert_eq!(
            config.get("backend.student_id").as_deref(),
            Some("11111111-1111-1111-1111-111111111111")
        );
        assert!(config.get("nope.nothing").is_none());
    }

    #[test]
    fn guard_limits_come_from_config() {
        let mut config = Config::default();
        config.guard.violation_threshold = 2;
        config.guard.grace_secs = 30;
        let limits = config.guard_limits();
        assert_eq!(limits.violation_threshold, 2);
        assert_eq!(limits.grace_secs, 30);
    }
}
