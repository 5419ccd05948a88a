use crate::error::{BirdwatchError, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdwatchConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// Custom location for the session record. A directory for the `file`
    /// backend, a database file for `sqlite`. Defaults to `~/.config/birdwatch/`.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated network round-trip for login and signup.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Key the signed-in session is stored under.
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            session_key: default_session_key(),
        }
    }
}

impl AuthConfig {
    pub fn latency(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
    /// Account slots included in the plan. Informational only; adding past
    /// the limit is not rejected.
    #[serde(default = "default_account_slots")]
    pub account_slots: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            account_slots: default_account_slots(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Valid storage backend names.
pub const VALID_STORAGE_BACKENDS: &[&str] = &["file", "sqlite", "memory"];

/// Valid log levels for `logging.level`.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

fn default_storage_backend() -> String {
    "file".to_string()
}
fn default_latency_ms() -> u64 {
    1000
}
fn default_session_key() -> String {
    "birdwatch_user".to_string()
}
fn default_true() -> bool {
    true
}
fn default_account_slots() -> usize {
    10
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl BirdwatchConfig {
    /// Load configuration with three-layer TOML merge:
    /// 1. ~/.config/birdwatch/config.toml (global)
    /// 2. .birdwatch/config.toml (project)
    /// 3. .birdwatch/config.local.toml (local, gitignored)
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".birdwatch").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".birdwatch").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| BirdwatchError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| BirdwatchError::Config(e.to_string()))?;

        cfg.validate();
        Ok(cfg)
    }

    /// Load with defaults only (no files).
    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
            monitor: MonitorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Defaults suited to tests: in-memory storage and no simulated latency.
    pub fn ephemeral() -> Self {
        let mut cfg = Self::default_config();
        cfg.storage.backend = "memory".to_string();
        cfg.auth.latency_ms = 0;
        cfg
    }

    /// Validate config values, falling back to defaults and logging warnings.
    /// This is lenient: it fixes values rather than rejecting the config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !VALID_STORAGE_BACKENDS.contains(&self.storage.backend.as_str()) {
            warnings.push(format!(
                "unknown storage backend '{}', valid: {}; using '{}'",
                self.storage.backend,
                VALID_STORAGE_BACKENDS.join(", "),
                default_storage_backend()
            ));
            self.storage.backend = default_storage_backend();
        }

        if self.auth.session_key.trim().is_empty() {
            warnings.push(format!(
                "auth.session_key is empty, using '{}'",
                default_session_key()
            ));
            self.auth.session_key = default_session_key();
        } else if !crate::storage::is_valid_key(&self.auth.session_key) {
            warnings.push(format!(
                "auth.session_key '{}' may only use letters, digits, '_', '-' and '.' \
                 and must not start with '.'; using '{}'",
                self.auth.session_key,
                default_session_key()
            ));
            self.auth.session_key = default_session_key();
        }

        if self.monitor.account_slots == 0 {
            warnings.push("monitor.account_slots = 0, setting to 1".to_string());
            self.monitor.account_slots = 1;
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            warnings.push(format!(
                "unknown log level '{}', valid: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ));
            self.logging.level = default_log_level();
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }

    /// Directory holding the global config and the default session record.
    pub fn data_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("birdwatch"))
            .ok_or_else(|| BirdwatchError::Config("cannot determine config directory".to_string()))
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("birdwatch").join("config.toml"))
}
