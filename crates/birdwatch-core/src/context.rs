use std::sync::Arc;

use crate::auth::{DemoAuth, SessionStore};
use crate::config::BirdwatchConfig;
use crate::error::Result;
use crate::monitor::MonitoringStore;
use crate::storage::{create_backend, Storage};

/// Everything a front-end needs, built once at startup and handed to each
/// consumer by reference.
pub struct AppContext {
    pub config: BirdwatchConfig,
    pub sessions: SessionStore<DemoAuth>,
    pub monitor: MonitoringStore,
    storage: Arc<Storage>,
}

impl AppContext {
    /// Open storage from `config`, restore any saved session and seed the
    /// monitoring store when `monitor.seed_demo_data` is set.
    pub fn new(config: BirdwatchConfig) -> Result<Self> {
        let storage = Arc::new(create_backend(&config)?);
        Ok(Self::with_storage(config, storage))
    }

    pub fn with_storage(config: BirdwatchConfig, storage: Arc<Storage>) -> Self {
        let sessions = SessionStore::new(
            DemoAuth::from_config(&config.auth),
            storage.clone(),
            config.auth.session_key.clone(),
        );
        sessions.restore();

        let monitor = MonitoringStore::new();
        if config.monitor.seed_demo_data {
            monitor.initialize();
        }

        tracing::debug!(
            backend = storage.backend_name(),
            signed_in = sessions.is_authenticated(),
            "context ready"
        );

        Self {
            config,
            sessions,
            monitor,
            storage,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
