#![allow(dead_code)]

use std::path::PathBuf;

use birdwatch_core::config::BirdwatchConfig;

/// A unique scratch directory under the system temp dir.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Config pointing a given backend at `path`, with no simulated latency.
pub fn config_for(backend: &str, path: Option<PathBuf>) -> BirdwatchConfig {
    let mut config = BirdwatchConfig::default_config();
    config.storage.backend = backend.to_string();
    config.storage.path = path.map(|p| p.to_string_lossy().to_string());
    config.auth.latency_ms = 0;
    config
}
