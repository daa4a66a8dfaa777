// Environment-driven settings shared by the exports and the dde-exec harness.

use std::path::PathBuf;

/// `env_logger` filter for the bridge (falls back to `RUST_LOG`).
pub const LOG_FILTER_VAR: &str = "DDECLIENT_LOG";
/// Directory receiving `rust_crash.log`.
pub const CRASH_DIR_VAR: &str = "DDECLIENT_CRASH_DIR";
/// JSON file with extra viewer presets.
pub const PRESETS_VAR: &str = "DDECLIENT_PRESETS";

const APP_DIR_NAME: &str = "ddeclient";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    pub log_filter: Option<String>,
    pub crash_log_dir: Option<PathBuf>,
    pub presets_path: Option<PathBuf>,
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            log_filter: read(LOG_FILTER_VAR).or_else(|| read("RUST_LOG")),
            crash_log_dir: read(CRASH_DIR_VAR).map(PathBuf::from),
            presets_path: read(PRESETS_VAR).map(PathBuf::from),
        }
    }

    /// Configured crash directory, or `<local data dir>/ddeclient`.
    pub fn crash_log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.crash_log_dir {
            return dir.clone();
        }

        if let Some(local_data) = dirs::data_local_dir() {
            local_data.join(APP_DIR_NAME)
        } else {
            PathBuf::from(".")
        }
    }
}
