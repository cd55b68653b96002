use serde::{Deserialize, Serialize};

/// Store settings, read from `store.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Actions buffered per running task before it starts skipping (default: 256).
    #[serde(default = "default_task_channel_capacity")]
    pub task_channel_capacity: usize,
    /// Log a warning when a reducer replaces one at the same path (default: true).
    #[serde(default = "default_warn_on_reducer_overwrite")]
    pub warn_on_reducer_overwrite: bool,
    /// Trace every dispatched action (default: false).
    #[serde(default)]
    pub log_actions: bool,
}

fn default_task_channel_capacity() -> usize {
    256
}

fn default_warn_on_reducer_overwrite() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            task_channel_capacity: default_task_channel_capacity(),
            warn_on_reducer_overwrite: default_warn_on_reducer_overwrite(),
            log_actions: false,
        }
    }
}
