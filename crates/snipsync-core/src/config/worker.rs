//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background worker runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Cron schedule for the expired share-code sweep.
    #[serde(default = "default_share_code_sweep_schedule")]
    pub share_code_sweep_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            share_code_sweep_schedule: default_share_code_sweep_schedule(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

// Every 10 minutes. Expired codes are also deleted lazily on read, so the
// sweep only bounds table growth.
fn default_share_code_sweep_schedule() -> String {
    "0 */10 * * * *".to_string()
}
