use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Externally supplied wiring for the engine: target table, primary-key
/// attribute name, and the per-operation timeout bound.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    pub table: String,
    #[serde(default = "default_key_attribute")]
    pub key_attribute: String,
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,
}

fn default_key_attribute() -> String {
    "login".to_string()
}

fn default_op_timeout_ms() -> u64 {
    10_000
}

impl StoreConfig {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key_attribute: default_key_attribute(),
            op_timeout_ms: default_op_timeout_ms(),
        }
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("accounts")
    }
}
