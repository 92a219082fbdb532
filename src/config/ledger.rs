//! Order ledger configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound accepted for `ledger.write_timeout_ms`
pub const MAX_WRITE_TIMEOUT_MS: u64 = 60_000;

/// Where orders are stored and how long a write may take
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// JSON file holding every placed order
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,

    /// Bound on a single store read or write, in milliseconds
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

impl LedgerConfig {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("ledger.path"));
        }
        if self.write_timeout_ms == 0 || self.write_timeout_ms > MAX_WRITE_TIMEOUT_MS {
            return Err(ValidationError::InvalidWriteTimeout {
                actual: self.write_timeout_ms,
                max: MAX_WRITE_TIMEOUT_MS,
            });
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("orders.json")
}

fn default_write_timeout_ms() -> u64 {
    2000
}
