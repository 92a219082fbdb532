//! Runtime configuration: which assistant runs and how it logs

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::AssistantKind;

/// Process-level runtime settings
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Assistant variant served by this process
    #[serde(default)]
    pub assistant: AssistantKind,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log line format
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.log_level.trim().is_empty() {
            return Err(ValidationError::MissingRequired("runtime.log_level"));
        }
        tracing_subscriber::EnvFilter::try_new(&self.log_level)
            .map_err(|_| ValidationError::InvalidLogLevel(self.log_level.clone()))?;
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantKind::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info,assistant_engine=debug".to_string()
}
